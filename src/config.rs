//! Tunable game constants.
//!
//! The defaults describe the classic 600×600 board; a JSON file may override
//! any subset of fields.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::Color;
use crate::error::{InvadersError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 600.0,
            height: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Distance between the player's top edge and the bottom of the canvas.
    pub bottom_margin: f32,
    pub color: Color,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            width: 50.0,
            height: 30.0,
            speed: 5.0,
            bottom_margin: 50.0,
            color: Color::Lime,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Color,
    pub cooldown_ms: u64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        BulletConfig {
            width: 5.0,
            height: 10.0,
            speed: 7.0,
            color: Color::White,
            cooldown_ms: 200,
        }
    }
}

/// Upper bound on enemy grid rows and columns.
pub const MAX_GRID_DIM: u32 = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyGridConfig {
    pub rows: u32,
    pub cols: u32,
    pub spacing: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub color: Color,
}

impl Default for EnemyGridConfig {
    fn default() -> Self {
        EnemyGridConfig {
            rows: 4,
            cols: 8,
            spacing: 50.0,
            x_offset: 50.0,
            y_offset: 30.0,
            enemy_width: 40.0,
            enemy_height: 30.0,
            color: Color::Red,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    pub speed: f32,
    pub descent_step: f32,
    pub tick_ms: u64,
}

impl Default for FormationConfig {
    fn default() -> Self {
        FormationConfig {
            speed: 1.0,
            descent_step: 20.0,
            tick_ms: 25,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub enemies: EnemyGridConfig,
    pub formation: FormationConfig,
    pub score_per_kill: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas: CanvasConfig::default(),
            player: PlayerConfig::default(),
            bullet: BulletConfig::default(),
            enemies: EnemyGridConfig::default(),
            formation: FormationConfig::default(),
            score_per_kill: 10,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.bullet.cooldown_ms)
    }

    pub fn formation_period(&self) -> Duration {
        Duration::from_millis(self.formation.tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(InvadersError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.speed", self.player.speed)?;
        positive("bullet.width", self.bullet.width)?;
        positive("bullet.height", self.bullet.height)?;
        positive("bullet.speed", self.bullet.speed)?;
        positive("enemies.enemy_width", self.enemies.enemy_width)?;
        positive("enemies.enemy_height", self.enemies.enemy_height)?;
        positive("formation.speed", self.formation.speed)?;
        positive("formation.descent_step", self.formation.descent_step)?;

        positive("enemies.spacing", self.enemies.spacing)?;

        if self.enemies.rows == 0 || self.enemies.cols == 0 {
            return Err(InvadersError::InvalidConfig(
                "enemy grid needs at least one row and one column".into(),
            ));
        }
        if self.enemies.rows > MAX_GRID_DIM || self.enemies.cols > MAX_GRID_DIM {
            return Err(InvadersError::InvalidConfig(format!(
                "enemy grid is limited to {MAX_GRID_DIM} rows and columns"
            )));
        }
        if self.enemies.spacing < self.enemies.enemy_width
            || self.enemies.spacing < self.enemies.enemy_height
        {
            return Err(InvadersError::InvalidConfig(format!(
                "enemies.spacing {} would make enemies overlap",
                self.enemies.spacing
            )));
        }
        if self.formation.tick_ms == 0 {
            return Err(InvadersError::InvalidConfig(
                "formation.tick_ms must be non-zero".into(),
            ));
        }
        if self.player.width > self.canvas.width
            || self.player.bottom_margin > self.canvas.height
        {
            return Err(InvadersError::InvalidConfig(
                "player does not fit on the canvas".into(),
            ));
        }

        let grid = &self.enemies;
        let right = grid.x_offset + (grid.cols - 1) as f32 * grid.spacing + grid.enemy_width;
        let bottom = grid.y_offset + (grid.rows - 1) as f32 * grid.spacing + grid.enemy_height;
        if grid.x_offset < 0.0 || right > self.canvas.width {
            return Err(InvadersError::InvalidConfig(format!(
                "enemy grid spans x {}..{right}, wider than canvas {}",
                grid.x_offset, self.canvas.width
            )));
        }
        let player_y = self.canvas.height - self.player.bottom_margin;
        if grid.y_offset < 0.0 || bottom >= player_y {
            return Err(InvadersError::InvalidConfig(format!(
                "enemy grid bottom {bottom} must start above the player row {player_y}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.score_per_kill, 10);
        assert_eq!(config.fire_cooldown(), Duration::from_millis(200));
        assert_eq!(config.formation_period(), Duration::from_millis(25));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = GameConfig::from_json(r#"{ "enemies": { "rows": 2 } }"#).unwrap();
        assert_eq!(config.enemies.rows, 2);
        assert_eq!(config.enemies.cols, 8);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn colors_parse_lowercase() {
        let config = GameConfig::from_json(r#"{ "player": { "color": "cyan" } }"#).unwrap();
        assert_eq!(config.player.color, Color::Cyan);
    }

    #[test]
    fn empty_grid_rejected() {
        let err = GameConfig::from_json(r#"{ "enemies": { "cols": 0 } }"#).unwrap_err();
        assert!(matches!(err, InvadersError::InvalidConfig(_)));
    }

    #[test]
    fn negative_spacing_rejected() {
        let err = GameConfig::from_json(r#"{ "enemies": { "spacing": -50 } }"#).unwrap_err();
        assert!(matches!(err, InvadersError::InvalidConfig(_)));
    }

    #[test]
    fn zero_spacing_rejected() {
        let err = GameConfig::from_json(r#"{ "enemies": { "spacing": 0 } }"#).unwrap_err();
        assert!(matches!(err, InvadersError::InvalidConfig(_)));
    }

    #[test]
    fn spacing_smaller_than_enemy_rejected() {
        let err = GameConfig::from_json(r#"{ "enemies": { "spacing": 35 } }"#).unwrap_err();
        assert!(matches!(err, InvadersError::InvalidConfig(_)));
    }

    #[test]
    fn huge_grid_rejected_before_spawning() {
        let err = GameConfig::from_json(
            r#"{ "enemies": { "spacing": 0, "rows": 70000, "cols": 70000 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, InvadersError::InvalidConfig(_)));

        let mut config = GameConfig::default();
        config.enemies.rows = MAX_GRID_DIM + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn grid_wider_than_canvas_rejected() {
        let err = GameConfig::from_json(r#"{ "canvas": { "width": 300 } }"#).unwrap_err();
        assert!(matches!(err, InvadersError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, InvadersError::ConfigParse(_)));
    }
}
