//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `World` and returns a brand-new `World`.  Timing (formation period, fire
//! cooldown) is the session's job; nothing in here knows about clocks.

use crate::config::{BulletConfig, EnemyGridConfig, GameConfig};
use crate::entities::{Bullet, Enemy, Formation, Player, World};
use crate::input::InputState;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial world: player centred near the bottom, full enemy grid,
/// empty bullet list, fire armed.
pub fn init_world(config: &GameConfig) -> World {
    let canvas = &config.canvas;
    let p = &config.player;
    World {
        player: Player {
            x: canvas.width / 2.0 - p.width / 2.0,
            y: canvas.height - p.bottom_margin,
            width: p.width,
            height: p.height,
            speed: p.speed,
            color: p.color,
        },
        bullets: Vec::new(),
        enemies: create_enemies(&config.enemies),
        formation: Formation {
            direction: 1.0,
            speed: config.formation.speed,
        },
        score: 0,
        can_shoot: true,
        width: canvas.width,
        height: canvas.height,
    }
}

/// Lay out `rows × cols` enemies, row-major, at
/// `(x_offset + col * spacing, y_offset + row * spacing)`.
pub fn create_enemies(grid: &EnemyGridConfig) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(grid.rows as usize * grid.cols as usize);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            enemies.push(Enemy {
                x: grid.x_offset + col as f32 * grid.spacing,
                y: grid.y_offset + row as f32 * grid.spacing,
                width: grid.enemy_width,
                height: grid.enemy_height,
                color: grid.color,
            });
        }
    }
    enemies
}

// ── Per-frame updates ────────────────────────────────────────────────────────

/// Apply held direction keys.  Both keys held cancel out.
pub fn move_player(world: &World, input: &InputState) -> World {
    let bound = world.width - world.player.width;
    let mut x = world.player.x;
    if input.left() && x > 0.0 {
        x = (x - world.player.speed).max(0.0);
    }
    if input.right() && x < bound {
        x = (x + world.player.speed).min(bound);
    }
    World {
        player: Player {
            x,
            ..world.player.clone()
        },
        ..world.clone()
    }
}

/// Spawn a bullet centred on the player's nose and disarm firing.  While
/// disarmed the request is dropped and the world is returned unchanged.
pub fn player_shoot(world: &World, bullet: &BulletConfig) -> World {
    if !world.can_shoot {
        return world.clone();
    }
    let p = &world.player;
    let mut bullets = world.bullets.clone();
    bullets.push(Bullet {
        x: p.x + p.width / 2.0 - bullet.width / 2.0,
        y: p.y,
        width: bullet.width,
        height: bullet.height,
        color: bullet.color,
    });
    World {
        bullets,
        can_shoot: false,
        ..world.clone()
    }
}

/// Move every bullet up by `speed` and drop the ones that left the top.
pub fn advance_bullets(world: &World, speed: f32) -> World {
    let bullets = world
        .bullets
        .iter()
        .map(|b| Bullet {
            y: b.y - speed,
            ..b.clone()
        })
        .filter(|b| b.y >= 0.0)
        .collect();
    World {
        bullets,
        ..world.clone()
    }
}

/// Bullet-vs-enemy pass.  Newest bullets are checked first, each against the
/// newest enemies first; a bullet removes at most one enemy.  Walking both
/// lists backwards keeps the indices still to visit valid after a removal.
pub fn resolve_collisions(world: &World, score_per_kill: u32) -> World {
    let mut next = world.clone();
    let mut kills = 0u32;

    for b in (0..next.bullets.len()).rev() {
        let bullet = next.bullets[b].rect();
        let hit = (0..next.enemies.len())
            .rev()
            .find(|&e| bullet.overlaps(&next.enemies[e].rect()));

        if let Some(e) = hit {
            next.bullets.remove(b);
            next.enemies.remove(e);
            kills += 1;
        }
    }

    if kills > 0 {
        log::trace!("{kills} enemies destroyed, {} left", next.enemies.len());
    }
    next.score += kills * score_per_kill;
    next
}

// ── Formation tick ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct FormationStep {
    pub world: World,
    /// Some enemy left `[0, width - enemy.width]`; the formation descended
    /// and reversed.
    pub hit_edge: bool,
    /// After the descent some enemy's bottom edge reached the player's row.
    pub invaded: bool,
}

/// Shift the whole formation sideways.  If any enemy crossed a wall, the
/// direction flips and every enemy drops by `descent_step`.
pub fn advance_formation(world: &World, descent_step: f32) -> FormationStep {
    let mut next = world.clone();
    let dx = next.formation.speed * next.formation.direction;

    let mut hit_edge = false;
    for enemy in &mut next.enemies {
        enemy.x += dx;
        if enemy.x < 0.0 || enemy.x + enemy.width > next.width {
            hit_edge = true;
        }
    }

    let mut invaded = false;
    if hit_edge {
        next.formation.direction = -next.formation.direction;
        let player_y = next.player.y;
        for enemy in &mut next.enemies {
            enemy.y += descent_step;
            if enemy.bottom() >= player_y {
                invaded = true;
            }
        }
    }

    FormationStep {
        world: next,
        hit_edge,
        invaded,
    }
}
