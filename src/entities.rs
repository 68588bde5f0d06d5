//! All game entity types — plain data, no simulation logic.

use serde::{Deserialize, Serialize};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in playfield units (origin top-left, y grows down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that merely share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Colours ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Lime,
    White,
    Red,
    Yellow,
    Cyan,
    Magenta,
}

// ── Player, bullets & enemies ─────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal distance covered per frame while a direction key is held.
    pub speed: f32,
    pub color: Color,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// ── Formation & status ────────────────────────────────────────────────────────

/// Motion shared by every enemy: the grid moves as one rigid body.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    /// +1 moves right, -1 moves left.
    pub direction: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }

    /// Text shown by the end-of-game sink, `None` while running.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GameStatus::Running => None,
            GameStatus::Won => Some("You Win!"),
            GameStatus::Lost => Some("Game Over"),
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation mutates during a session.  Cloneable so the
/// update functions in `compute` can return a fresh copy.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub player: Player,
    /// Live bullets, in creation order.
    pub bullets: Vec<Bullet>,
    /// Live enemies, in spawn order (row-major).
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
    pub score: u32,
    /// Fire-rate gate; cleared on every shot and re-armed by a timer.
    pub can_shoot: bool,
    pub width: f32,
    pub height: f32,
}
