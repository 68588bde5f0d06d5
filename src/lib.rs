//! Invaders — a fixed-formation arcade shooter.
//!
//! - `entities`: plain data for player, bullets, enemies and the world
//! - `compute`: pure update functions (spawning, movement, collisions)
//! - `session`: owns the world, its timers and the win/loss latch
//! - `render`: output capabilities and the frame renderer
//! - `display`: crossterm implementation of those capabilities

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod render;
pub mod session;
pub mod timer;

pub use config::GameConfig;
pub use error::{InvadersError, Result};
pub use session::Session;
