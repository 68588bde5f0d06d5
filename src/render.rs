//! Output capabilities and the frame renderer.
//!
//! The simulation never talks to a terminal (or any other presentation
//! layer) directly.  It draws through `Surface`, reports the score through
//! `ScoreSink` and announces the end of the game through `OutcomeSink`.

use crate::entities::{Color, GameStatus, Rect, World};

/// A drawable area in playfield coordinates.
pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

pub trait ScoreSink {
    fn show_score(&mut self, score: u32);
}

pub trait OutcomeSink {
    /// Called once when the game reaches `Won` or `Lost`.
    fn show_outcome(&mut self, status: GameStatus, message: &str);
    fn hide_outcome(&mut self);
}

/// Clear, then draw player, bullets and enemies in that order.
pub fn render<S: Surface + ?Sized>(surface: &mut S, world: &World) {
    surface.clear();

    surface.fill_rect(world.player.rect(), world.player.color);
    for bullet in &world.bullets {
        surface.fill_rect(bullet.rect(), bullet.color);
    }
    for enemy in &world.enemies {
        surface.fill_rect(enemy.rect(), enemy.color);
    }
}
