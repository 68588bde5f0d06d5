//! Held-key tracking.
//!
//! Key identifiers are plain strings so any front-end can feed events
//! without sharing a key type with the simulation.

use std::collections::HashMap;

pub const KEY_LEFT: &str = "ArrowLeft";
pub const KEY_RIGHT: &str = "ArrowRight";
pub const KEY_FIRE: &str = " ";

#[derive(Clone, Debug, Default)]
pub struct InputState {
    keys: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.insert(key.to_string(), true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.insert(key.to_string(), false);
    }

    /// Unknown keys read as released.
    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn left(&self) -> bool {
        self.is_held(KEY_LEFT)
    }

    pub fn right(&self) -> bool {
        self.is_held(KEY_RIGHT)
    }

    pub fn fire(&self) -> bool {
        self.is_held(KEY_FIRE)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
