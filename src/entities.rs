/// Entity types shared by the demos — pure data, no logic.

use crate::collision::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Play,
    GameOver,
}

impl GameState {
    /// Where a start press leads from this state.
    pub fn on_start(self) -> GameState {
        match self {
            GameState::Menu => GameState::Play,
            GameState::Play => GameState::Play,
            GameState::GameOver => GameState::Menu,
        }
    }
}

// ── Pooled entities ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
}

/// A short-lived effect left where an enemy was destroyed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    /// Ticks since the explosion started.
    pub frame: u32,
}

/// Anything with a position that can be boxed for collision tests.
pub trait Positioned {
    fn position(&self) -> (i32, i32);

    fn bounds(&self, width: i32, height: i32) -> Rect {
        let (x, y) = self.position();
        Rect::new(x, y, width, height)
    }
}

impl Positioned for Bullet {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl Positioned for Enemy {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl Positioned for Explosion {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    pub lives: u32,
}

impl Positioned for Ship {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Things that happened during a tick that the frontend may want to hear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShooterEvent {
    Fired,
    Exploded,
    ShipHit,
}
