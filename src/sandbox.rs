/// Movement sandbox: the ship steps around the screen one press at a time
/// and the enemy sprite tags along, one horizontal step behind.

use crate::config::ScreenSize;
use crate::error::AssetError;
use crate::input::{Button, Pad};
use crate::platform::{ImageHandle, Renderer, Rgb};

/// Pixels moved per press.
pub const STEP: i32 = 10;
const SPRITE_SIZE: i32 = 32;
const NAVY: Rgb = Rgb::new(0, 0, 67);

#[derive(Clone, Copy, Debug)]
pub struct SandboxAssets {
    pub ship: ImageHandle,
    pub enemy: ImageHandle,
}

impl SandboxAssets {
    /// Load both images; the ship is freed again if the enemy fails to load.
    pub fn load<R: Renderer + ?Sized>(renderer: &mut R) -> Result<Self, AssetError> {
        let ship = renderer.load_image("spaceship")?;
        let enemy = match renderer.load_image("enemy") {
            Ok(handle) => handle,
            Err(e) => {
                renderer.free_image(ship);
                return Err(e);
            }
        };
        Ok(SandboxAssets { ship, enemy })
    }

    pub fn free<R: Renderer + ?Sized>(self, renderer: &mut R) {
        renderer.free_image(self.ship);
        renderer.free_image(self.enemy);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sandbox {
    screen: ScreenSize,
    pub ship: (i32, i32),
    pub enemy: (i32, i32),
    pub score: u32,
}

impl Sandbox {
    pub fn new(screen: ScreenSize) -> Self {
        Sandbox {
            screen,
            ship: (0, 0),
            enemy: (0, 0),
            score: 0,
        }
    }

    pub fn handle_input(&mut self, pad: &Pad) {
        let (mut dx, mut dy) = (0, 0);
        if pad.pressed(Button::Up) {
            dy -= STEP;
        }
        if pad.pressed(Button::Down) {
            dy += STEP;
        }
        if pad.pressed(Button::Left) {
            dx -= STEP;
        }
        if pad.pressed(Button::Right) {
            dx += STEP;
        }
        if dx != 0 {
            self.enemy = self.ship;
        }

        let max_x = (self.screen.width - SPRITE_SIZE).max(0);
        let max_y = (self.screen.height - SPRITE_SIZE).max(0);
        self.ship = (
            (self.ship.0 + dx).clamp(0, max_x),
            (self.ship.1 + dy).clamp(0, max_y),
        );
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R, assets: &SandboxAssets) {
        renderer.set_background(NAVY);
        renderer.draw_image(assets.ship, self.ship.0, self.ship.1);
        renderer.draw_image(assets.enemy, self.enemy.0, self.enemy.1);
        renderer.draw_text(&format!("Score: {}", self.score), 8, 8, Rgb::WHITE);
    }
}
