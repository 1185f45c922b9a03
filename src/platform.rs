/// Seams between the demos and the devices they draw, play and load through.
///
/// The demos only ever hold opaque handles; what a handle refers to is up to
/// the device that issued it.

use std::io;

use crate::collision::Rect;
use crate::error::AssetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const GREY: Rgb = Rgb::new(150, 150, 150);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

pub trait Renderer {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, AssetError>;
    fn free_image(&mut self, image: ImageHandle);

    fn set_background(&mut self, color: Rgb);
    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb);

    /// Show everything drawn since the last call, then start a fresh frame.
    fn present(&mut self) -> io::Result<()>;
}

pub trait Audio {
    fn load_sound(&mut self, path: &str) -> Result<SoundHandle, AssetError>;
    fn free_sound(&mut self, sound: SoundHandle);

    /// Fire and forget.
    fn play(&mut self, sound: SoundHandle);
}
