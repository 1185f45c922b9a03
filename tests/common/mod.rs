#![allow(dead_code)]

use std::io;

use psx_demos::collision::Rect;
use psx_demos::error::AssetError;
use psx_demos::platform::{Audio, ImageHandle, Renderer, Rgb, SoundHandle};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Background(Rgb),
    Image(ImageHandle, i32, i32),
    Rect(Rect, Rgb),
    Line(i32, i32, i32, i32, Rgb),
    Text(String, i32, i32, Rgb),
}

/// Records every call; optionally refuses to load one image name.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    pub presented: usize,
    pub loaded: Vec<ImageHandle>,
    pub freed: Vec<ImageHandle>,
    pub missing: Option<&'static str>,
    pub next: u32,
}

impl RecordingRenderer {
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, ..) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self, handle: ImageHandle) -> Vec<(i32, i32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image(h, x, y) if *h == handle => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rect(r, _) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, AssetError> {
        if self.missing == Some(name) {
            return Err(AssetError::NotFound {
                name: name.to_string(),
            });
        }
        let handle = ImageHandle(self.next);
        self.next += 1;
        self.loaded.push(handle);
        Ok(handle)
    }

    fn free_image(&mut self, image: ImageHandle) {
        self.freed.push(image);
    }

    fn set_background(&mut self, color: Rgb) {
        self.calls.push(DrawCall::Background(color));
    }

    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32) {
        self.calls.push(DrawCall::Image(image, x, y));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.calls.push(DrawCall::Rect(rect, color));
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        self.calls.push(DrawCall::Line(x0, y0, x1, y1, color));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        self.calls.push(DrawCall::Text(text.to_string(), x, y, color));
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        self.calls.clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAudio {
    pub loaded: Vec<SoundHandle>,
    pub freed: Vec<SoundHandle>,
    pub played: Vec<SoundHandle>,
    pub missing: Option<&'static str>,
    pub next: u32,
}

impl Audio for RecordingAudio {
    fn load_sound(&mut self, path: &str) -> Result<SoundHandle, AssetError> {
        if self.missing == Some(path) {
            return Err(AssetError::NotFound {
                name: path.to_string(),
            });
        }
        let handle = SoundHandle(100 + self.next);
        self.next += 1;
        self.loaded.push(handle);
        Ok(handle)
    }

    fn free_sound(&mut self, sound: SoundHandle) {
        self.freed.push(sound);
    }

    fn play(&mut self, sound: SoundHandle) {
        self.played.push(sound);
    }
}
