/// Frame loop smoke test: counts ticks and prints the count.

use crate::platform::{Renderer, Rgb};

#[derive(Clone, Debug, Default)]
pub struct LoopCounter {
    pub count: u64,
}

impl LoopCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self) {
        self.count += 1;
    }

    pub fn label(&self) -> String {
        format!("Current loop: {}", self.count)
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.set_background(Rgb::BLUE);
        renderer.draw_text(&self.label(), 8, 8, Rgb::WHITE);
    }
}
