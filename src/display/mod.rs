/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalRenderer` implements [`Renderer`] on top of crossterm. Draw calls
/// land in a character back buffer in virtual screen coordinates scaled down
/// to the terminal grid; `present` writes the buffer out and clears it for
/// the next frame. No game logic is performed here.

mod bell;

pub use bell::TerminalAudio;

use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::collision::Rect;
use crate::config::ScreenSize;
use crate::error::AssetError;
use crate::platform::{ImageHandle, Renderer, Rgb};

/// Character art standing in for the console's textures. Spaces are transparent.
struct Sprite {
    name: &'static str,
    rows: &'static [&'static str],
    color: Color,
}

// ── Sprite bank ───────────────────────────────────────────────────────────────

const SPRITES: &[Sprite] = &[
    Sprite {
        name: "spaceship",
        rows: &[" ▲ ", "/|\\"],
        color: Color::White,
    },
    Sprite {
        name: "enemy",
        rows: &["<▼>", "[_]"],
        color: Color::Green,
    },
    Sprite {
        name: "explosion",
        rows: &["\\|/", "/|\\"],
        color: Color::Red,
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

pub struct TerminalRenderer<W: Write> {
    out: W,
    screen: ScreenSize,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    background: Color,
    images: HashMap<ImageHandle, &'static Sprite>,
    next_image: u32,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, screen: ScreenSize, cols: u16, rows: u16) -> Self {
        TerminalRenderer {
            out,
            screen,
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            background: Color::Reset,
            images: HashMap::new(),
            next_image: 0,
        }
    }

    /// Follow a terminal resize. The current back buffer is discarded.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        scale(x, y, self.screen, self.cols, self.rows)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells[index] = Cell { ch, fg };
    }
}

/// Map a virtual-screen point onto the terminal grid.
fn scale(x: i32, y: i32, screen: ScreenSize, cols: u16, rows: u16) -> (i32, i32) {
    let col = x as i64 * cols as i64 / screen.width.max(1) as i64;
    let row = y as i64 * rows as i64 / screen.height.max(1) as i64;
    (col as i32, row as i32)
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn line_glyph(dx: i32, dy: i32) -> char {
    if dy == 0 {
        '─'
    } else if dx == 0 {
        '│'
    } else {
        '·'
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, AssetError> {
        let sprite = SPRITES
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AssetError::NotFound {
                name: name.to_string(),
            })?;
        let handle = ImageHandle(self.next_image);
        self.next_image += 1;
        self.images.insert(handle, sprite);
        log::debug!("image {name} -> {handle:?}");
        Ok(handle)
    }

    fn free_image(&mut self, image: ImageHandle) {
        self.images.remove(&image);
    }

    fn set_background(&mut self, color: Rgb) {
        self.background = to_color(color);
    }

    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32) {
        let Some(sprite) = self.images.get(&image).copied() else {
            log::warn!("draw of unknown image {image:?}");
            return;
        };
        let (col, row) = self.to_cell(x, y);
        for (dy, line) in sprite.rows.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    self.put(col + dx as i32, row + dy as i32, ch, sprite.color);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let (c0, r0) = self.to_cell(rect.x, rect.y);
        let (c1, r1) = self.to_cell(rect.right() - 1, rect.bottom() - 1);
        let fg = to_color(color);
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, '█', fg);
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let (c0, r0) = self.to_cell(x0, y0);
        let (c1, r1) = self.to_cell(x1, y1);
        let glyph = line_glyph(c1 - c0, r1 - r0);
        let fg = to_color(color);

        // Bresenham over the cell grid.
        let (dx, dy) = ((c1 - c0).abs(), -(r1 - r0).abs());
        let (sx, sy) = ((c1 - c0).signum(), (r1 - r0).signum());
        let (mut col, mut row, mut err) = (c0, r0, dx + dy);
        loop {
            self.put(col, row, glyph, fg);
            if col == c1 && row == r1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                col += sx;
            }
            if e2 <= dx {
                err += dx;
                row += sy;
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        let (col, row) = self.to_cell(x, y);
        let fg = to_color(color);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.queue(style::SetBackgroundColor(self.background))?;
        let mut fg = Color::Reset;
        self.out.queue(style::SetForegroundColor(fg))?;

        let cols = self.cols as usize;
        for row in 0..self.rows as usize {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            let mut line = String::with_capacity(cols);
            for cell in &self.cells[row * cols..(row + 1) * cols] {
                if cell.fg != fg && cell.ch != ' ' {
                    self.out.queue(Print(std::mem::take(&mut line)))?;
                    self.out.queue(style::SetForegroundColor(cell.fg))?;
                    fg = cell.fg;
                }
                line.push(cell.ch);
            }
            self.out.queue(Print(line))?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;

        self.cells.fill(BLANK);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 320,
        height: 240,
    };

    #[test]
    fn scale_maps_corners() {
        assert_eq!(scale(0, 0, SCREEN, 80, 24), (0, 0));
        assert_eq!(scale(319, 239, SCREEN, 80, 24), (79, 23));
        assert_eq!(scale(160, 120, SCREEN, 80, 24), (40, 12));
    }

    #[test]
    fn scale_keeps_offscreen_points_offscreen() {
        let (col, row) = scale(-8, 300, SCREEN, 80, 24);
        assert!(col < 0);
        assert!(row >= 24);
    }

    #[test]
    fn unknown_sprite_is_not_found() {
        let mut r = TerminalRenderer::new(Vec::new(), SCREEN, 80, 24);
        assert_eq!(
            r.load_image("ship"),
            Err(AssetError::NotFound {
                name: "ship".to_string()
            })
        );
    }

    #[test]
    fn text_lands_in_back_buffer_and_clears_after_present() {
        let mut r = TerminalRenderer::new(Vec::new(), SCREEN, 80, 24);
        r.draw_text("Hi", 0, 0, Rgb::WHITE);
        assert_eq!(r.cells[0].ch, 'H');
        assert_eq!(r.cells[1].ch, 'i');

        r.present().unwrap();
        assert!(r.cells.iter().all(|c| *c == BLANK));
        let written = String::from_utf8(r.into_inner()).unwrap();
        assert!(written.contains("Hi"));
    }

    #[test]
    fn clipped_draws_do_not_panic() {
        let mut r = TerminalRenderer::new(Vec::new(), SCREEN, 10, 5);
        let ship = r.load_image("spaceship").unwrap();
        r.draw_image(ship, 316, 236);
        r.draw_image(ship, -40, -40);
        r.fill_rect(Rect::new(300, 230, 50, 50), Rgb::YELLOW);
        r.draw_line(-10, 5, 400, 5, Rgb::WHITE);
        r.draw_text("a long line of text", 300, 0, Rgb::WHITE);
    }
}
