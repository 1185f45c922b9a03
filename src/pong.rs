/// Two-player pong.
///
/// Pad 1 drives the left bat, pad 2 the right one. A start press on either
/// pad serves the ball when it is at rest.

use crate::collision::Rect;
use crate::config::{PongConfig, ScreenSize};
use crate::input::{Button, Pad};
use crate::platform::{Renderer, Rgb};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bat {
    pub x: i32,
    /// Top edge.
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub speed_x: i32,
    pub speed_y: i32,
    pub in_play: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub left: u32,
    pub right: u32,
}

#[derive(Clone, Debug)]
pub struct Pong {
    config: PongConfig,
    screen: ScreenSize,
    pub left: Bat,
    pub right: Bat,
    pub ball: Ball,
    pub score: Scoreboard,
    /// Horizontal direction of the next serve.
    serve: i32,
}

impl Pong {
    pub fn new(config: PongConfig, screen: ScreenSize) -> Self {
        let y = (screen.height - config.bat_height) / 2;
        Pong {
            left: Bat {
                x: config.bat_inset,
                y,
            },
            right: Bat {
                x: screen.width - config.bat_inset - config.bat_width,
                y,
            },
            ball: centred_ball(&config, screen),
            score: Scoreboard::default(),
            serve: 1,
            config,
            screen,
        }
    }

    pub fn bat(&self, side: Side) -> &Bat {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn bat_rect(&self, side: Side) -> Rect {
        let bat = self.bat(side);
        Rect::new(bat.x, bat.y, self.config.bat_width, self.config.bat_height)
    }

    pub fn ball_rect(&self) -> Rect {
        let size = self.config.ball_size;
        Rect::new(self.ball.x, self.ball.y, size, size)
    }

    /// Move a bat vertically, keeping it between the boundary lines.
    pub fn move_bat(&mut self, side: Side, dy: i32) {
        let top = self.config.border;
        let bottom = self.screen.height - self.config.border - self.config.bat_height;
        let bat = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        bat.y = (bat.y + dy).clamp(top, bottom.max(top));
    }

    /// Serve the ball. Ignored while it is already moving.
    pub fn kick(&mut self) {
        if self.ball.in_play {
            return;
        }
        self.ball.speed_x = self.config.ball_speed_x * self.serve;
        self.ball.speed_y = self.config.ball_speed_y;
        self.ball.in_play = true;
    }

    pub fn handle_input(&mut self, pad1: &Pad, pad2: &Pad) {
        let speed = self.config.bat_speed;
        for (pad, side) in [(pad1, Side::Left), (pad2, Side::Right)] {
            if pad.held(Button::Up) {
                self.move_bat(side, -speed);
            }
            if pad.held(Button::Down) {
                self.move_bat(side, speed);
            }
        }
        if pad1.pressed(Button::Start) || pad2.pressed(Button::Start) {
            self.kick();
        }
    }

    /// Advance the ball by one tick. Returns the side that scored, if any.
    pub fn update(&mut self) -> Option<Side> {
        if !self.ball.in_play {
            return None;
        }
        let size = self.config.ball_size;
        let top = self.config.border;
        let bottom = self.screen.height - self.config.border;

        self.ball.x += self.ball.speed_x;
        self.ball.y += self.ball.speed_y;

        if self.ball.y < top {
            self.ball.y = top;
            self.ball.speed_y = self.ball.speed_y.abs();
        } else if self.ball.y + size > bottom {
            self.ball.y = bottom - size;
            self.ball.speed_y = -self.ball.speed_y.abs();
        }

        let ball = self.ball_rect();
        if self.ball.speed_x < 0 && ball.intersects(&self.bat_rect(Side::Left)) {
            self.ball.x = self.bat_rect(Side::Left).right();
            self.ball.speed_x = self.ball.speed_x.abs();
        } else if self.ball.speed_x > 0 && ball.intersects(&self.bat_rect(Side::Right)) {
            self.ball.x = self.right.x - size;
            self.ball.speed_x = -self.ball.speed_x.abs();
        }

        let scorer = if self.ball.x + size < 0 {
            Some(Side::Right)
        } else if self.ball.x > self.screen.width {
            Some(Side::Left)
        } else {
            None
        };

        if let Some(side) = scorer {
            match side {
                Side::Left => self.score.left += 1,
                Side::Right => self.score.right += 1,
            }
            // Serve towards the player who just conceded.
            self.serve = match side {
                Side::Left => 1,
                Side::Right => -1,
            };
            self.ball = centred_ball(&self.config, self.screen);
            log::info!("point {:?}: {}:{}", side, self.score.left, self.score.right);
        }
        scorer
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let (w, h) = (self.screen.width, self.screen.height);
        let border = self.config.border;

        renderer.set_background(Rgb::BLACK);
        renderer.draw_line(w / 2, 0, w / 2, h, Rgb::GREY);
        renderer.draw_line(0, border, w, border, Rgb::WHITE);
        renderer.draw_line(0, h - border, w, h - border, Rgb::WHITE);
        renderer.fill_rect(self.bat_rect(Side::Left), Rgb::WHITE);
        renderer.fill_rect(self.bat_rect(Side::Right), Rgb::WHITE);
        renderer.fill_rect(self.ball_rect(), Rgb::WHITE);
        renderer.draw_text(
            &format!("{}:{}", self.score.left, self.score.right),
            w / 2 - 12,
            4,
            Rgb::WHITE,
        );
    }
}

fn centred_ball(config: &PongConfig, screen: ScreenSize) -> Ball {
    Ball {
        x: (screen.width - config.ball_size) / 2,
        y: (screen.height - config.ball_size) / 2,
        speed_x: 0,
        speed_y: 0,
        in_play: false,
    }
}
