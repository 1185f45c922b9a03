/// Space shooter game logic.
///
/// `Shooter` owns the whole game: ship, the three entity pools, score and the
/// menu/play/game-over state. Input and time come in through
/// `handle_input` and `update`; randomness is injected so tests can seed it.
/// Nothing here touches a device except `draw`, which only goes through the
/// `Renderer` trait.

use rand::Rng;

use crate::collision::first_hit;
use crate::config::{ScreenSize, ShooterConfig};
use crate::entities::{Bullet, Enemy, Explosion, GameState, Positioned, Ship, ShooterEvent};
use crate::error::AssetError;
use crate::input::{Button, Pad};
use crate::platform::{Audio, ImageHandle, Renderer, Rgb, SoundHandle};
use crate::pool::Pool;

const IMAGE_NAMES: [&str; 3] = ["spaceship", "enemy", "explosion"];
const SOUND_PATHS: [&str; 4] = [
    "assets/explode.wav",
    "assets/hit_hurt.wav",
    "assets/laser.wav",
    "assets/music.wav",
];

// ── Assets ────────────────────────────────────────────────────────────────────

/// Handles acquired once at startup and given back with [`ShooterAssets::free`].
#[derive(Clone, Copy, Debug)]
pub struct ShooterAssets {
    pub spaceship: ImageHandle,
    pub enemy: ImageHandle,
    pub explosion: ImageHandle,
    pub explode: SoundHandle,
    pub hit_hurt: SoundHandle,
    pub laser: SoundHandle,
    pub music: SoundHandle,
}

impl ShooterAssets {
    /// Load every image and sound. If any load fails, whatever was already
    /// loaded is freed before the error is returned.
    pub fn load<R, A>(renderer: &mut R, audio: &mut A) -> Result<Self, AssetError>
    where
        R: Renderer + ?Sized,
        A: Audio + ?Sized,
    {
        let mut images = Vec::with_capacity(IMAGE_NAMES.len());
        for name in IMAGE_NAMES {
            match renderer.load_image(name) {
                Ok(handle) => images.push(handle),
                Err(e) => {
                    images.into_iter().for_each(|h| renderer.free_image(h));
                    return Err(e);
                }
            }
        }

        let mut sounds = Vec::with_capacity(SOUND_PATHS.len());
        for path in SOUND_PATHS {
            match audio.load_sound(path) {
                Ok(handle) => sounds.push(handle),
                Err(e) => {
                    images.into_iter().for_each(|h| renderer.free_image(h));
                    sounds.into_iter().for_each(|h| audio.free_sound(h));
                    return Err(e);
                }
            }
        }

        log::info!(
            "loaded {} images and {} sounds",
            images.len(),
            sounds.len()
        );
        Ok(ShooterAssets {
            spaceship: images[0],
            enemy: images[1],
            explosion: images[2],
            explode: sounds[0],
            hit_hurt: sounds[1],
            laser: sounds[2],
            music: sounds[3],
        })
    }

    pub fn free<R, A>(self, renderer: &mut R, audio: &mut A)
    where
        R: Renderer + ?Sized,
        A: Audio + ?Sized,
    {
        for image in [self.spaceship, self.enemy, self.explosion] {
            renderer.free_image(image);
        }
        for sound in [self.explode, self.hit_hurt, self.laser, self.music] {
            audio.free_sound(sound);
        }
    }

    /// The cue played for a game event.
    pub fn sound_for(&self, event: ShooterEvent) -> SoundHandle {
        match event {
            ShooterEvent::Fired => self.laser,
            ShooterEvent::Exploded => self.explode,
            ShooterEvent::ShipHit => self.hit_hurt,
        }
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Shooter {
    config: ShooterConfig,
    screen: ScreenSize,
    pub ship: Ship,
    pub bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub explosions: Pool<Explosion>,
    pub score: u32,
    pub state: GameState,
    /// Ticks spent in play since the program started.
    pub frame: u64,
    fire_cooldown: u32,
    events: Vec<ShooterEvent>,
}

impl Shooter {
    pub fn new(config: ShooterConfig, screen: ScreenSize) -> Self {
        Shooter {
            ship: spawn_ship(&config, screen),
            bullets: Pool::new(config.bullet.capacity, config.bullet.policy),
            enemies: Pool::new(config.enemy.capacity, config.enemy.policy),
            explosions: Pool::new(config.explosion.capacity, config.explosion.policy),
            score: 0,
            state: GameState::Menu,
            frame: 0,
            fire_cooldown: 0,
            events: Vec::new(),
            config,
            screen,
        }
    }

    /// Back to the menu with a fresh ship, lives and score. The pools are left
    /// alone; their stale slots stay inactive.
    pub fn reset(&mut self) {
        self.ship = spawn_ship(&self.config, self.screen);
        self.score = 0;
        self.fire_cooldown = 0;
        self.state = GameState::Menu;
    }

    /// Take the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<ShooterEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one tick of controller input.
    ///
    /// Start is edge-triggered, so holding it never re-triggers a transition.
    /// Directions move the ship every tick they are held; fire repeats while
    /// held, throttled by the configured cooldown.
    pub fn handle_input(&mut self, pad: &Pad) {
        if pad.pressed(Button::Start) {
            match self.state {
                GameState::Menu => {
                    self.state = self.state.on_start();
                    log::info!("game started");
                }
                GameState::GameOver => {
                    self.reset();
                    log::info!("back to menu");
                }
                GameState::Play => {}
            }
        }

        if self.state != GameState::Play {
            return;
        }

        let speed = self.config.ship_speed;
        let (mut dx, mut dy) = (0, 0);
        if pad.held(Button::Left) {
            dx -= speed;
        }
        if pad.held(Button::Right) {
            dx += speed;
        }
        if pad.held(Button::Up) {
            dy -= speed;
        }
        if pad.held(Button::Down) {
            dy += speed;
        }
        self.move_ship(dx, dy);

        if pad.held(Button::Cross) && self.fire_cooldown == 0 && self.fire() {
            self.fire_cooldown = self.config.fire_cooldown;
        }
    }

    /// Move the ship, keeping it fully on screen.
    pub fn move_ship(&mut self, dx: i32, dy: i32) {
        let max_x = (self.screen.width - self.config.ship_width).max(0);
        let max_y = (self.screen.height - self.config.ship_height).max(0);
        self.ship.x = (self.ship.x + dx).clamp(0, max_x);
        self.ship.y = (self.ship.y + dy).clamp(0, max_y);
    }

    /// Launch a bullet from the ship. Returns `false` if the bullet pool
    /// refused the allocation.
    pub fn fire(&mut self) -> bool {
        let bullet = Bullet {
            x: self.ship.x,
            y: self.ship.y,
        };
        match self.bullets.allocate(bullet) {
            Some(index) => {
                log::trace!("bullet {index} fired at ({}, {})", bullet.x, bullet.y);
                self.events.push(ShooterEvent::Fired);
                true
            }
            None => {
                log::debug!("bullet pool full, shot dropped");
                false
            }
        }
    }

    // ── Per-tick update ───────────────────────────────────────────────────────

    /// Advance the game by one tick. Does nothing outside of play.
    pub fn update(&mut self, rng: &mut impl Rng) {
        if self.state != GameState::Play {
            return;
        }
        self.frame += 1;
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        self.update_bullets();
        self.update_enemies();
        self.update_explosions();
        self.spawn_enemies(rng);
        self.check_bullet_collisions();
        self.check_ship_collisions();
    }

    pub fn update_bullets(&mut self) {
        let velocity = self.config.bullet.velocity;
        self.bullets.retain_active(|b| {
            b.y += velocity;
            b.y >= 0
        });
    }

    pub fn update_enemies(&mut self) {
        let velocity = self.config.enemy.velocity;
        let bottom = self.screen.height;
        self.enemies.retain_active(|e| {
            e.y += velocity;
            e.y <= bottom
        });
    }

    pub fn update_explosions(&mut self) {
        let frames = self.config.explosion.frames;
        self.explosions.retain_active(|boom| {
            boom.frame += 1;
            boom.frame <= frames
        });
    }

    fn spawn_enemies(&mut self, rng: &mut impl Rng) {
        let interval = self.config.enemy_spawn_interval;
        if interval == 0 || self.frame % interval != 0 {
            return;
        }
        self.spawn_enemy(rng);
    }

    /// Drop one enemy in at a random column along the top edge.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng) -> Option<usize> {
        let max_x = (self.screen.width - self.config.enemy.width).max(0);
        let x = rng.gen_range(0..=max_x);
        let index = self.enemies.allocate(Enemy { x, y: 0 });
        match index {
            Some(i) => log::debug!("enemy {i} spawned at x={x}"),
            None => log::debug!("enemy pool full, spawn skipped"),
        }
        index
    }

    /// Start an explosion at `(x, y)`. The explode cue is only queued if the
    /// explosion pool found a slot.
    pub fn trigger_explosion(&mut self, x: i32, y: i32) -> Option<usize> {
        let index = self.explosions.allocate(Explosion { x, y, frame: 0 });
        match index {
            Some(_) => self.events.push(ShooterEvent::Exploded),
            None => log::debug!("explosion pool full, effect dropped"),
        }
        index
    }

    /// Bullets against enemies. Each bullet takes out at most the first enemy
    /// it overlaps, in pool order.
    pub fn check_bullet_collisions(&mut self) {
        let bullet = self.config.bullet;
        let enemy = self.config.enemy;

        for bi in 0..self.bullets.capacity() {
            let Some(shot) = self.bullets.get(bi).copied() else {
                continue;
            };
            let probe = shot.bounds(bullet.width, bullet.height);
            let targets = self
                .enemies
                .iter_active()
                .map(|(i, e)| (i, e.bounds(enemy.width, enemy.height)));
            let Some(ei) = first_hit(&probe, targets) else {
                continue;
            };
            let Some(target) = self.enemies.get(ei).copied() else {
                continue;
            };

            self.bullets.release(bi);
            self.enemies.release(ei);
            self.score += self.config.reward;
            self.trigger_explosion(target.x, target.y);
        }
    }

    /// Enemies that reach the ship cost a life each.
    pub fn check_ship_collisions(&mut self) {
        let enemy = self.config.enemy;
        let hull = self
            .ship
            .bounds(self.config.ship_width, self.config.ship_height);
        let rammed: Vec<(usize, Enemy)> = self
            .enemies
            .iter_active()
            .filter(|(_, e)| e.bounds(enemy.width, enemy.height).intersects(&hull))
            .map(|(i, e)| (i, *e))
            .collect();

        for (index, target) in rammed {
            if self.state != GameState::Play {
                break;
            }
            self.enemies.release(index);
            self.trigger_explosion(target.x, target.y);
            self.ship.lives = self.ship.lives.saturating_sub(1);
            self.events.push(ShooterEvent::ShipHit);
            if self.ship.lives == 0 {
                self.state = GameState::GameOver;
                log::info!("game over with score {}", self.score);
            }
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    /// Queue the current frame on `renderer`. Presenting is left to the caller.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R, assets: &ShooterAssets) {
        renderer.set_background(Rgb::BLACK);
        let (cx, cy) = (self.screen.width / 2, self.screen.height / 2);
        match self.state {
            GameState::Menu => {
                renderer.draw_text("Space Shooter", cx - 50, cy - 20, Rgb::WHITE);
                renderer.draw_text("Press Start to Play", cx - 70, cy + 10, Rgb::WHITE);
            }
            GameState::Play => self.draw_play(renderer, assets),
            GameState::GameOver => {
                renderer.draw_text("Game Over", cx - 50, cy - 20, Rgb::RED);
                renderer.draw_text("Press Start to Retry", cx - 70, cy + 10, Rgb::WHITE);
            }
        }
    }

    fn draw_play<R: Renderer + ?Sized>(&self, renderer: &mut R, assets: &ShooterAssets) {
        let bullet = self.config.bullet;

        renderer.draw_image(assets.spaceship, self.ship.x, self.ship.y);
        self.bullets.for_each_active(|_, b| {
            renderer.fill_rect(b.bounds(bullet.width, bullet.height), Rgb::YELLOW);
        });
        self.enemies.for_each_active(|_, e| {
            renderer.draw_image(assets.enemy, e.x, e.y);
        });
        self.explosions.for_each_active(|_, boom| {
            renderer.draw_image(assets.explosion, boom.x, boom.y);
        });

        renderer.draw_text(&format!("Score: {}", self.score), 10, 10, Rgb::WHITE);
        renderer.draw_text(&format!("Lives: {}", self.ship.lives), 10, 30, Rgb::WHITE);
    }
}

fn spawn_ship(config: &ShooterConfig, screen: ScreenSize) -> Ship {
    Ship {
        x: screen.width / 2,
        y: screen.height - config.ship_start_offset,
        lives: config.lives,
    }
}

/// Play the cue for every queued event.
pub fn play_events<A: Audio + ?Sized>(
    audio: &mut A,
    assets: &ShooterAssets,
    events: impl IntoIterator<Item = ShooterEvent>,
) {
    for event in events {
        log::debug!("event {event:?}");
        audio.play(assets.sound_for(event));
    }
}
