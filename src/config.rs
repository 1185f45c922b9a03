/// Demo tunables. Defaults reproduce the console build; a JSON file can
/// override any subset of them.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::pool::SaturationPolicy;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "PSX_DEMOS_CONFIG";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStandard {
    Ntsc,
    Pal,
}

impl VideoStandard {
    /// Display refresh rate; every velocity is expressed per one of these ticks.
    pub fn tick_rate(self) -> u32 {
        match self {
            VideoStandard::Ntsc => 60,
            VideoStandard::Pal => 50,
        }
    }

    pub fn tick_duration(self) -> Duration {
        Duration::from_secs(1) / self.tick_rate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

/// Size, speed and pool capacity for one pooled entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindConfig {
    pub capacity: usize,
    pub width: i32,
    pub height: i32,
    /// Vertical pixels per tick (negative = up).
    pub velocity: i32,
    pub policy: SaturationPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionConfig {
    pub capacity: usize,
    /// An explosion is released once its frame counter passes this value.
    pub frames: u32,
    pub policy: SaturationPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub ship_speed: i32,
    pub ship_width: i32,
    pub ship_height: i32,
    /// Distance from the bottom edge to the ship's start row.
    pub ship_start_offset: i32,
    pub lives: u32,
    pub reward: u32,
    /// Minimum ticks between two shots while fire is held.
    pub fire_cooldown: u32,
    /// Ticks between enemy spawns; 0 disables spawning.
    pub enemy_spawn_interval: u64,
    pub bullet: KindConfig,
    pub enemy: KindConfig,
    pub explosion: ExplosionConfig,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        ShooterConfig {
            ship_speed: 4,
            ship_width: 32,
            ship_height: 32,
            ship_start_offset: 50,
            lives: 3,
            reward: 10,
            fire_cooldown: 4,
            enemy_spawn_interval: 45,
            bullet: KindConfig {
                capacity: 90,
                width: 5,
                height: 10,
                velocity: -5,
                policy: SaturationPolicy::Reject,
            },
            enemy: KindConfig {
                capacity: 5,
                width: 32,
                height: 32,
                velocity: 2,
                policy: SaturationPolicy::Recycle,
            },
            explosion: ExplosionConfig {
                capacity: 90,
                frames: 5,
                policy: SaturationPolicy::Recycle,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    /// Distance of the boundary lines from the top and bottom edges.
    pub border: i32,
    /// Distance of each bat from its side of the screen.
    pub bat_inset: i32,
    pub bat_width: i32,
    pub bat_height: i32,
    pub bat_speed: i32,
    pub ball_size: i32,
    pub ball_speed_x: i32,
    pub ball_speed_y: i32,
}

impl Default for PongConfig {
    fn default() -> Self {
        PongConfig {
            border: 20,
            bat_inset: 20,
            bat_width: 4,
            bat_height: 32,
            bat_speed: 2,
            ball_size: 3,
            ball_speed_x: 2,
            ball_speed_y: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub video: VideoStandard,
    pub screen: ScreenSize,
    /// Upper bound on simulation ticks run to catch up after a slow frame.
    pub max_catch_up: u32,
    pub shooter: ShooterConfig,
    pub pong: PongConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            video: VideoStandard::Ntsc,
            screen: ScreenSize {
                width: 320,
                height: 240,
            },
            max_catch_up: 4,
            shooter: ShooterConfig::default(),
            pong: PongConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Parse a JSON document laid over the defaults. Any field left out, at
    /// any depth, keeps its default value.
    pub fn from_json(path: &str, json: &str) -> Result<Self, ConfigError> {
        let parse_error = |e: serde_json::Error| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        };
        let overrides: Value = serde_json::from_str(json).map_err(parse_error)?;
        let mut merged = serde_json::to_value(Self::default()).map_err(parse_error)?;
        merge(&mut merged, overrides);
        let config: DemoConfig = serde_json::from_value(merged).map_err(parse_error)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;
        Self::from_json(&display, &json)
    }

    /// Defaults, or the file named by `PSX_DEMOS_CONFIG` when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let config = Self::load(Path::new(&path))?;
                log::info!("loaded config from {}", Path::new(&path).display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        };
        if self.screen.width <= 0 || self.screen.height <= 0 {
            return invalid("screen", "dimensions must be positive");
        }
        if self.max_catch_up == 0 {
            return invalid("max_catch_up", "must be at least 1");
        }
        let shooter = &self.shooter;
        if shooter.bullet.capacity == 0 {
            return invalid("shooter.bullet.capacity", "must be non-zero");
        }
        if shooter.enemy.capacity == 0 {
            return invalid("shooter.enemy.capacity", "must be non-zero");
        }
        if shooter.explosion.capacity == 0 {
            return invalid("shooter.explosion.capacity", "must be non-zero");
        }
        if shooter.lives == 0 {
            return invalid("shooter.lives", "must be at least 1");
        }
        if self.pong.bat_height >= self.screen.height - 2 * self.pong.border {
            return invalid("pong.bat_height", "bat does not fit between the borders");
        }
        Ok(())
    }
}

/// Recursively lay `overrides` over `base`. Objects merge key by key; any
/// other value replaces what was there.
fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
