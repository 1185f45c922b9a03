//! PlayStation-style homebrew demos: a space shooter, pong, a loop counter
//! and a movement sandbox, built on one fixed-capacity entity pool and AABB
//! collision core.

pub mod collision;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod frontend;
pub mod input;
pub mod loop_counter;
pub mod platform;
pub mod pong;
pub mod pool;
pub mod sandbox;
pub mod scheduler;
pub mod shooter;
