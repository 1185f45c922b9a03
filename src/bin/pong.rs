use std::process;

use anyhow::{Context, Result};

use psx_demos::config::DemoConfig;
use psx_demos::frontend::{run_demo, KeyBindings, Session};
use psx_demos::pong::Pong;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = DemoConfig::from_env().context("failed to load config")?;
    let session = Session::start().context("failed to set up terminal")?;
    let mut screen = session.screen(&config)?;
    let mut pong = Pong::new(config.pong, config.screen);
    run_demo(
        &mut pong,
        &session,
        &mut screen,
        &config,
        KeyBindings::two_players(),
    )
    .context("pong frame loop failed")?;
    log::info!("final score {}:{}", pong.score.left, pong.score.right);
    Ok(())
}
