use std::process;

use anyhow::{Context, Result};

use psx_demos::config::DemoConfig;
use psx_demos::frontend::{run_demo, KeyBindings, Session};
use psx_demos::loop_counter::LoopCounter;

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
    let mut counter = LoopCounter::new();
    run_demo(
        &mut counter,
        &session,
        &mut screen,
        &config,
        KeyBindings::one_player(),
    )
    .context("loop counter frame loop failed")?;
    log::info!("stopped after {} loops", counter.count);
    Ok(())
}
