use std::process;

use anyhow::{Context, Result};

use psx_demos::config::DemoConfig;
use psx_demos::frontend::{run_shooter, Session};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = DemoConfig::from_env().context("failed to load config")?;
    // The session restores the terminal when dropped, before any error is printed.
    let session = Session::start().context("failed to set up terminal")?;
    run_shooter(&session, &config)
}
