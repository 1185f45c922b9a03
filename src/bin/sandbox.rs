use std::process;

use anyhow::{Context, Result};

use psx_demos::config::DemoConfig;
use psx_demos::frontend::{run_sandbox, Session};

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
    run_sandbox(&session, &config)
}
