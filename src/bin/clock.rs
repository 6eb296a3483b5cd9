//! Wosea.Clock - Overlay Process
//!
//! This process manages:
//! - The always-on-top clock window
//! - The tray icon and its context menu
//! - config.toml, loaded at startup and saved on exit
//!
//! Usage: wosea_clock [--config <path>]

#![windows_subsystem = "windows"]

use anyhow::{Context, Result};
use wosea_clock::config::ConfigStore;
use wosea_clock::overlay::Overlay;
use wosea_clock::{gui, screen, StartupFlags};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Wosea.Clock starting...");

    let flags = StartupFlags::parse(std::env::args().skip(1));
    tracing::info!("Startup flags: {:?}", flags);

    let store = ConfigStore::new(&flags.config_path);
    let overlay = Overlay::load(store, screen::primary_screen_size())
        .context("Failed to load configuration")?;

    gui::run(overlay)?;

    tracing::info!("Wosea.Clock exited");
    Ok(())
}
