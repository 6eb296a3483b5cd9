//! Wosea.Launcher - Update Process
//!
//! Checks for a newer build, tells the user about it, tries to apply it,
//! then replaces itself with the Clock process.

#![windows_subsystem = "windows"]

use anyhow::{Context, Result};
use wosea_clock::launcher::{self, DialogNotifier};
use wosea_clock::updater::{StubUpdater, Version};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Wosea.Launcher starting...");

    let outcome = launcher::run_update_sequence(&StubUpdater, &DialogNotifier, Version::current());
    tracing::info!("Update check finished: {:?}", outcome);

    let clock_exe = launcher::find_clock_exe()?;
    let never = launcher::relaunch(&clock_exe).context("Failed to start the clock")?;
    match never {}
}
