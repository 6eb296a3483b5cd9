//! Wosea Clock Library
//!
//! Shared functionality for the Clock and Launcher processes
//!
//! Architecture:
//! - Clock process owns the overlay window, tray icon and config file
//! - Launcher checks for updates and then hands over to the Clock
//! - All overlay state changes go through `overlay::Overlay`, independent
//!   of the GUI toolkit (gui, tray modules)

pub mod clock;
pub mod config;
pub mod drag;
pub mod exam;
pub mod geometry;
pub mod gui;
pub mod launcher;
pub mod layout;
pub mod overlay;
pub mod palette;
pub mod placement;
pub mod screen;
pub mod tray;
pub mod updater;

use std::path::PathBuf;

/// Startup flags parsed from command line (used by Clock)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupFlags {
    /// Configuration file to load and save (`--config <path>`)
    pub config_path: PathBuf,
}

impl Default for StartupFlags {
    fn default() -> Self {
        StartupFlags {
            config_path: PathBuf::from(config::DEFAULT_CONFIG_FILE),
        }
    }
}

impl StartupFlags {
    /// Parse flags from arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut flags = StartupFlags::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => match args.next() {
                    Some(path) => flags.config_path = PathBuf::from(path),
                    None => tracing::warn!("--config needs a path, using default"),
                },
                other => tracing::warn!("Ignoring unknown argument: {}", other),
            }
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let flags = StartupFlags::parse(Vec::<String>::new());
        assert_eq!(flags.config_path, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_config_flag() {
        let flags = StartupFlags::parse(["--verbose", "--config", "/tmp/clock.toml"]);
        assert_eq!(flags.config_path, PathBuf::from("/tmp/clock.toml"));

        let flags = StartupFlags::parse(["--config"]);
        assert_eq!(flags, StartupFlags::default());
    }
}
