//! Launcher: update check, user notification, then hand-off to the clock.
//!
//! The clock binary is looked up next to the launcher executable first, then
//! in the working directory, and replaces the launcher process.

use crate::updater::{UpdateError, Updater, Version};
use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[cfg(windows)]
pub const CLOCK_EXE: &str = "wosea_clock.exe";
#[cfg(not(windows))]
pub const CLOCK_EXE: &str = "wosea_clock";

const DIALOG_TITLE: &str = "Wosea Updater";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0} not found. Make sure it's in the same directory as the launcher.")]
    NotFound(&'static str),
    #[error("Failed to start {}: {source}", .path.display())]
    Exec {
        path: PathBuf,
        source: io::Error,
    },
}

/// Result of the update step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    UpToDate,
    Updated(Version),
    Failed(Version),
}

/// Blocking user notifications shown by the launcher
pub trait Notifier {
    fn update_found(&self, version: &Version);
    fn update_failed(&self, version: &Version, error: &UpdateError);
}

/// Native message boxes
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogNotifier;

impl DialogNotifier {
    fn show(level: rfd::MessageLevel, description: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(level)
            .set_title(DIALOG_TITLE)
            .set_description(description)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

impl Notifier for DialogNotifier {
    fn update_found(&self, version: &Version) {
        DialogNotifier::show(
            rfd::MessageLevel::Info,
            &format!("检查到新版本 {},即将进行更新.", version),
        );
    }

    fn update_failed(&self, version: &Version, error: &UpdateError) {
        tracing::error!("Update to {} failed: {}", version, error);
        DialogNotifier::show(rfd::MessageLevel::Error, "更新失败,请联系开发者.");
    }
}

/// Check for a newer version, tell the user, and try to apply it
pub fn run_update_sequence(
    updater: &dyn Updater,
    notifier: &dyn Notifier,
    current: Version,
) -> UpdateOutcome {
    let Some(version) = updater.check_for_update() else {
        tracing::info!("No update available, running {}", current);
        return UpdateOutcome::UpToDate;
    };

    if !version.newer_than(&current) {
        tracing::info!("Offered {} is not newer than {}, skipping", version, current);
        return UpdateOutcome::UpToDate;
    }

    tracing::info!("Update available: {} -> {}", current, version);
    notifier.update_found(&version);

    match updater.update(&version) {
        Ok(()) => {
            tracing::info!("Updated to {}", version);
            UpdateOutcome::Updated(version)
        }
        Err(e) => {
            notifier.update_failed(&version, &e);
            UpdateOutcome::Failed(version)
        }
    }
}

/// Return the first directory in `dirs` that contains the clock binary
pub fn find_clock_exe_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(CLOCK_EXE))
        .find(|path| path.exists())
}

/// Locate the clock binary next to the launcher or in the working directory
pub fn find_clock_exe() -> Result<PathBuf, LaunchError> {
    let mut dirs = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    find_clock_exe_in(&dirs).ok_or(LaunchError::NotFound(CLOCK_EXE))
}

/// Replace the current process with the clock. Only returns on failure.
#[cfg(unix)]
pub fn relaunch(path: &Path) -> Result<Infallible, LaunchError> {
    use std::os::unix::process::CommandExt;

    tracing::info!("Exec {}", path.display());
    let source = Command::new(path).exec();
    Err(LaunchError::Exec {
        path: path.to_path_buf(),
        source,
    })
}

/// Start the clock and exit. Only returns on failure.
#[cfg(not(unix))]
pub fn relaunch(path: &Path) -> Result<Infallible, LaunchError> {
    tracing::info!("Spawning {}", path.display());
    Command::new(path)
        .spawn()
        .map_err(|source| LaunchError::Exec {
            path: path.to_path_buf(),
            source,
        })?;
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct FakeUpdater {
        offered: Option<Version>,
        succeeds: bool,
        applied: RefCell<Vec<Version>>,
    }

    impl Updater for FakeUpdater {
        fn check_for_update(&self) -> Option<Version> {
            self.offered
        }

        fn update(&self, version: &Version) -> Result<(), UpdateError> {
            self.applied.borrow_mut().push(*version);
            if self.succeeds {
                Ok(())
            } else {
                Err(UpdateError::Unsupported)
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn update_found(&self, version: &Version) {
            self.events.borrow_mut().push(format!("found {}", version));
        }

        fn update_failed(&self, version: &Version, _error: &UpdateError) {
            self.events.borrow_mut().push(format!("failed {}", version));
        }
    }

    fn updater(offered: Option<Version>, succeeds: bool) -> FakeUpdater {
        FakeUpdater {
            offered,
            succeeds,
            applied: RefCell::new(Vec::new()),
        }
    }

    const CURRENT: Version = Version { major: 1, minor: 0, patch: 0 };

    #[test]
    fn test_up_to_date() {
        let updater = updater(None, true);
        let notifier = RecordingNotifier::default();
        assert_eq!(
            run_update_sequence(&updater, &notifier, CURRENT),
            UpdateOutcome::UpToDate
        );
        assert!(notifier.events.borrow().is_empty());
    }

    #[test]
    fn test_older_offer_is_ignored() {
        let updater = updater(Some(Version::new(0, 9, 0)), true);
        let notifier = RecordingNotifier::default();
        assert_eq!(
            run_update_sequence(&updater, &notifier, CURRENT),
            UpdateOutcome::UpToDate
        );
        assert!(updater.applied.borrow().is_empty());
    }

    #[test]
    fn test_successful_update() {
        let next = Version::new(1, 1, 0);
        let updater = updater(Some(next), true);
        let notifier = RecordingNotifier::default();
        assert_eq!(
            run_update_sequence(&updater, &notifier, CURRENT),
            UpdateOutcome::Updated(next)
        );
        assert_eq!(*notifier.events.borrow(), vec!["found 1.1.0".to_string()]);
    }

    #[test]
    fn test_failed_update_notifies() {
        let next = Version::new(2, 0, 0);
        let updater = updater(Some(next), false);
        let notifier = RecordingNotifier::default();
        assert_eq!(
            run_update_sequence(&updater, &notifier, CURRENT),
            UpdateOutcome::Failed(next)
        );
        assert_eq!(
            *notifier.events.borrow(),
            vec!["found 2.0.0".to_string(), "failed 2.0.0".to_string()]
        );
    }

    #[test]
    fn test_find_clock_exe_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join(CLOCK_EXE), b"").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(find_clock_exe_in(&dirs), Some(second.path().join(CLOCK_EXE)));

        std::fs::write(first.path().join(CLOCK_EXE), b"").unwrap();
        assert_eq!(find_clock_exe_in(&dirs), Some(first.path().join(CLOCK_EXE)));

        assert_eq!(find_clock_exe_in(&[]), None);
    }
}
