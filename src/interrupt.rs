//! Ctrl-C cleanup of in-flight stage output.
//!
//! A stage registers the artifacts it is about to write; if the user
//! interrupts the run mid-write, the handler deletes them so the next
//! run's skip-if-exists check never trusts a partial artifact.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

static IN_FLIGHT: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

/// Install the interrupt handler. Call once at startup.
///
/// # Errors
///
/// Fails when a handler is already installed for this process.
pub fn install_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!();
        eprintln!("interrupted, cleaning up...");
        cleanup_in_flight();
        std::process::exit(1);
    })?;
    Ok(())
}

/// Remove every registered in-flight artifact from disk.
fn cleanup_in_flight() {
    let paths = IN_FLIGHT
        .lock()
        .map_or_else(|e| e.into_inner().clone(), |g| g.clone());
    for path in paths {
        remove_path(&path);
    }
}

fn remove_path(path: &Path) {
    if path.is_dir() {
        let _ = std::fs::remove_dir_all(path);
    } else {
        let _ = std::fs::remove_file(path);
    }
}

/// Registration of a stage's in-flight outputs; deregisters on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    count: usize,
}

impl InFlightGuard {
    /// Register `paths` as in-flight until the guard is dropped.
    #[must_use]
    pub fn register(paths: &[PathBuf]) -> Self {
        if let Ok(mut guard) = IN_FLIGHT.lock() {
            guard.extend_from_slice(paths);
            Self { count: paths.len() }
        } else {
            Self { count: 0 }
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut guard) = IN_FLIGHT.lock() {
            let remaining = guard.len().saturating_sub(self.count);
            guard.truncate(remaining);
        }
    }
}
