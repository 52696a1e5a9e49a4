use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Default log file: `$XDG_STATE_HOME/jot/jot.log`, falling back to
/// `~/.local/state/jot/jot.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("state")))
        .map(|d| d.join("jot").join("jot.log"))
}

/// Send tracing output to a file so it never draws over the TUI.
///
/// The filter comes from `JOT_LOG` (default `warn`). With no usable path,
/// logging is left uninstalled.
pub fn init_logging(explicit: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env("JOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed (tests); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .try_init();
    Ok(())
}
