//! File logging.
//!
//! The terminal belongs to the TUI, so records go to `klack.log` in the state
//! directory. The level is `info`, or `debug` when requested; `KLACK_LOG`
//! accepts any env_logger filter and takes precedence.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::app_dirs::AppDirs;

pub const LOG_ENV: &str = "KLACK_LOG";

/// Initialize logging to the default log path. Returns the file in use, if any.
pub fn init(debug: bool) -> Option<PathBuf> {
    let path = AppDirs::log_path()?;
    init_at(&path, debug).then_some(path)
}

/// Initialize logging into `path`. Failing to open the file leaves logging off.
pub fn init_at(path: &Path, debug: bool) -> bool {
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let default_level = if debug { "debug" } else { "info" };
    Builder::from_env(Env::new().filter_or(LOG_ENV, default_level))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .is_ok()
}
