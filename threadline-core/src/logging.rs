//! Logger setup for host applications.
//!
//! The engine itself only uses the `log` facade. Hosts that do not install
//! their own logger can call [`init_logging`] (or [`init_file_logger`]) once
//! at startup.

use std::fs::File;
use std::path::{Path, PathBuf};

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::Config as ThreadlineConfig;

/// Default log file: `~/.config/threadline/threadline.log`.
pub fn default_log_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("threadline")
        .join("threadline.log")
}

/// Install a global file logger. Debug level when `verbose`, Warn otherwise.
///
/// Fails if the file cannot be created or a logger is already installed.
pub fn init_file_logger(path: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = File::create(path)?;

    WriteLogger::init(log_level, Config::default(), log_file)?;
    log::info!(target: "store", "logging to {}", path.display());
    Ok(())
}

/// Install the file logger described by `config`: `[runtime] log_file`
/// (default [`default_log_path`]) at the `verbose_logging` level.
pub fn init_logging(config: &ThreadlineConfig) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = config.log_path();
    init_file_logger(&path, config.verbose_logging())?;
    Ok(path)
}
