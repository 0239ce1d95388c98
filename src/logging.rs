use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SRMON_LOG";

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("srmon").join("srmon.log"))
}

/// Installs the global subscriber writing to `path`. Stdout belongs to the
/// terminal UI, so log lines never go there.
///
/// The filter comes from `level`, then `SRMON_LOG`, then `info`.
pub fn init(path: &Path, level: Option<&str>) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::create(path).wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}
