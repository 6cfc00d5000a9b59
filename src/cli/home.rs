//! Application home resolution
//!
//! Priority:
//! 1. `--home <dir>` flag
//! 2. `$SCHEMASCRIBE_HOME`
//! 3. Platform config dir → `<config_dir>/schemascribe`
//! 4. `./.schemascribe`
//!
//! The directory is not required to exist; it is created on first write.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the home directory
pub const HOME_ENV: &str = "SCHEMASCRIBE_HOME";

const APP_DIR: &str = "schemascribe";
const FALLBACK_DIR: &str = ".schemascribe";

/// Resolve the home directory from the flag and the process environment
pub fn resolve_home(explicit: Option<PathBuf>) -> PathBuf {
    resolve_home_from(explicit, std::env::var_os(HOME_ENV), dirs::config_dir())
}

/// Resolution with every input passed in
pub fn resolve_home_from(
    explicit: Option<PathBuf>,
    env: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Some(home) = env.filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    match config_dir {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from(".").join(FALLBACK_DIR),
    }
}
