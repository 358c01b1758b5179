//! Configuration loading and database path resolution

use crate::Result;
use std::path::{Path, PathBuf};

/// Database path resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SHOWBILL_DATABASE` environment variable
/// 3. `database_path` key in the TOML config file
/// 4. Platform data directory default (fallback)
pub fn resolve_database_path(cli_arg: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("SHOWBILL_DATABASE") {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Some(path) = database_path_from_config_file() {
        return Ok(path);
    }

    // Priority 4: Platform default
    Ok(default_database_path())
}

/// Read `database_path` from `<config-dir>/showbill/config.toml` if present
fn database_path_from_config_file() -> Option<PathBuf> {
    let config_path = dirs::config_dir()?.join("showbill").join("config.toml");
    let contents = std::fs::read_to_string(config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&contents).ok()?;
    config
        .get("database_path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// Default database location under the platform data directory
fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("showbill")
        .join("showbill.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let path = resolve_database_path(Some(Path::new("/tmp/override.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/override.db"));
    }

    #[test]
    fn default_ends_with_database_name() {
        let path = default_database_path();
        assert!(path.ends_with("showbill/showbill.db"));
    }
}
