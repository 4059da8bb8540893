//! Config file discovery and loading

use anyhow::{Context, Result};
use postlens_core::Config;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "POSTLENS_CONFIG";

/// `<config dir>/postlens/config.json`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("postlens").join("config.json"))
}

/// First config file that applies: the explicit path, then
/// `$POSTLENS_CONFIG`, then the default location if it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    default_config_path().filter(|p| p.exists())
}

/// Load and validate the config, falling back to defaults when no file applies
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let Some(path) = resolve_config_path(explicit) else {
        tracing::debug!("no config file, using defaults");
        return Ok(Config::default());
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config =
        Config::from_json(&raw).with_context(|| format!("Invalid config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use postlens_core::temporal::Period;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_path() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("postlens/config.json"));
        }
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("explicit.json");
        std::env::set_var(CONFIG_ENV, dir.path().join("env.json"));
        assert_eq!(resolve_config_path(Some(&explicit)), Some(explicit));
        std::env::remove_var(CONFIG_ENV);
    }

    #[test]
    #[serial]
    fn test_env_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.json");
        std::fs::write(&path, r#"{"period": "month", "top_terms": 10}"#).unwrap();

        std::env::set_var(CONFIG_ENV, &path);
        let config = load_config(None);
        std::env::remove_var(CONFIG_ENV);

        let config = config.unwrap();
        assert_eq!(config.period, Period::Month);
        assert_eq!(config.top_terms, 10);
        assert_eq!(config.min_text_length, 50);
    }

    #[test]
    #[serial]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"period": "yearly"}"#).unwrap();
        assert!(load_config(Some(&path)).is_err());
        assert!(load_config(Some(&dir.path().join("absent.json"))).is_err());
    }
}
