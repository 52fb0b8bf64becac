use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/formfill/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormfillConfig {
    /// Interval between periodic form scans, in milliseconds.
    pub scan_interval_ms: u64,
    /// Delay before the scan that follows a URL change, in milliseconds.
    pub navigation_delay_ms: u64,
    /// How long the "auto-fill this form?" prompt stays up, in milliseconds.
    pub prompt_timeout_ms: u64,
    /// Optional profile store location (None = `~/.local/share/formfill/profile.json`).
    pub profile_path: Option<PathBuf>,
}

impl Default for FormfillConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: 2000,
            navigation_delay_ms: 1000,
            prompt_timeout_ms: 10_000,
            profile_path: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("formfill")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FormfillConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FormfillConfig> {
    if !path.exists() {
        let default_cfg = FormfillConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: FormfillConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = FormfillConfig::default();
        assert_eq!(cfg.scan_interval_ms, 2000);
        assert_eq!(cfg.navigation_delay_ms, 1000);
        assert_eq!(cfg.prompt_timeout_ms, 10_000);
        assert!(cfg.profile_path.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = FormfillConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: FormfillConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_values() {
        let toml = r#"
            scan_interval_ms = 500
            profile_path = "/tmp/profile.json"
        "#;
        let cfg: FormfillConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.scan_interval_ms, 500);
        assert_eq!(cfg.navigation_delay_ms, 1000);
        assert_eq!(cfg.profile_path, Some(PathBuf::from("/tmp/profile.json")));
    }

    #[test]
    fn load_or_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formfill").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, FormfillConfig::default());
        assert!(path.exists());

        fs::write(&path, "prompt_timeout_ms = 3000\n").unwrap();
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.prompt_timeout_ms, 3000);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "scan_interval_ms = \"soon\"").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
