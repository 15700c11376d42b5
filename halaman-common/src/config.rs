//! Configuration loading for halaman services.
//!
//! Provider credentials and the listen port resolve with ENV → TOML
//! priority; the environment always wins so deployments can override a
//! checked-in config file without editing it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// On-disk TOML configuration (`~/.config/halaman/config.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub trefle_token: Option<String>,
    pub tropicos_key: Option<String>,
    pub perenual_key: Option<String>,
    pub gnews_key: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub trefle_token: Option<String>,
    pub tropicos_key: Option<String>,
    pub perenual_key: Option<String>,
    pub gnews_key: Option<String>,
}

pub const DEFAULT_PORT: u16 = 5840;

impl Settings {
    /// Resolve settings from the environment and an optional TOML file.
    ///
    /// `config_path` overrides the default location; a missing default
    /// file is fine (all keys are optional), a missing explicit file is
    /// an error.
    pub fn resolve(config_path: Option<&Path>) -> Result<Settings> {
        let toml_config = match config_path {
            Some(path) => load_toml_config(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    load_toml_config(&path)?
                } else {
                    TomlConfig::default()
                }
            }
        };

        let port = std::env::var("HALAMAN_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        Ok(Settings {
            port,
            trefle_token: resolve_key("Trefle", "HALAMAN_TREFLE_TOKEN", &toml_config.trefle_token),
            tropicos_key: resolve_key(
                "Tropicos",
                "HALAMAN_TROPICOS_KEY",
                &toml_config.tropicos_key,
            ),
            perenual_key: resolve_key(
                "Perenual",
                "HALAMAN_PERENUAL_KEY",
                &toml_config.perenual_key,
            ),
            gnews_key: resolve_key("GNews", "HALAMAN_GNEWS_KEY", &toml_config.gnews_key),
        })
    }
}

/// Resolve one credential with ENV → TOML priority.
fn resolve_key(provider: &str, env_var: &str, toml_value: &Option<String>) -> Option<String> {
    let env_value = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_value = toml_value.as_ref().filter(|k| is_valid_key(k));

    if env_value.is_some() && toml_value.is_some() {
        warn!(
            "{} credential found in both {} and TOML config; using the environment",
            provider, env_var
        );
    }

    if let Some(key) = env_value {
        info!("{} credential loaded from environment", provider);
        return Some(key);
    }
    if let Some(key) = toml_value {
        info!("{} credential loaded from TOML config", provider);
        return Some(key.clone());
    }
    None
}

/// Validate a credential (non-empty, non-whitespace).
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Default configuration file path for the platform.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("halaman").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("halaman.toml"))
}

/// Read and parse a TOML config file.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn valid_key_rejects_whitespace() {
        assert!(is_valid_key("abc123"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }

    #[test]
    fn toml_config_parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 8080\ntrefle_token = \"t0k3n\"").unwrap();

        let config = load_toml_config(file.path()).unwrap();
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.trefle_token.as_deref(), Some("t0k3n"));
        assert!(config.tropicos_key.is_none());
    }

    #[test]
    fn toml_config_missing_file_errors() {
        let result = load_toml_config(Path::new("/nonexistent/halaman.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn resolve_key_prefers_valid_values() {
        // No env var set in tests; TOML value should win over nothing.
        assert_eq!(
            resolve_key("Test", "HALAMAN_TEST_KEY_UNSET", &Some("abc".into())),
            Some("abc".to_string())
        );
        assert_eq!(
            resolve_key("Test", "HALAMAN_TEST_KEY_UNSET", &Some("  ".into())),
            None
        );
    }
}
