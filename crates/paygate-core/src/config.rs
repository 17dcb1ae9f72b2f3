//! Configuration types for the paygate client.
//!
//! Configuration is stored in TOML format; every field has a default so an
//! absent section or file still yields a working configuration.
//!
//! # Default TOML Output
//!
//! ```toml
//! [auth]
//! cipher = "hmac"
//!
//! [registry]
//! url = "https://moja.tatrabanka.sk/e-commerce/ecdsa_keys.txt"
//! cache_file = "~/.paygate/ecdsa_keys.txt"
//! timeout_secs = 30
//! ```
//!
//! # Examples
//!
//! ```
//! use paygate_core::config::Config;
//! use paygate_core::types::CipherMode;
//!
//! let config = Config::default();
//! assert_eq!(config.auth.cipher, CipherMode::Hmac);
//! assert_eq!(config.registry.timeout_secs, 30);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::CipherMode;

/// Top-level configuration for the paygate client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Request-authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Bank key registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Request-authentication configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Cipher mode used when the caller does not select one explicitly.
    ///
    /// Default: `hmac`
    #[serde(default)]
    pub cipher: CipherMode,
}

/// Returns the default registry snapshot URL on the bank portal.
fn default_registry_url() -> String {
    "https://moja.tatrabanka.sk/e-commerce/ecdsa_keys.txt".to_string()
}

/// Returns the default local cache file path for the registry snapshot.
fn default_cache_file() -> String {
    "~/.paygate/ecdsa_keys.txt".to_string()
}

/// Returns the default snapshot download timeout in seconds.
const fn default_timeout() -> u64 {
    30
}

/// Bank key registry configuration.
///
/// The registry is a plain-text snapshot of all published signing keys,
/// downloaded from the bank portal and cached in a local file. The path
/// supports `~` expansion for the home directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryConfig {
    /// HTTPS URL of the full registry snapshot.
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Local cache file holding the last downloaded snapshot.
    ///
    /// Default: `~/.paygate/ecdsa_keys.txt`
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Snapshot download timeout in seconds.
    ///
    /// Default: 30 seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            cache_file: default_cache_file(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FileNotFound`] if the file does not exist
    /// - [`ConfigError::ReadFailed`] for any other I/O failure
    /// - [`ConfigError::ParseFailed`] if the contents are not valid TOML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::file_not_found(path.display().to_string())
            } else {
                ConfigError::read_failed(format!("{}: {e}", path.display()))
            }
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseFailed`] if the string is not valid TOML
    /// or contains unknown values.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::parse_failed(e.to_string()))
    }

    /// Render the default configuration as a TOML document.
    #[must_use]
    pub fn default_toml() -> String {
        // Serializing the plain default struct cannot fail.
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }

    /// The registry cache file path with `~` expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] if the path starts with `~/`
    /// and the home directory cannot be determined.
    pub fn cache_file_path(&self) -> Result<PathBuf, ConfigError> {
        expand_tilde(&self.registry.cache_file)
    }

    /// The snapshot download timeout as a [`Duration`].
    #[must_use]
    pub const fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs)
    }
}

/// Expand a leading `~/` to the user's home directory.
///
/// Paths without the prefix are returned unchanged.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the home directory cannot be
/// determined.
pub fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.auth.cipher, CipherMode::Hmac);
        assert_eq!(
            config.registry.url,
            "https://moja.tatrabanka.sk/e-commerce/ecdsa_keys.txt"
        );
        assert_eq!(config.registry.cache_file, "~/.paygate/ecdsa_keys.txt");
        assert_eq!(config.registry.timeout_secs, 30);
        assert_eq!(config.download_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_toml_round_trips() {
        let rendered = Config::default_toml();
        let parsed = Config::from_toml_str(&rendered).expect("default TOML should parse");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml_str(
            r#"
            [auth]
            cipher = "des"
            "#,
        )
        .expect("partial TOML should parse");

        assert_eq!(config.auth.cipher, CipherMode::Des);
        // unspecified sections fall back to defaults
        assert_eq!(config.registry, RegistryConfig::default());
    }

    #[test]
    fn test_unknown_cipher_value_fails() {
        let result = Config::from_toml_str(
            r#"
            [auth]
            cipher = "rot13"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ParseFailed { .. })));
    }

    #[test]
    fn test_invalid_toml_fails() {
        let result = Config::from_toml_str("auth = ");
        assert!(matches!(result, Err(ConfigError::ParseFailed { .. })));
    }

    #[test]
    fn test_load_missing_file_returns_not_found() {
        let temp = tempfile::tempdir().expect("temp dir");
        let result = Config::load(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [registry]
            url = "https://bank.example/keys.txt"
            cache_file = "/var/cache/paygate/keys.txt"
            timeout_secs = 5
            "#,
        )
        .expect("write config");

        let config = Config::load(&path).expect("load config");
        assert_eq!(config.registry.url, "https://bank.example/keys.txt");
        assert_eq!(config.registry.timeout_secs, 5);
        assert_eq!(
            config.cache_file_path().expect("absolute path needs no home"),
            PathBuf::from("/var/cache/paygate/keys.txt")
        );
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let path = expand_tilde("/tmp/keys.txt").expect("no expansion needed");
        assert_eq!(path, PathBuf::from("/tmp/keys.txt"));
    }

    #[test]
    fn test_expand_tilde_relative_path_unchanged() {
        let path = expand_tilde("cache/keys.txt").expect("no expansion needed");
        assert_eq!(path, PathBuf::from("cache/keys.txt"));
    }

    #[test]
    fn test_expand_tilde_prefixed_path() {
        // only meaningful where a home directory exists, which is the case in CI
        if let Some(home) = dirs::home_dir() {
            let path = expand_tilde("~/.paygate/ecdsa_keys.txt").expect("home dir available");
            assert_eq!(path, home.join(".paygate/ecdsa_keys.txt"));
        }
    }
}
