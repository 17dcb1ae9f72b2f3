//! Error types for the paygate client.
//!
//! Failure modes are organized by domain:
//!
//! - [`CodecError`] - request authentication failures
//! - [`VerifyError`] - signed-response verification failures
//! - [`RegistryError`] - bank key registry failures
//! - [`ConfigError`] - configuration failures
//! - [`GatewayError`] - top-level error that wraps all error types
//!
//! An unknown key ID is deliberately *not* an error anywhere in this
//! taxonomy: registry lookups resolve it as an empty result so that callers
//! can distinguish "could not check" from "checked, does not exist".
//!
//! # Example
//!
//! ```rust
//! use paygate_core::error::{CodecError, GatewayError};
//!
//! fn select_mode(mode: &str) -> Result<(), GatewayError> {
//!     if mode != "HMAC" {
//!         return Err(CodecError::unsupported_mode(mode).into());
//!     }
//!     Ok(())
//! }
//! ```

/// Top-level error type for the paygate client.
///
/// Wraps all domain-specific error types with automatic conversion via the
/// `#[from]` attribute.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request authentication failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Response signature verification failed structurally.
    #[error("verification error: {0}")]
    Verify(#[from] VerifyError),

    /// Key registry lookup or refresh failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

// ============================================================================
// CodecError
// ============================================================================

/// Errors that can occur while computing a request authenticator.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The decoded secret key does not fit the selected cipher.
    #[error("invalid key encoding for {cipher}: {detail}")]
    InvalidKeyEncoding {
        /// The cipher the key was prepared for (e.g. "DES", "AES256").
        cipher: String,
        /// What was wrong with the decoded material.
        detail: String,
    },

    /// The requested cipher mode is not one of the protocol's fixed set.
    ///
    /// The mode set is closed; an unrecognized spelling is rejected rather
    /// than silently falling back to the default.
    #[error("unsupported cipher mode: {mode}")]
    UnsupportedMode {
        /// The mode string that was requested.
        mode: String,
    },
}

impl CodecError {
    /// Create an `InvalidKeyEncoding` error.
    #[must_use]
    pub fn invalid_key_encoding(cipher: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidKeyEncoding {
            cipher: cipher.into(),
            detail: detail.into(),
        }
    }

    /// Create an `UnsupportedMode` error.
    #[must_use]
    pub fn unsupported_mode(mode: impl Into<String>) -> Self {
        Self::UnsupportedMode { mode: mode.into() }
    }
}

// ============================================================================
// VerifyError
// ============================================================================

/// Errors that can occur while verifying a signed bank response.
///
/// A signature that is well-formed but simply does not match is *not* an
/// error; verification returns `Ok(false)` for that case. These variants
/// cover structurally unusable inputs only.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The PEM public key could not be parsed.
    #[error("malformed public key")]
    MalformedPublicKey,

    /// The signature is not valid hex or not a valid DER ECDSA signature.
    #[error("malformed signature encoding")]
    MalformedSignature,
}

// ============================================================================
// RegistryError
// ============================================================================

/// Errors that can occur while resolving a bank public key.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry snapshot could not be downloaded.
    ///
    /// Covers transport failures, TLS failures, timeouts, and non-success
    /// HTTP statuses.
    #[error("registry unreachable: {context}")]
    Unreachable {
        /// What went wrong with the download.
        context: String,
    },

    /// A local cache file operation failed.
    ///
    /// A missing cache file is an ordinary cache miss, never this error;
    /// callers handle not-found before converting.
    #[error("registry cache file error: {0}")]
    File(#[source] std::io::Error),

    /// The snapshot contains the key ID but no usable PEM block after it.
    #[error("malformed registry entry for key id {key_id}")]
    MalformedEntry {
        /// The key ID whose entry could not be extracted.
        key_id: u32,
    },
}

impl RegistryError {
    /// Create an `Unreachable` error with context.
    #[must_use]
    pub fn unreachable(context: impl Into<String>) -> Self {
        Self::Unreachable {
            context: context.into(),
        }
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration: {context}")]
    ReadFailed {
        /// Context about the read failure.
        context: String,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {context}")]
    ParseFailed {
        /// Context about the parsing failure.
        context: String,
    },

    /// The home directory could not be determined for `~` expansion.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

impl ConfigError {
    /// Create a `FileNotFound` error.
    #[must_use]
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a `ReadFailed` error.
    #[must_use]
    pub fn read_failed(context: impl Into<String>) -> Self {
        Self::ReadFailed {
            context: context.into(),
        }
    }

    /// Create a `ParseFailed` error.
    #[must_use]
    pub fn parse_failed(context: impl Into<String>) -> Self {
        Self::ParseFailed {
            context: context.into(),
        }
    }
}

// ============================================================================
// Result type aliases
// ============================================================================

/// A `Result` type alias using [`GatewayError`] as the error type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// A `Result` type alias for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// A `Result` type alias for verification operations.
pub type VerifyResult<T> = std::result::Result<T, VerifyError>;

/// A `Result` type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// A `Result` type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_from_codec_error() {
        let err: GatewayError = CodecError::unsupported_mode("ROT13").into();

        assert!(matches!(
            err,
            GatewayError::Codec(CodecError::UnsupportedMode { .. })
        ));
        assert_eq!(err.to_string(), "codec error: unsupported cipher mode: ROT13");
    }

    #[test]
    fn test_gateway_error_from_verify_error() {
        let err: GatewayError = VerifyError::MalformedPublicKey.into();

        assert!(matches!(
            err,
            GatewayError::Verify(VerifyError::MalformedPublicKey)
        ));
        assert_eq!(err.to_string(), "verification error: malformed public key");
    }

    #[test]
    fn test_gateway_error_from_registry_error() {
        let err: GatewayError = RegistryError::unreachable("connection refused").into();

        assert!(matches!(
            err,
            GatewayError::Registry(RegistryError::Unreachable { .. })
        ));
        assert_eq!(
            err.to_string(),
            "registry error: registry unreachable: connection refused"
        );
    }

    #[test]
    fn test_gateway_error_from_config_error() {
        let err: GatewayError = ConfigError::file_not_found("/etc/paygate.toml").into();

        assert!(matches!(
            err,
            GatewayError::Config(ConfigError::FileNotFound { .. })
        ));
        assert_eq!(
            err.to_string(),
            "configuration error: configuration file not found: /etc/paygate.toml"
        );
    }

    #[test]
    fn test_codec_error_display() {
        assert_eq!(
            CodecError::invalid_key_encoding("DES", "need exactly 8 bytes, got 5").to_string(),
            "invalid key encoding for DES: need exactly 8 bytes, got 5"
        );
        assert_eq!(
            CodecError::unsupported_mode("3DES").to_string(),
            "unsupported cipher mode: 3DES"
        );
    }

    #[test]
    fn test_verify_error_display() {
        assert_eq!(
            VerifyError::MalformedPublicKey.to_string(),
            "malformed public key"
        );
        assert_eq!(
            VerifyError::MalformedSignature.to_string(),
            "malformed signature encoding"
        );
    }

    #[test]
    fn test_registry_error_display() {
        assert_eq!(
            RegistryError::unreachable("timed out").to_string(),
            "registry unreachable: timed out"
        );
        assert_eq!(
            RegistryError::MalformedEntry { key_id: 9 }.to_string(),
            "malformed registry entry for key id 9"
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(RegistryError::File(io)
            .to_string()
            .starts_with("registry cache file error"));
    }

    #[test]
    fn test_registry_file_error_source_chain() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RegistryError::File(io);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::file_not_found("/x/y.toml").to_string(),
            "configuration file not found: /x/y.toml"
        );
        assert_eq!(
            ConfigError::parse_failed("expected table").to_string(),
            "failed to parse configuration: expected table"
        );
        assert_eq!(
            ConfigError::NoHomeDirectory.to_string(),
            "could not determine home directory"
        );
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GatewayError>();
        assert_send_sync::<CodecError>();
        assert_send_sync::<VerifyError>();
        assert_send_sync::<RegistryError>();
        assert_send_sync::<ConfigError>();
    }
}
