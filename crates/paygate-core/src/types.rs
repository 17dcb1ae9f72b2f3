//! Shared protocol types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Request-authentication cipher modes fixed by the bank protocol.
///
/// The set is closed: the gateway speaks exactly these three modes and there
/// is no negotiation. When no mode is configured the gateway uses
/// [`CipherMode::Hmac`].
///
/// # Example
///
/// ```rust
/// use paygate_core::types::CipherMode;
///
/// assert_eq!(CipherMode::default(), CipherMode::Hmac);
/// assert_eq!("AES256".parse::<CipherMode>().unwrap(), CipherMode::Aes256);
/// assert!("3DES".parse::<CipherMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherMode {
    /// Legacy MAC: single-DES over the first 8 bytes of a SHA-1 digest.
    Des,
    /// AES-256 over the first 16 bytes of a SHA-1 digest, truncated hex.
    Aes256,
    /// HMAC-SHA256 over the full payload.
    #[default]
    Hmac,
}

impl CipherMode {
    /// The protocol spelling of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Des => "DES",
            Self::Aes256 => "AES256",
            Self::Hmac => "HMAC",
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DES" => Ok(Self::Des),
            "AES256" => Ok(Self::Aes256),
            "HMAC" => Ok(Self::Hmac),
            _ => Err(CodecError::unsupported_mode(s)),
        }
    }
}
