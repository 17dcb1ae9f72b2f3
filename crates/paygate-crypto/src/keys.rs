//! Shared-secret key material for the authentication codec.
//!
//! The bank issues merchants a shared secret either as raw text or as a hex
//! string. Which form was issued is not signalled anywhere in the protocol;
//! it is inferred from the length at the point of use:
//!
//! - AES-256: exactly 64 hex characters decode to 32 key bytes, anything
//!   else is taken as raw UTF-8 bytes
//! - HMAC-SHA256: exactly 128 hex characters decode to 64 key bytes,
//!   anything else is taken as raw UTF-8 bytes
//! - DES: always raw UTF-8 bytes (legacy secrets predate hex issuance)
//!
//! # Security
//!
//! Key material never appears in debug output and is zeroized on drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

use paygate_core::error::CodecError;

/// Byte length of single-DES key material.
pub const DES_KEY_LEN: usize = 8;

/// Byte length of AES-256 key material.
pub const AES256_KEY_LEN: usize = 32;

/// Character length at which an AES-256 secret is treated as hex-encoded.
const AES256_HEX_LEN: usize = 2 * AES256_KEY_LEN;

/// Character length at which an HMAC secret is treated as hex-encoded.
const HMAC_HEX_LEN: usize = 128;

/// A merchant's shared secret, as issued by the bank.
///
/// The secret is kept in its issued textual form; the per-cipher accessors
/// apply the length-based encoding inference described in the module docs.
///
/// # Example
///
/// ```
/// use paygate_crypto::keys::SecretKey;
///
/// let key = SecretKey::new("mYSecretKey123");
/// assert_eq!(key.len(), 14);
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    text: String,
}

impl SecretKey {
    /// Wrap a secret as issued by the bank.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Length of the secret in its issued textual form, in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Key material for the single-DES mode.
    ///
    /// DES secrets are always raw text and must be exactly 8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKeyEncoding`] for any other length.
    pub(crate) fn des_material(&self) -> Result<[u8; DES_KEY_LEN], CodecError> {
        self.text.as_bytes().try_into().map_err(|_| {
            CodecError::invalid_key_encoding(
                "DES",
                format!("need exactly {DES_KEY_LEN} bytes, got {}", self.text.len()),
            )
        })
    }

    /// Key material for the AES-256 mode.
    ///
    /// A 64-character hex secret decodes to its 32 raw bytes; any other
    /// secret is used as raw UTF-8 bytes and must be exactly 32 bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKeyEncoding`] if the resulting material
    /// is not exactly 32 bytes.
    pub(crate) fn aes_material(&self) -> Result<[u8; AES256_KEY_LEN], CodecError> {
        let bytes = self.decoded(AES256_HEX_LEN);
        let len = bytes.len();
        <[u8; AES256_KEY_LEN]>::try_from(bytes).map_err(|_| {
            CodecError::invalid_key_encoding(
                "AES256",
                format!("need exactly {AES256_KEY_LEN} bytes, got {len}"),
            )
        })
    }

    /// Key material for the HMAC-SHA256 mode.
    ///
    /// A 128-character hex secret decodes to its 64 raw bytes; any other
    /// secret is used as raw UTF-8 bytes. HMAC accepts any key length.
    pub(crate) fn hmac_material(&self) -> Vec<u8> {
        self.decoded(HMAC_HEX_LEN)
    }

    /// Hex-decode the secret when it is exactly `hex_len` hex characters,
    /// otherwise return its raw UTF-8 bytes.
    fn decoded(&self, hex_len: usize) -> Vec<u8> {
        if self.text.len() == hex_len && is_hex(&self.text) {
            // cannot fail after the is_hex check, but stay panic-free
            if let Ok(bytes) = hex::decode(&self.text) {
                return bytes;
            }
        }
        self.text.as_bytes().to_vec()
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl From<&str> for SecretKey {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SecretKey {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

// Prevent accidental debug printing of secrets
impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}
