//! The authentication codec: three fixed request-MAC algorithms.
//!
//! The bank protocol derives a short authenticator from a request payload
//! and the merchant's shared secret. Three modes exist, selected by
//! [`CipherMode`]; their output conventions differ and must be reproduced
//! bit-for-bit, including case:
//!
//! | Mode   | Construction                                  | Output            |
//! |--------|-----------------------------------------------|-------------------|
//! | DES    | DES-ECB over first 8 bytes of SHA-1(payload)  | 16 hex, UPPERCASE |
//! | AES256 | AES-256-ECB over first 16 bytes of SHA-1      | 32 hex, UPPERCASE |
//! | HMAC   | HMAC-SHA256 over the full payload             | 64 hex, lowercase |
//!
//! The ECB modes encrypt exactly one cipher block (the truncated digest), so
//! no chaining, padding, or IV is involved.
//!
//! # Example
//!
//! ```
//! use paygate_core::types::CipherMode;
//! use paygate_crypto::codec::authenticate;
//! use paygate_crypto::keys::SecretKey;
//!
//! let key = SecretKey::new("Jefe");
//! let sig = authenticate("what do ya want for nothing?", &key, CipherMode::Hmac).unwrap();
//! assert_eq!(sig.len(), 64);
//! ```

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes256;
use des::Des;
use hmac::{Hmac, Mac};
use sha1::{Digest, Sha1};
use sha2::Sha256;

use paygate_core::error::CodecError;
use paygate_core::types::CipherMode;

use crate::keys::SecretKey;

type HmacSha256 = Hmac<Sha256>;

/// Hex length of a DES-mode authenticator.
pub const DES_AUTH_LEN: usize = 16;

/// Hex length of an AES-256-mode authenticator.
pub const AES256_AUTH_LEN: usize = 32;

/// Hex length of an HMAC-mode authenticator.
pub const HMAC_AUTH_LEN: usize = 64;

/// Compute the request authenticator for `plain_text`.
///
/// Deterministic: the same payload, secret, and mode always produce the same
/// string.
///
/// # Errors
///
/// Returns [`CodecError::InvalidKeyEncoding`] if the decoded secret does not
/// fit the selected cipher's key size.
pub fn authenticate(
    plain_text: &str,
    secret_key: &SecretKey,
    mode: CipherMode,
) -> Result<String, CodecError> {
    match mode {
        CipherMode::Des => des_authenticator(plain_text, secret_key),
        CipherMode::Aes256 => aes_authenticator(plain_text, secret_key),
        CipherMode::Hmac => hmac_authenticator(plain_text, secret_key),
    }
}

/// Legacy MAC: DES-ECB over the first 8 bytes of the payload's SHA-1 digest.
fn des_authenticator(plain_text: &str, secret_key: &SecretKey) -> Result<String, CodecError> {
    let key = secret_key.des_material()?;
    let digest = Sha1::digest(plain_text.as_bytes());

    // exactly one 8-byte block, so ECB degenerates to a single encryption
    let mut block = GenericArray::clone_from_slice(&digest[..8]);
    let cipher = Des::new_from_slice(&key)
        .map_err(|_| CodecError::invalid_key_encoding("DES", "cipher rejected key material"))?;
    cipher.encrypt_block(&mut block);

    let mut authenticator = hex::encode(block);
    authenticator.truncate(DES_AUTH_LEN);
    authenticator.make_ascii_uppercase();
    Ok(authenticator)
}

/// AES-256-ECB over the first 16 bytes of the payload's SHA-1 digest.
fn aes_authenticator(plain_text: &str, secret_key: &SecretKey) -> Result<String, CodecError> {
    let key = secret_key.aes_material()?;
    let digest = Sha1::digest(plain_text.as_bytes());

    let mut block = GenericArray::clone_from_slice(&digest[..16]);
    let cipher = Aes256::new_from_slice(&key)
        .map_err(|_| CodecError::invalid_key_encoding("AES256", "cipher rejected key material"))?;
    cipher.encrypt_block(&mut block);

    let mut authenticator = hex::encode(block);
    authenticator.truncate(AES256_AUTH_LEN);
    authenticator.make_ascii_uppercase();
    Ok(authenticator)
}

/// HMAC-SHA256 over the full payload, full lowercase digest.
fn hmac_authenticator(plain_text: &str, secret_key: &SecretKey) -> Result<String, CodecError> {
    let key = secret_key.hmac_material();
    let mut mac = <HmacSha256 as Mac>::new_from_slice(&key)
        .map_err(|_| CodecError::invalid_key_encoding("HMAC", "mac rejected key material"))?;
    mac.update(plain_text.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::unwrap_used)]

    use super::*;

    const DES_KEY: &str = "12345678";
    const AES_KEY: &str = "0123456789abcdef0123456789abcdef";

    fn auth(plain: &str, key: &str, mode: CipherMode) -> Result<String, CodecError> {
        authenticate(plain, &SecretKey::new(key), mode)
    }

    #[test]
    fn test_authenticate_is_deterministic() {
        for (key, mode) in [
            (DES_KEY, CipherMode::Des),
            (AES_KEY, CipherMode::Aes256),
            ("shared-secret", CipherMode::Hmac),
        ] {
            let first = auth("AMT=1.50&CURR=978", key, mode).expect("authenticator");
            let second = auth("AMT=1.50&CURR=978", key, mode).expect("authenticator");
            assert_eq!(first, second, "mode {mode} should be deterministic");
        }
    }

    #[test]
    fn test_des_output_shape() {
        let sig = auth("payload", DES_KEY, CipherMode::Des).unwrap();
        assert_eq!(sig.len(), DES_AUTH_LEN);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sig, sig.to_uppercase());
    }

    #[test]
    fn test_aes_output_shape() {
        let sig = auth("payload", AES_KEY, CipherMode::Aes256).unwrap();
        assert_eq!(sig.len(), AES256_AUTH_LEN);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sig, sig.to_uppercase());
    }

    #[test]
    fn test_hmac_output_shape() {
        let sig = auth("payload", "any length key", CipherMode::Hmac).unwrap();
        assert_eq!(sig.len(), HMAC_AUTH_LEN);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sig, sig.to_lowercase());
    }

    // RFC 4231 test case 2
    #[test]
    fn test_hmac_known_vector() {
        let sig = auth("what do ya want for nothing?", "Jefe", CipherMode::Hmac).unwrap();
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_hex_key_matches_decoded_raw_key() {
        let sig = auth("msg", &"0b".repeat(64), CipherMode::Hmac).unwrap();

        let mut mac = <HmacSha256 as Mac>::new_from_slice(&[0x0b; 64]).unwrap();
        mac.update(b"msg");
        assert_eq!(sig, hex::encode(mac.finalize().into_bytes()));
    }

    #[test]
    fn test_aes_hex_key_matches_raw_key() {
        // the hex encoding of AES_KEY's bytes decodes back to the same material
        let hexed = hex::encode(AES_KEY.as_bytes());
        assert_eq!(
            auth("payload", AES_KEY, CipherMode::Aes256).unwrap(),
            auth("payload", &hexed, CipherMode::Aes256).unwrap()
        );
    }

    #[test]
    fn test_different_plaintexts_differ() {
        let a = auth("AMT=1.50", "secret", CipherMode::Hmac).unwrap();
        let b = auth("AMT=1.51", "secret", CipherMode::Hmac).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_keys_differ() {
        let a = auth("payload", DES_KEY, CipherMode::Des).unwrap();
        let b = auth("payload", "87654321", CipherMode::Des).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_des_rejects_wrong_key_length() {
        let result = auth("payload", "short", CipherMode::Des);
        assert!(matches!(result, Err(CodecError::InvalidKeyEncoding { .. })));
    }

    #[test]
    fn test_aes_rejects_wrong_key_length() {
        let result = auth("payload", "a".repeat(63).as_str(), CipherMode::Aes256);
        assert!(matches!(result, Err(CodecError::InvalidKeyEncoding { .. })));
    }

    #[test]
    fn test_empty_plaintext_is_accepted() {
        let sig = auth("", "secret", CipherMode::Hmac).unwrap();
        assert_eq!(sig.len(), HMAC_AUTH_LEN);

        let sig = auth("", DES_KEY, CipherMode::Des).unwrap();
        assert_eq!(sig.len(), DES_AUTH_LEN);
    }

    #[test]
    fn test_unicode_plaintext() {
        let sig = auth("čiastka 1,50 €", AES_KEY, CipherMode::Aes256).unwrap();
        assert_eq!(sig.len(), AES256_AUTH_LEN);
    }
}
