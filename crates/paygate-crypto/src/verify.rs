//! ECDSA verification of signed bank responses.
//!
//! Responses from the gateway carry a hex-encoded, DER-formatted ECDSA
//! signature over the SHA-256 digest of a canonical parameter string. The
//! signing keys are NIST P-256 keys published on the bank portal as PEM
//! blocks (see the registry module in the `paygate` crate).
//!
//! A signature that parses but does not match is an ordinary negative
//! result, not an error; only structurally unusable inputs fail.

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::DecodePublicKey;

use paygate_core::error::VerifyError;

/// Verify a bank response signature against a published public key.
///
/// `signature_hex` is the hex-encoded DER ECDSA signature from the response
/// parameters; `canonical_string` is the canonical concatenation of the
/// response parameters the bank signed.
///
/// # Errors
///
/// - [`VerifyError::MalformedSignature`] if the signature is not valid hex
///   or not a valid DER ECDSA signature
/// - [`VerifyError::MalformedPublicKey`] if the PEM key cannot be parsed
///
/// # Example
///
/// ```no_run
/// use paygate_crypto::verify::verify_signature;
///
/// let pem = "-----BEGIN PUBLIC KEY-----\n...\n-----END PUBLIC KEY-----";
/// let valid = verify_signature(pem, "3045...", "AMT=1.50&CURR=978&RES=OK")?;
/// # Ok::<(), paygate_core::error::VerifyError>(())
/// ```
pub fn verify_signature(
    public_key_pem: &str,
    signature_hex: &str,
    canonical_string: &str,
) -> Result<bool, VerifyError> {
    let raw = hex::decode(signature_hex).map_err(|_| VerifyError::MalformedSignature)?;
    let signature = Signature::from_der(&raw).map_err(|_| VerifyError::MalformedSignature)?;
    let verifying_key =
        VerifyingKey::from_public_key_pem(public_key_pem).map_err(|_| VerifyError::MalformedPublicKey)?;

    Ok(verifying_key
        .verify(canonical_string.as_bytes(), &signature)
        .is_ok())
}
