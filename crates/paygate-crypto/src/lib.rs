//! # paygate-crypto
//!
//! Cryptographic primitives for the paygate e-commerce gateway client:
//!
//! - `codec` - the three fixed request-authentication algorithms
//!   (single-DES legacy MAC, AES-256-ECB truncated digest, HMAC-SHA256)
//! - `keys` - shared-secret handling with length-based encoding inference
//! - `verify` - ECDSA (P-256, SHA-256) verification of signed responses
//!
//! All operations here are pure, synchronous, CPU-bound computations; key
//! acquisition and caching live in the `paygate` crate.
//!
//! ## Security
//!
//! - No unsafe code allowed
//! - Secret key material is zeroized on drop and never appears in debug
//!   output

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod keys;
pub mod verify;

pub use codec::authenticate;
pub use keys::SecretKey;
pub use verify::verify_signature;
