//! # paygate
//!
//! Client-side authentication for a bank's e-commerce payment gateway.
//!
//! The gateway protocol has three moving parts, and this workspace mirrors
//! them:
//!
//! - outgoing requests carry a short authenticator computed from the
//!   payload and the merchant's shared secret
//!   ([`authenticate`], three fixed cipher modes)
//! - incoming responses carry an ECDSA signature over a canonical parameter
//!   string ([`verify_signature`])
//! - the bank's signing keys are published in a plain-text registry,
//!   resolved by key ID through a locally cached snapshot
//!   ([`registry::KeyRegistry`])
//!
//! # Example
//!
//! ```no_run
//! use paygate::registry::KeyRegistry;
//! use paygate::{authenticate, verify_signature, CipherMode, Config, SecretKey};
//!
//! # async fn example() -> Result<(), paygate::GatewayError> {
//! let config = Config::default();
//!
//! // authenticate an outgoing request
//! let key = SecretKey::new("mYSecretKey123");
//! let hmac = authenticate("AMT=1.50&CURR=978&VS=1234", &key, config.auth.cipher)?;
//!
//! // verify a signed response
//! let registry = KeyRegistry::from_config(&config)?;
//! if let Some(pem) = registry.public_key(1).await? {
//!     let ok = verify_signature(&pem, "3045...", "AMT=1.50&CURR=978&RES=OK")?;
//!     assert!(ok);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logging;
pub mod registry;

pub use paygate_core::config::Config;
pub use paygate_core::error::{
    CodecError, ConfigError, GatewayError, RegistryError, VerifyError,
};
pub use paygate_core::types::CipherMode;
pub use paygate_crypto::{authenticate, verify_signature, SecretKey};
