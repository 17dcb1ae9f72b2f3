//! Bank public-key registry with a local snapshot cache.
//!
//! The bank publishes every ECDSA signing key it has ever issued as a single
//! plain-text snapshot on its portal. Each entry is a numeric key ID line
//! followed by a PEM block:
//!
//! ```text
//! KEY_ID: 1
//! -----BEGIN PUBLIC KEY-----
//! <base64 lines>
//! -----END PUBLIC KEY-----
//! ```
//!
//! Lookup is a two-phase protocol:
//!
//! 1. Parse the local cache file. A hit is returned immediately with no
//!    network access.
//! 2. On a miss (file absent, or ID absent from it), download the full
//!    snapshot, atomically replace the cache file, and parse exactly once
//!    more. An ID still absent after a refresh is a "not found" result
//!    (`Ok(None)`), never an error.
//!
//! Keys are immutable once published, so a cache hit never needs
//! revalidation. Every lookup re-reads the file; no parsed entries are kept
//! in memory. Concurrent callers that miss simultaneously share a single
//! in-flight refresh.
//!
//! # Example
//!
//! ```no_run
//! use paygate::registry::KeyRegistry;
//! use paygate_core::config::Config;
//!
//! # async fn example() -> Result<(), paygate_core::error::GatewayError> {
//! let registry = KeyRegistry::from_config(&Config::default())?;
//! match registry.public_key(1).await? {
//!     Some(pem) => println!("key 1:\n{pem}"),
//!     None => println!("key 1 is not published"),
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use tokio::sync::Mutex;

use paygate_core::config::Config;
use paygate_core::error::{GatewayError, RegistryError};

/// Line prefix marking the start of a registry entry.
const KEY_ID_MARKER: &str = "KEY_ID: ";

/// PEM begin marker used by the bank's export format.
const PEM_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";

/// PEM end marker used by the bank's export format.
const PEM_END: &str = "-----END PUBLIC KEY-----";

// ============================================================================
// RegistrySource Trait
// ============================================================================

/// A source for the full registry snapshot.
///
/// The production implementation is [`HttpRegistrySource`]; tests substitute
/// in-memory sources to exercise the cache protocol without a network.
pub trait RegistrySource: Send + Sync {
    /// Download the full current registry snapshot.
    ///
    /// Returns the snapshot body verbatim. Any transport failure, timeout,
    /// or non-success status maps to [`RegistryError::Unreachable`].
    fn fetch(&self) -> impl Future<Output = Result<String, RegistryError>> + Send;
}

// ============================================================================
// HttpRegistrySource
// ============================================================================

/// Downloads registry snapshots from the bank portal over HTTPS.
pub struct HttpRegistrySource {
    client: reqwest::Client,
    url: String,
}

impl HttpRegistrySource {
    /// Create a source for `url` with the given download timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unreachable`] if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::unreachable(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The snapshot URL this source downloads from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RegistrySource for HttpRegistrySource {
    async fn fetch(&self) -> Result<String, RegistryError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RegistryError::unreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| RegistryError::unreachable(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| RegistryError::unreachable(e.to_string()))
    }
}

// ============================================================================
// KeyRegistry
// ============================================================================

/// Resolves numeric key IDs to PEM public keys via the cached snapshot.
///
/// # Concurrency
///
/// All methods take `&self`; the registry is safe to share behind an `Arc`.
/// Callers that miss the cache at the same time are deduplicated onto one
/// snapshot download: the refresh guard tracks a completed-refresh counter,
/// and a caller that waited out someone else's refresh re-parses the file
/// instead of downloading again.
pub struct KeyRegistry<S> {
    source: S,
    cache_path: PathBuf,
    /// Completed-refresh counter; doubles as the single-flight guard.
    refresh_gen: Mutex<u64>,
}

impl KeyRegistry<HttpRegistrySource> {
    /// Build a registry from configuration: HTTPS source plus cache path.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed or the cache path
    /// cannot be resolved (no home directory for `~` expansion).
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let source = HttpRegistrySource::new(&config.registry.url, config.download_timeout())?;
        let cache_path = config.cache_file_path()?;
        Ok(Self::new(source, cache_path))
    }
}

impl<S: RegistrySource> KeyRegistry<S> {
    /// Create a registry over `source`, caching snapshots at `cache_path`.
    pub fn new(source: S, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            cache_path: cache_path.into(),
            refresh_gen: Mutex::new(0),
        }
    }

    /// The local cache file path.
    #[must_use]
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Resolve `key_id` to its PEM public key.
    ///
    /// Returns `Ok(None)` when the ID is unknown even after a successful
    /// refresh; callers can rely on the distinction between "could not
    /// check" (an error) and "checked, does not exist" (`None`).
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Unreachable`] if a needed refresh download fails
    /// - [`RegistryError::File`] for local I/O failures other than a
    ///   missing cache file
    /// - [`RegistryError::MalformedEntry`] if the snapshot names the ID but
    ///   carries no usable PEM block for it
    pub async fn public_key(&self, key_id: u32) -> Result<Option<String>, RegistryError> {
        let observed = *self.refresh_gen.lock().await;

        if let Some(pem) = self.cached_key(key_id).await? {
            tracing::debug!(key_id, "registry cache hit");
            return Ok(Some(pem));
        }

        tracing::debug!(key_id, "registry cache miss, refreshing snapshot");
        self.refresh_if_stale(observed).await?;
        self.cached_key(key_id).await
    }

    /// Parse the cache file for `key_id`. A missing file is a miss.
    async fn cached_key(&self, key_id: u32) -> Result<Option<String>, RegistryError> {
        let snapshot = match fs::read_to_string(&self.cache_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RegistryError::File(e)),
        };
        extract_entry(&snapshot, key_id)
    }

    /// Download the snapshot and replace the cache file, unless another
    /// caller already completed a refresh after `observed`.
    async fn refresh_if_stale(&self, observed: u64) -> Result<(), RegistryError> {
        let mut generation = self.refresh_gen.lock().await;
        if *generation != observed {
            // someone else refreshed while we waited for the guard
            return Ok(());
        }

        let body = match self.source.fetch().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "registry snapshot download failed");
                return Err(e);
            }
        };
        self.replace_snapshot(&body).await?;
        *generation += 1;

        tracing::info!(bytes = body.len(), "registry snapshot refreshed");
        Ok(())
    }

    /// Atomically replace the cache file with `body`.
    ///
    /// The body is written to a temp file in the same directory and renamed
    /// over the cache file, so a crash or write failure never leaves a
    /// truncated snapshot behind.
    async fn replace_snapshot(&self, body: &str) -> Result<(), RegistryError> {
        if let Some(parent) = self.cache_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(RegistryError::File)?;
            }
        }

        let file_name = self
            .cache_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("snapshot");
        let temp_path = self.cache_path.with_file_name(format!(".{file_name}.tmp"));

        if let Err(e) = fs::write(&temp_path, body).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(RegistryError::File(e));
        }

        fs::rename(&temp_path, &self.cache_path)
            .await
            .map_err(RegistryError::File)
    }
}

// ============================================================================
// Snapshot parsing
// ============================================================================

/// Scan a snapshot for the entry of `key_id`.
///
/// This reproduces the bank's export format exactly: a single forward scan
/// for the first `KEY_ID: <id>` occurrence, then the enclosing PEM block
/// (begin marker through end marker inclusive, trimmed). No ID marker means
/// the key is unknown (`Ok(None)`).
///
/// # Errors
///
/// Returns [`RegistryError::MalformedEntry`] if the ID marker is present but
/// the slice after it has no begin marker, no end marker, or the end marker
/// precedes the begin marker.
fn extract_entry(snapshot: &str, key_id: u32) -> Result<Option<String>, RegistryError> {
    let marker = format!("{KEY_ID_MARKER}{key_id}");
    let Some(entry_at) = snapshot.find(&marker) else {
        return Ok(None);
    };

    let block = &snapshot[entry_at..];
    let Some(begin) = block.find(PEM_BEGIN) else {
        return Err(RegistryError::MalformedEntry { key_id });
    };
    let Some(end) = block.find(PEM_END) else {
        return Err(RegistryError::MalformedEntry { key_id });
    };

    let end = end + PEM_END.len();
    if begin >= end {
        return Err(RegistryError::MalformedEntry { key_id });
    }

    Ok(Some(block[begin..end].trim().to_string()))
}

// ============================================================================
// Tests
// ============================================================================
