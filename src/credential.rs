//! API-key entry surface
//!
//! Separate from the chat path, which needs no key: the `/ask` backend is
//! unauthenticated. Keys are validated on entry (presence plus the required
//! `sk-` prefix), held in memory only, and never written to disk or logged.

use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Required prefix for accepted API keys
pub const KEY_PREFIX: &str = "sk-";

/// A validated API key, redacted in debug output
#[derive(Debug, Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Validate and accept a key from user entry
    ///
    /// Leading and trailing whitespace is stripped before validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] when the key is empty or does not start
    /// with `sk-`. Rejection is terminal for the entry attempt; no retry is
    /// performed here.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(Error::Credential("API key is required".to_string()));
        }

        if !trimmed.starts_with(KEY_PREFIX) {
            return Err(Error::Credential(format!(
                "API keys should start with '{KEY_PREFIX}'"
            )));
        }

        Ok(Self(SecretString::from(trimmed.to_string())))
    }

    /// Expose the key for direct use against the credential owner's API
    ///
    /// The only legitimate consumer is a call to the key owner's own
    /// service; this crate never transmits the key anywhere else.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// In-memory credential holder; nothing here survives the process
#[derive(Debug, Default)]
pub struct CredentialStore {
    key: Option<ApiKey>,
}

impl CredentialStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a validated key
    pub fn set(&mut self, key: ApiKey) {
        tracing::debug!("API key accepted (held in memory only)");
        self.key = Some(key);
    }

    /// Drop the stored key
    pub fn clear(&mut self) {
        self.key = None;
    }

    /// Whether a key is currently held
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.key.is_some()
    }

    /// The stored key, if any
    #[must_use]
    pub const fn get(&self) -> Option<&ApiKey> {
        self.key.as_ref()
    }
}
