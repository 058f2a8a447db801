//! Registration Session
//!
//! The opaque registration key issued when a registration starts, and the
//! scope object that carries it to everything in the wizard.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of the hex fingerprint used in logs
const FINGERPRINT_LEN: usize = 12;

/// Opaque token correlating every step submission to one registration.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token; blank tokens are treated as absent
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 fingerprint, safe to log
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(FINGERPRINT_LEN);
        hex
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.fingerprint())
    }
}

/// Session scope injected into the wizard.
///
/// Cloning shares the scope. The token can be established exactly once;
/// later attempts leave the original token in place.
#[derive(Debug, Clone, Default)]
pub struct SessionScope {
    token: Arc<OnceLock<SessionToken>>,
}

impl SessionScope {
    /// A scope with no session yet
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope already holding `token`
    pub fn with_token(token: SessionToken) -> Self {
        let scope = Self::new();
        scope.establish(token);
        scope
    }

    /// Set the token. Returns `false` if one was already established.
    pub fn establish(&self, token: SessionToken) -> bool {
        self.token.set(token).is_ok()
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.get()
    }

    pub fn is_established(&self) -> bool {
        self.token.get().is_some()
    }
}
