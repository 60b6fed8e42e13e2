//! Administrator tokens.
//!
//! Only SHA-256 digests of configured tokens are kept in memory. A presented
//! token is hashed and looked up, so the raw secrets never sit in `AppState`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::collections::HashSet;
use std::fmt::Write;

use rand::Rng;
use sha2::{Digest, Sha256};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[must_use]
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// Tokens that carry the administrator capability.
#[derive(Debug, Clone, Default)]
pub struct AdminTokens {
    digests: HashSet<String>,
}

impl AdminTokens {
    #[must_use]
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { digests: tokens.into_iter().map(|t| hash_token(t.as_ref())).collect() }
    }

    /// Whether `token` grants the administrator capability.
    #[must_use]
    pub fn is_admin(&self, token: &str) -> bool {
        !token.is_empty() && self.digests.contains(&hash_token(token))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }
}
