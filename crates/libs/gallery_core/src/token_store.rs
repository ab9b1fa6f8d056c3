//! Per-gallery access tokens, the proof of a successful passphrase
//! verification. Session-scoped: nothing here survives the process.
//!
//! This is the only state shared between concurrently open views of the
//! same gallery, so it lives in a concurrent map with last-write-wins
//! semantics; token issuance is idempotent, re-verifying simply reissues.

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct AccessTokenStore {
    tokens: DashMap<String, String>,
}

impl AccessTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, gallery_id: &str) -> Option<String> {
        self.tokens.get(gallery_id).map(|entry| entry.value().clone())
    }

    /// Store a token, overwriting any previous one for the same gallery.
    pub fn set(&self, gallery_id: &str, token: &str) {
        self.tokens.insert(gallery_id.to_string(), token.to_string());
    }

    /// Drop the token after an authorization failure so the caller can
    /// re-prompt instead of retrying with stale credentials.
    pub fn clear(&self, gallery_id: &str) {
        self.tokens.remove(gallery_id);
    }

    /// Session teardown / logout.
    pub fn clear_all(&self) {
        self.tokens.clear();
    }
}
