//! Auth token store
//!
//! Holds the admin bearer token. The token is loaded from a file under a
//! fixed name at startup and mutated only through `login`/`logout`, which
//! persist the change before updating the in-memory copy. A missing token
//! means "not authenticated"; nothing here validates the token itself.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::warn;

// == Token File Name ==
/// Fixed file name of the persisted token inside the configured directory.
pub const TOKEN_FILE: &str = "admin_token";

// == Auth Store ==
#[derive(Debug)]
pub struct AuthStore {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl AuthStore {
    /// Loads the store, reading a previously persisted token if one exists.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(TOKEN_FILE);
        let token = fs::read_to_string(&path)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            path,
            token: RwLock::new(token),
        }
    }

    // == Actions ==
    /// Stores the token and persists it. A persistence failure degrades to
    /// in-memory-only state with a warning; the session still works until
    /// the process exits.
    pub fn login(&self, token: &str) {
        if let Err(err) = fs::write(&self.path, token) {
            warn!(path = %self.path.display(), error = %err, "failed to persist admin token");
        }
        *self.token.write().expect("auth store poisoned") = Some(token.to_string());
    }

    /// Clears the token and removes the persisted copy.
    pub fn logout(&self) {
        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %err, "failed to remove persisted admin token");
            }
        }
        *self.token.write().expect("auth store poisoned") = None;
    }

    // == Reads ==
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("auth store poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("auth store poisoned").is_some()
    }
}
