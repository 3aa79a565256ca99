//! Durable storage for the current bearer token.
//!
//! The stored token is the single durable artifact of a session; everything
//! else is re-derived from it. The production store tiers through the OS
//! keychain, an environment variable, and a credentials file, and degrades to
//! "no token" instead of failing when running headless.

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "perk-cli";
const KEYRING_USER: &str = "bearer-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Single-key persistence for the session token.
///
/// `load` must never fail — callers treat any problem as "no token stored".
pub trait TokenStore: Send + Sync {
    /// Persist the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStore` if no storage tier accepts the write.
    fn save(&self, token: &str) -> Result<(), AuthError>;

    /// The currently stored token, if any.
    fn load(&self) -> Option<String>;

    /// Remove the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStore` if a stored token exists but cannot
    /// be removed.
    fn clear(&self) -> Result<(), AuthError>;
}

/// Production store: OS keychain with env-var and file fallbacks.
///
/// Load priority: keyring → `PERK_AUTH__TOKEN` env → `~/.perk/credentials`.
#[derive(Debug, Clone)]
pub struct Keychain {
    service: String,
}

impl Default for Keychain {
    fn default() -> Self {
        Self::new(keyring_service())
    }
}

impl Keychain {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Detect which tier the current token came from (for status display).
    #[must_use]
    pub fn token_source(&self) -> Option<&'static str> {
        if let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_USER)
            && entry.get_password().is_ok_and(|t| !t.is_empty())
        {
            return Some("keyring");
        }
        if std::env::var("PERK_AUTH__TOKEN").is_ok_and(|t| !t.is_empty()) {
            return Some("env");
        }
        if load_file().is_some() {
            return Some("file");
        }
        None
    }
}

impl TokenStore for Keychain {
    fn save(&self, token: &str) -> Result<(), AuthError> {
        match keyring::Entry::new(&self.service, KEYRING_USER) {
            Ok(entry) => match entry.set_password(token) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    store_file(token)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                store_file(token)
            }
        }
    }

    fn load(&self) -> Option<String> {
        // 1. Keyring
        if let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_USER)
            && let Ok(token) = entry.get_password()
            && !token.is_empty()
        {
            return Some(token);
        }

        // 2. Environment variable
        if let Ok(token) = std::env::var("PERK_AUTH__TOKEN") {
            if !token.is_empty() {
                return Some(token);
            }
        }

        // 3. File fallback
        load_file()
    }

    fn clear(&self) -> Result<(), AuthError> {
        // Delete from keyring (ignore errors — may not exist)
        if let Ok(entry) = keyring::Entry::new(&self.service, KEYRING_USER) {
            let _ = entry.delete_credential();
        }

        // Delete credentials file
        if let Some(path) = credentials_path() {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    AuthError::TokenStore(format!("failed to delete {}: {e}", path.display()))
                })?;
            }
        }

        Ok(())
    }
}

/// In-memory store for tests and embedded use.
///
/// Clones share the same cell, so a test can mutate the store "externally"
/// and observe a live session manager react.
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    cell: std::sync::Arc<RwLock<Option<String>>>,
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), AuthError> {
        if let Ok(mut guard) = self.cell.write() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn load(&self) -> Option<String> {
        self.cell.read().ok().and_then(|guard| guard.clone())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if let Ok(mut guard) = self.cell.write() {
            *guard = None;
        }
        Ok(())
    }
}

/// Returns the keyring service name.
///
/// Defaults to `"perk-cli"`. Override via `PERK_KEYRING_SERVICE` env var for
/// testing (e.g., `"perk-cli-test"`) to avoid touching production credentials.
fn keyring_service() -> String {
    std::env::var("PERK_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

// --- Private file helpers ---

fn credentials_path() -> Option<PathBuf> {
    // No home dir (containers, service contexts): degrade to "no file tier"
    dirs::home_dir().map(|h| h.join(".perk").join(CREDENTIALS_FILE_NAME))
}

fn store_file(token: &str) -> Result<(), AuthError> {
    let Some(path) = credentials_path() else {
        return Err(AuthError::TokenStore(
            "home directory not found — cannot store credentials".into(),
        ));
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, token)
        .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<String> {
    let path = credentials_path()?;
    fs::read_to_string(&path)
        .ok()
        .filter(|s| !s.trim().is_empty())
}
