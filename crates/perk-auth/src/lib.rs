//! # perk-auth
//!
//! Client-side session/authentication lifecycle for the perk client.
//!
//! Decodes bearer-token claims without signature verification (`claims`),
//! evaluates expiry with a clock-skew tolerance (`expiry`), persists the
//! token in the OS keychain with env/file fallbacks (`token_store`), and
//! orchestrates login, logout, periodic expiry polling, and cross-component
//! synchronization (`manager`, `events`).

pub mod claims;
pub mod error;
pub mod events;
pub mod expiry;
pub mod manager;
pub mod test_support;
pub mod token_store;

pub use claims::Claims;
pub use error::AuthError;
pub use events::{AuthEvent, AuthEvents};
pub use manager::{Credentials, LoginService, LogoutHandle, SessionManager};
pub use token_store::{Keychain, MemoryTokenStore, TokenStore};

use perk_core::User;

/// Resolve the user carried by the currently stored token, if that token is
/// present, decodable, and not expired. A read-only snapshot — no state is
/// mutated and no logout side effect runs.
#[must_use]
pub fn current_user(store: &dyn TokenStore) -> Option<User> {
    let token = store.load()?;
    if expiry::is_expired(Some(&token)) {
        return None;
    }
    Claims::decode(&token).map(|claims| claims.to_user())
}
