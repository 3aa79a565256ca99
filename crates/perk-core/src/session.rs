use crate::identity::User;

/// Derived, in-memory authentication state for the current process.
///
/// Reconstructed from the stored token on every check — never persisted.
/// `Initializing` exists only between manager startup and the first
/// resolution of the stored token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Initial resolution of the stored token has not completed yet.
    #[default]
    Initializing,
    /// A valid, non-expired, decodable token is stored.
    Authenticated(User),
    /// No usable token is stored.
    Unauthenticated,
}

impl SessionState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// True only during the initial resolution.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    /// The current user. `Some` iff authenticated.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
