use serde::{Deserialize, Serialize};

/// Access role carried in the token's `role` claim.
///
/// The backend is case-inconsistent about this value, so normalization is
/// case-insensitive and anything that is not `ADMIN` collapses to [`Role::User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Normalize a raw role claim. `None` or any non-admin value means [`Role::User`].
    #[must_use]
    pub fn from_claim(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("ADMIN") => Self::Admin,
            _ => Self::User,
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Authenticated user identity derived from token claims.
///
/// Produced by `perk-auth`, consumed by `perk-cli`. Contains only data
/// fields — no token handling, no network calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier: numeric `id` claim when present, else `sub`.
    pub id: String,
    /// Email address: `email` claim when present, else `sub`.
    pub email: String,
    /// Display name. Empty when the claim is absent.
    pub name: String,
    pub role: Role,
}
