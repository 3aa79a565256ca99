use base64::Engine as _;
use chrono::{DateTime, Utc};
use perk_core::{Role, User};

/// Claims read from a bearer token's payload segment.
///
/// Every field is optional: the issuing service is not consistent about which
/// claims it includes, and the codec must tolerate anything that parses as a
/// JSON object. Decoding does NOT verify the signature — these claims drive
/// display and expiry checks only, the server re-validates on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    /// Expiry instant, epoch seconds. Absent means "cannot be validated".
    pub exp: Option<i64>,
    /// Issued-at instant, epoch seconds.
    pub iat: Option<i64>,
    /// Subject identifier.
    pub sub: Option<String>,
    /// Raw role string, normalized later via [`Role::from_claim`].
    pub role: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Numeric user id.
    pub id: Option<i64>,
}

impl Claims {
    /// Decode the payload segment of a three-part dot-separated token.
    ///
    /// Fails soft: a missing segment, invalid URL-safe base64, non-UTF-8
    /// bytes, or a payload that is not a JSON object all yield `None`.
    /// Callers must treat `None` as "not authenticated".
    #[must_use]
    pub fn decode(token: &str) -> Option<Self> {
        let payload = token.split('.').nth(1)?;
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .ok()?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        let object = value.as_object()?;

        // Field-by-field extraction so one oddly-typed claim does not throw
        // away the rest of the payload.
        Some(Self {
            exp: object.get("exp").and_then(serde_json::Value::as_i64),
            iat: object.get("iat").and_then(serde_json::Value::as_i64),
            sub: string_claim(object, "sub"),
            role: string_claim(object, "role"),
            email: string_claim(object, "email"),
            name: string_claim(object, "name"),
            id: object.get("id").and_then(serde_json::Value::as_i64),
        })
    }

    /// Expiry as a UTC instant. `None` when `exp` is absent or out of range.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Derive the user identity carried by these claims.
    ///
    /// Fallback chains match what the backend actually sends: `id` then `sub`
    /// for the identifier, `email` then `sub` for the address.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self
                .id
                .map(|id| id.to_string())
                .or_else(|| self.sub.clone())
                .unwrap_or_default(),
            email: self
                .email
                .clone()
                .or_else(|| self.sub.clone())
                .unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            role: Role::from_claim(self.role.as_deref()),
        }
    }
}

fn string_claim(object: &serde_json::Map<String, serde_json::Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}
