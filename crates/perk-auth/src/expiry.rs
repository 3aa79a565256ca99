//! Pure expiry evaluation for stored tokens.

use chrono::{DateTime, TimeDelta, Utc};

use crate::claims::Claims;

/// Clock-skew tolerance subtracted from `exp`, in seconds.
///
/// Absorbs drift between the client clock and the issuing service. A token is
/// treated as expired this many seconds before its nominal expiry.
pub const CLOCK_SKEW_SECS: i64 = 5;

/// Whether the token is currently expired.
///
/// `true` when the token is absent, cannot be decoded, carries no `exp`
/// claim, or the current time is at or past `exp - CLOCK_SKEW_SECS`.
#[must_use]
pub fn is_expired(token: Option<&str>) -> bool {
    is_expired_at(token, Utc::now())
}

/// [`is_expired`] with an explicit clock, for deterministic tests.
#[must_use]
pub fn is_expired_at(token: Option<&str>, now: DateTime<Utc>) -> bool {
    let Some(token) = token else {
        return true;
    };
    let Some(claims) = Claims::decode(token) else {
        return true;
    };
    let Some(expires_at) = claims.expires_at() else {
        return true;
    };
    now >= expires_at - TimeDelta::seconds(CLOCK_SKEW_SECS)
}
