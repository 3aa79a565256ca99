//! Unsigned token builders for tests.
//!
//! The codec never verifies signatures, so a fabricated signature segment is
//! enough to exercise every decode and expiry path. Kept as a public module
//! (not `#[cfg(test)]`) so integration tests and downstream crates can build
//! tokens too.

use base64::Engine as _;

/// Build a three-segment token from an arbitrary JSON payload.
#[must_use]
pub fn jwt_from_payload(payload: &serde_json::Value) -> String {
    let engine = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = engine.encode(payload.to_string());
    let signature = engine.encode("fake_sig");
    format!("{header}.{body}.{signature}")
}

/// Build a token carrying a standard claim set and the given `exp`.
#[must_use]
pub fn jwt_with_exp(exp: i64) -> String {
    jwt_from_payload(&serde_json::json!({
        "sub": "user@example.com",
        "email": "user@example.com",
        "name": "Test User",
        "role": "USER",
        "id": 123,
        "exp": exp,
    }))
}

/// Build a token whose payload has no `exp` claim at all.
#[must_use]
pub fn jwt_without_exp() -> String {
    jwt_from_payload(&serde_json::json!({
        "sub": "user@example.com",
        "id": 123,
    }))
}
