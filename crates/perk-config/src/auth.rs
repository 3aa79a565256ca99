//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

const fn default_poll_interval_secs() -> u64 {
    30
}

fn default_keyring_service() -> String {
    "perk-cli".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// How often the session manager re-checks the stored token for expiry.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Keyring service name for token storage. Override in tests
    /// (e.g. `"perk-cli-test"`) to avoid touching real credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            keyring_service: default_keyring_service(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = AuthConfig::default();
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.keyring_service, "perk-cli");
    }
}
