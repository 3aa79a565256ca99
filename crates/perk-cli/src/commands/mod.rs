pub mod auth;
pub mod banks;
pub mod locations;
pub mod offers;

use std::sync::Arc;
use std::time::Duration;

use perk_auth::{Keychain, TokenStore};
use perk_config::PerkConfig;

/// Build the API client the way every command needs it: keychain-backed
/// store, base URL and timeout from config.
fn api_client(config: &PerkConfig) -> anyhow::Result<perk_api::ApiClient> {
    let store: Arc<dyn TokenStore> = Arc::new(Keychain::new(config.auth.keyring_service.clone()));
    let client = perk_api::ApiClient::new(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
        store,
    )?;
    Ok(client)
}
