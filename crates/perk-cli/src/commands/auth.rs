use std::sync::Arc;
use std::time::Duration;

use perk_auth::{AuthEvents, Claims, Credentials, Keychain, SessionManager, TokenStore};
use perk_config::PerkConfig;
use perk_core::User;
use serde::Serialize;

use crate::cli::{AuthCommands, AuthLoginArgs, OutputFormat};
use crate::output::output;

/// Handle `perk auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    format: OutputFormat,
    config: &PerkConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, format, config).await,
        AuthCommands::Logout => logout(format, config),
        AuthCommands::Status => status(format, config),
        AuthCommands::Whoami => whoami(format, config),
    }
}

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user: User,
}

async fn login(args: &AuthLoginArgs, format: OutputFormat, config: &PerkConfig) -> anyhow::Result<()> {
    let store: Arc<dyn TokenStore> =
        Arc::new(Keychain::new(config.auth.keyring_service.clone()));
    let client = perk_api::ApiClient::new(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
        store.clone(),
    )?;
    let manager = SessionManager::start(
        client,
        store,
        AuthEvents::new(),
        Duration::from_secs(config.auth.poll_interval_secs),
    );

    let credentials = Credentials {
        email: args.email.clone(),
        password: args.password.clone(),
    };
    let user = manager.login(&credentials).await?;
    manager.shutdown();

    output(
        &AuthLoginResponse {
            authenticated: true,
            user,
        },
        format,
    )
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

fn logout(format: OutputFormat, config: &PerkConfig) -> anyhow::Result<()> {
    let store = Keychain::new(config.auth.keyring_service.clone());
    store.clear()?;
    output(&AuthLogoutResponse { cleared: true }, format)
}

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<User>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

fn status(format: OutputFormat, config: &PerkConfig) -> anyhow::Result<()> {
    let store = Keychain::new(config.auth.keyring_service.clone());

    let response = match perk_auth::current_user(&store) {
        Some(user) => {
            let expires_at = store
                .load()
                .as_deref()
                .and_then(Claims::decode)
                .and_then(|claims| claims.expires_at())
                .map(|instant| instant.to_rfc3339());
            AuthStatusResponse {
                authenticated: true,
                user: Some(user),
                expires_at,
                token_source: store.token_source(),
                note: None,
            }
        }
        None => AuthStatusResponse {
            authenticated: false,
            user: None,
            expires_at: None,
            token_source: None,
            note: Some("no valid token found".into()),
        },
    };

    output(&response, format)
}

fn whoami(format: OutputFormat, config: &PerkConfig) -> anyhow::Result<()> {
    let store = Keychain::new(config.auth.keyring_service.clone());
    match perk_auth::current_user(&store) {
        Some(user) => output(&user, format),
        None => anyhow::bail!("not authenticated — run `perk auth login`"),
    }
}
