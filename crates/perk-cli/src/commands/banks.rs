use perk_config::PerkConfig;

use crate::cli::{BanksCommands, OutputFormat};
use crate::output::output;

/// Handle `perk banks <subcommand>`.
pub async fn handle(
    action: &BanksCommands,
    format: OutputFormat,
    config: &PerkConfig,
) -> anyhow::Result<()> {
    let client = super::api_client(config)?;
    match action {
        BanksCommands::List => {
            let banks = client.banks().await?;
            output(&banks, format)
        }
    }
}
