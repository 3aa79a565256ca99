use perk_api::SearchParams;
use perk_config::PerkConfig;

use crate::cli::{OffersCommands, OffersSearchArgs, OutputFormat};
use crate::output::output;

/// Handle `perk offers <subcommand>`.
pub async fn handle(
    action: &OffersCommands,
    format: OutputFormat,
    config: &PerkConfig,
) -> anyhow::Result<()> {
    let client = super::api_client(config)?;
    match action {
        OffersCommands::List { page, size } => {
            let page = client.offers(*page, *size).await?;
            output(&page, format)
        }
        OffersCommands::Search(args) => {
            let page = client.search_offers(&to_params(args)).await?;
            output(&page, format)
        }
        OffersCommands::Get { id } => {
            let offer = client.offer(*id).await?;
            output(&offer, format)
        }
    }
}

fn to_params(args: &OffersSearchArgs) -> SearchParams {
    SearchParams {
        country: args.country.clone(),
        province: args.province.clone(),
        district: args.district.clone(),
        city: args.city.clone(),
        bank_ids: args.bank_ids.clone(),
        card_types: args.card_types.iter().map(|&c| c.into()).collect(),
        page: Some(args.page),
        size: Some(args.size),
    }
}
