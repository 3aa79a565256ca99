use perk_config::PerkConfig;

use crate::cli::{LocationsCommands, OutputFormat};
use crate::output::output;

/// Handle `perk locations <subcommand>`. Each level accepts an optional
/// parent id to scope the listing, matching the cascading search filters.
pub async fn handle(
    action: &LocationsCommands,
    format: OutputFormat,
    config: &PerkConfig,
) -> anyhow::Result<()> {
    let client = super::api_client(config)?;
    match action {
        LocationsCommands::Countries => {
            let countries = client.countries().await?;
            output(&countries, format)
        }
        LocationsCommands::Provinces { country_id } => {
            let provinces = match country_id {
                Some(id) => client.provinces_by_country(*id).await?,
                None => client.provinces().await?,
            };
            output(&provinces, format)
        }
        LocationsCommands::Districts { province_id } => {
            let districts = match province_id {
                Some(id) => client.districts_by_province(*id).await?,
                None => client.districts().await?,
            };
            output(&districts, format)
        }
        LocationsCommands::Cities { district_id } => {
            let cities = match district_id {
                Some(id) => client.cities_by_district(*id).await?,
                None => client.cities().await?,
            };
            output(&cities, format)
        }
    }
}
