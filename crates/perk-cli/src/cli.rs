use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "perk",
    version,
    about = "Client for the hotel-offers promotions service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Only log errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log debug detail.
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON for piping.
    Raw,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Authentication commands.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Browse hotel offers.
    Offers {
        #[command(subcommand)]
        action: OffersCommands,
    },
    /// Browse participating banks.
    Banks {
        #[command(subcommand)]
        action: BanksCommands,
    },
    /// Browse the location hierarchy behind the search filters.
    Locations {
        #[command(subcommand)]
        action: LocationsCommands,
    },
}

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// Clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
    /// Print the logged-in user.
    Whoami,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Subcommand)]
pub enum OffersCommands {
    /// List offers, paginated.
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Search offers with location, bank, and card filters.
    Search(OffersSearchArgs),
    /// Show a single offer.
    Get { id: i64 },
}

#[derive(Clone, Debug, Args)]
pub struct OffersSearchArgs {
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub province: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Bank id filter; repeat for multiple banks.
    #[arg(long = "bank-id")]
    pub bank_ids: Vec<i64>,
    /// Card type filter; repeat for multiple types.
    #[arg(long = "card-type", value_enum)]
    pub card_types: Vec<CardTypeArg>,
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub size: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CardTypeArg {
    Credit,
    Debit,
}

impl From<CardTypeArg> for perk_api::CardType {
    fn from(arg: CardTypeArg) -> Self {
        match arg {
            CardTypeArg::Credit => Self::Credit,
            CardTypeArg::Debit => Self::Debit,
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum BanksCommands {
    /// List all banks.
    List,
}

/// Location hierarchy: countries > provinces > districts > cities.
#[derive(Clone, Debug, Subcommand)]
pub enum LocationsCommands {
    /// List all countries.
    Countries,
    /// List provinces, optionally scoped to one country.
    Provinces {
        #[arg(long = "country-id")]
        country_id: Option<i64>,
    },
    /// List districts, optionally scoped to one province.
    Districts {
        #[arg(long = "province-id")]
        province_id: Option<i64>,
    },
    /// List cities, optionally scoped to one district.
    Cities {
        #[arg(long = "district-id")]
        district_id: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_login_args() {
        let cli = Cli::parse_from([
            "perk", "auth", "login", "--email", "a@b.com", "--password", "x",
        ]);
        match cli.command {
            Commands::Auth {
                action: AuthCommands::Login(args),
            } => {
                assert_eq!(args.email, "a@b.com");
                assert_eq!(args.password, "x");
            }
            _ => panic!("expected auth login"),
        }
    }

    #[test]
    fn parses_scoped_location_listing() {
        let cli = Cli::parse_from(["perk", "locations", "cities", "--district-id", "2"]);
        match cli.command {
            Commands::Locations {
                action: LocationsCommands::Cities { district_id },
            } => assert_eq!(district_id, Some(2)),
            _ => panic!("expected locations cities"),
        }
    }

    #[test]
    fn parses_repeated_search_filters() {
        let cli = Cli::parse_from([
            "perk",
            "offers",
            "search",
            "--bank-id",
            "1",
            "--bank-id",
            "5",
            "--card-type",
            "credit",
            "--city",
            "Colombo",
        ]);
        match cli.command {
            Commands::Offers {
                action: OffersCommands::Search(args),
            } => {
                assert_eq!(args.bank_ids, vec![1, 5]);
                assert_eq!(args.card_types.len(), 1);
                assert_eq!(args.city.as_deref(), Some("Colombo"));
            }
            _ => panic!("expected offers search"),
        }
    }
}
