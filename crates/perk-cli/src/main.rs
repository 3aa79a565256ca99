use clap::Parser;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("perk error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = perk_config::PerkConfig::load_with_dotenv()?;
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

    match &cli.command {
        cli::Commands::Auth { action } => commands::auth::handle(action, cli.format, &config).await,
        cli::Commands::Offers { action } => {
            commands::offers::handle(action, cli.format, &config).await
        }
        cli::Commands::Banks { action } => {
            commands::banks::handle(action, cli.format, &config).await
        }
        cli::Commands::Locations { action } => {
            commands::locations::handle(action, cli.format, &config).await
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PERK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
