use clap::Parser;
use sc_scrapers::logging::init_logging;
use sc_scrapers::{handle_command, ScrapConfig, ScrapManager, ScraperArgs, ScraperCommands};
use sc_web::AppState;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Storage backend: sqlite or memory
    #[arg(long, env = "SC_STORAGE", default_value = "sqlite")]
    storage: String,
    /// SQLite file path or sqlite: URL
    #[arg(long, env = "SC_DATABASE_URL")]
    database_url: Option<String>,
    /// JSON file overriding the default source profiles
    #[arg(long, env = "SC_PROFILES")]
    profiles: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },
    #[command(flatten)]
    Scraper(ScraperCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.profiles {
        Some(path) => {
            info!("📋 Loading profiles from {}", path.display());
            ScrapConfig::from_file(path)?
        }
        None => ScrapConfig::default(),
    };

    let storage = sc_storage::create_storage(&cli.storage, cli.database_url.as_deref()).await?;
    let manager = Arc::new(ScrapManager::from_config(storage, &config)?);

    match cli.command {
        Commands::Serve { host, port } => {
            sc_web::serve(AppState::new(manager), SocketAddr::new(host, port)).await?;
        }
        Commands::Scraper(command) => {
            let result = handle_command(ScraperArgs { command }, &manager).await;
            manager.shutdown().await?;
            if let Err(e) = result {
                error!("❌ {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["sc", "--storage", "memory", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.storage, "memory");
        assert!(matches!(cli.command, Commands::Serve { port: 8080, .. }));
    }

    #[test]
    fn test_parse_scraper_commands() {
        let cli = Cli::try_parse_from(["sc", "scrap", "BLOG"]).unwrap();
        assert!(matches!(cli.command, Commands::Scraper(ScraperCommands::Scrap { .. })));

        let cli = Cli::try_parse_from(["sc", "-v", "purge", "2024-01-01"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Scraper(ScraperCommands::Purge { .. })));
    }
}
