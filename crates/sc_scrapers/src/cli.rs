use clap::{Args, Subcommand};
use sc_core::{Result, SourceTag};

use crate::manager::ScrapManager;

#[derive(Args, Clone, Debug)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ScraperCommands {
    /// Scrape one listing and append its articles (QNA or BLOG)
    Scrap {
        #[arg(default_value = "QNA")]
        url_code: String,
    },
    /// Delete articles posted before a date (YYYY-MM-DD)
    Purge {
        before_date: String,
    },
    /// List configured sources
    List,
}

pub async fn handle_command(args: ScraperArgs, manager: &ScrapManager) -> Result<()> {
    match args.command {
        ScraperCommands::Scrap { url_code } => {
            let tag: SourceTag = url_code.parse()?;
            let inserted = manager.scrap(tag).await?;
            println!("✅ {} {} articles stored", inserted, tag);
        }
        ScraperCommands::Purge { before_date } => {
            let deleted = manager.purge(Some(&before_date)).await?;
            println!("🧹 {} articles deleted", deleted);
        }
        ScraperCommands::List => {
            println!("Available sources:");
            for profile in manager.profiles().iter() {
                println!("  {:<5} {}", profile.tag, profile.listing_url);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ScraperArgs,
    }

    #[test]
    fn test_parse_commands() {
        let cli = TestCli::parse_from(["sc", "scrap", "blog"]);
        assert!(matches!(cli.args.command, ScraperCommands::Scrap { ref url_code } if url_code == "blog"));

        let cli = TestCli::parse_from(["sc", "scrap"]);
        assert!(matches!(cli.args.command, ScraperCommands::Scrap { ref url_code } if url_code == "QNA"));

        let cli = TestCli::parse_from(["sc", "purge", "2024-01-01"]);
        assert!(matches!(cli.args.command, ScraperCommands::Purge { .. }));

        assert!(TestCli::try_parse_from(["sc", "purge"]).is_err());
    }
}
