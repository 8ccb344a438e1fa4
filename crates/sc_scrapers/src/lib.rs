pub mod cli;
pub mod config;
pub mod fetch;
pub mod fields;
pub mod logging;
pub mod manager;
pub mod normalizer;
pub mod pipeline;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use config::{ScrapConfig, SelectorTable, SourceProfile, SourceProfiles};
pub use fetch::{HttpFetcher, PageFetcher};
pub use manager::ScrapManager;
pub use normalizer::ArticleNormalizer;
pub use pipeline::Extractor;

pub mod prelude {
    pub use super::manager::ScrapManager;
    pub use sc_core::{ArticleBatch, ArticleRecord, Error, Result, SourceTag};
}
