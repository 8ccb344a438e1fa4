use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};
use sc_core::{ArticleBatch, Error, Result, SourceTag};
use tracing::debug;

use crate::config::SourceProfiles;
use crate::normalizer::{compile, ArticleNormalizer};

#[derive(Debug)]
struct CompiledSource {
    tile: Selector,
    normalizer: ArticleNormalizer,
}

/// Compiled extraction rules for every configured source.
#[derive(Debug)]
pub struct Extractor {
    sources: HashMap<SourceTag, CompiledSource>,
}

impl Extractor {
    pub fn new(profiles: &SourceProfiles) -> Result<Self> {
        let mut sources = HashMap::new();
        for profile in profiles.iter() {
            let source = CompiledSource {
                tile: compile("tile", &profile.tile)?,
                normalizer: ArticleNormalizer::new(profile)?,
            };
            sources.insert(profile.tag, source);
        }
        Ok(Self { sources })
    }

    fn source(&self, tag: SourceTag) -> Result<&CompiledSource> {
        self.sources
            .get(&tag)
            .ok_or_else(|| Error::Config(format!("No profile configured for {}", tag)))
    }

    /// Normalizes tiles in document order. The first malformed tile aborts
    /// the whole extraction; no partial batch is ever returned.
    pub fn extract<'a, I>(&self, tiles: I, tag: SourceTag) -> Result<ArticleBatch>
    where
        I: IntoIterator<Item = ElementRef<'a>>,
    {
        let normalizer = &self.source(tag)?.normalizer;
        let records = tiles
            .into_iter()
            .enumerate()
            .map(|(position, tile)| normalizer.normalize(tile, position))
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>>>()?;

        debug!("Extracted {} {} records", records.len(), tag);
        Ok(ArticleBatch::new(records))
    }

    /// Parses a listing page and extracts every tile the profile selects.
    pub fn extract_listing(&self, html: &str, tag: SourceTag) -> Result<ArticleBatch> {
        let source = self.source(tag)?;
        let document = Html::parse_document(html);
        let tiles = document.select(&source.tile);
        self.extract(tiles, tag)
    }
}
