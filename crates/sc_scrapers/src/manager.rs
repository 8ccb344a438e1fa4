use std::sync::Arc;

use sc_core::{validate_date_boundary, ArticleStorage, Result, SourceTag};
use tracing::{debug, info};

use crate::config::{ScrapConfig, SourceProfiles};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::pipeline::Extractor;

/// Drives fetch, extraction and storage for scrap and purge requests.
pub struct ScrapManager {
    storage: Arc<dyn ArticleStorage>,
    fetcher: Arc<dyn PageFetcher>,
    profiles: SourceProfiles,
    extractor: Extractor,
}

impl ScrapManager {
    pub fn new(
        storage: Arc<dyn ArticleStorage>,
        fetcher: Arc<dyn PageFetcher>,
        profiles: SourceProfiles,
    ) -> Result<Self> {
        let extractor = Extractor::new(&profiles)?;
        Ok(Self {
            storage,
            fetcher,
            profiles,
            extractor,
        })
    }

    pub fn from_config(storage: Arc<dyn ArticleStorage>, config: &ScrapConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent, config.timeout())?;
        Self::new(storage, Arc::new(fetcher), config.profiles.clone())
    }

    pub fn profiles(&self) -> &SourceProfiles {
        &self.profiles
    }

    pub fn storage(&self) -> &Arc<dyn ArticleStorage> {
        &self.storage
    }

    /// Fetches the listing for `tag`, extracts its articles and appends them.
    /// Returns the number of stored records.
    pub async fn scrap(&self, tag: SourceTag) -> Result<usize> {
        let profile = self.profiles.get(tag)?;
        info!("🦗 Fetching {} listing from {}", tag, profile.listing_url);
        let body = self.fetcher.fetch(&profile.listing_url).await?;
        debug!("📄 Listing body is {} bytes", body.len());

        let batch = self.extractor.extract_listing(&body, tag)?;
        info!("📰 Extracted {} {} articles", batch.total(), tag);

        let inserted = self.storage.append(batch).await?;
        info!("💾 Stored {} {} articles", inserted, tag);
        Ok(inserted)
    }

    /// Deletes records posted before `before_date` (`YYYY-MM-DD`).
    pub async fn purge(&self, before_date: Option<&str>) -> Result<usize> {
        let boundary = validate_date_boundary(before_date)?;
        let deleted = self.storage.delete_before(&boundary).await?;
        info!("🧹 Purged {} articles posted before {}", deleted, boundary);
        Ok(deleted)
    }

    pub async fn shutdown(&self) -> Result<()> {
        info!("🔌 Closing storage");
        self.storage.close().await
    }
}
