use async_trait::async_trait;
use crate::purge::PurgeBoundary;
use crate::types::{ArticleBatch, ArticleRecord, SourceTag};
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Append every record of the batch, returning how many rows were inserted
    async fn append(&self, batch: ArticleBatch) -> Result<usize>;

    /// Delete records posted strictly before the boundary, returning how many were removed
    async fn delete_before(&self, boundary: &PurgeBoundary) -> Result<usize>;

    /// Get all records carrying a source tag, in insertion order
    async fn get_by_tag(&self, tag: SourceTag) -> Result<Vec<ArticleRecord>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;

    /// Release the underlying connection. Called once on shutdown.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
