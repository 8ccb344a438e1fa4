use async_trait::async_trait;
use sc_core::{ArticleBatch, ArticleRecord, ArticleStorage, PurgeBoundary, Result, SourceTag};
use tokio::sync::RwLock;

use crate::StorageBackend;

/// Append-only table kept in process memory.
#[derive(Default)]
pub struct InMemoryStorage {
    rows: RwLock<Vec<ArticleRecord>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn connect(_url: Option<&str>) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl ArticleStorage for InMemoryStorage {
    async fn append(&self, batch: ArticleBatch) -> Result<usize> {
        let total = batch.total();
        self.rows.write().await.extend(batch);
        Ok(total)
    }

    async fn delete_before(&self, boundary: &PurgeBoundary) -> Result<usize> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|record| !boundary.covers(&record.posted_date));
        Ok(before - rows.len())
    }

    async fn get_by_tag(&self, tag: SourceTag) -> Result<Vec<ArticleRecord>> {
        Ok(self.rows.read().await
            .iter()
            .filter(|record| record.tag == tag)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rows.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::ArticleFields;

    fn record(tag: SourceTag, title: &str, posted_date: &str) -> ArticleRecord {
        ArticleRecord::new(tag, ArticleFields {
            title: title.to_string(),
            url: format!("https://community.sap.com/t5/{}", title),
            posted_date: posted_date.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_duplicates() {
        let storage = InMemoryStorage::new();
        let batch = ArticleBatch::new(vec![
            record(SourceTag::Qna, "b", "2024-01-02"),
            record(SourceTag::Blog, "a", "2024-01-01"),
            record(SourceTag::Qna, "a", "2024-01-03"),
        ]);
        assert_eq!(storage.append(batch.clone()).await.unwrap(), 3);
        // re-ingest of the same listing is not deduplicated here
        assert_eq!(storage.append(batch).await.unwrap(), 3);
        assert_eq!(storage.count().await.unwrap(), 6);

        let qna = storage.get_by_tag(SourceTag::Qna).await.unwrap();
        let titles: Vec<_> = qna.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "b", "a"]);
        assert_eq!(qna[0].checksum, qna[2].checksum);
    }

    #[tokio::test]
    async fn test_delete_before() {
        let storage = InMemoryStorage::new();
        storage.append(ArticleBatch::new(vec![
            record(SourceTag::Blog, "old", "2023-12-31T22:00:00.000+01:00"),
            record(SourceTag::Blog, "edge", "2024-01-01"),
            record(SourceTag::Blog, "new", "2024-02-01"),
            record(SourceTag::Blog, "undated", ""),
        ])).await.unwrap();

        let boundary: PurgeBoundary = "2024-01-01".parse().unwrap();
        assert_eq!(storage.delete_before(&boundary).await.unwrap(), 1);

        let left: Vec<_> = storage.get_by_tag(SourceTag::Blog).await.unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(left, vec!["edge", "new", "undated"]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let storage = InMemoryStorage::connect(None).await.unwrap();
        assert_eq!(storage.append(ArticleBatch::default()).await.unwrap(), 0);
        assert_eq!(storage.count().await.unwrap(), 0);
    }
}
