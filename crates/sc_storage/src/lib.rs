use async_trait::async_trait;
use sc_core::{ArticleStorage, Error, Result};
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

/// Table the scraped articles are appended to unless configured otherwise.
pub const DEFAULT_TABLE: &str = "SCRAPCHUNK";

#[async_trait]
pub trait StorageBackend: ArticleStorage {
    fn get_error_message() -> &'static str
    where
        Self: Sized;

    /// Opens the backend. `url` is backend specific and may be omitted.
    async fn connect(url: Option<&str>) -> Result<Self>
    where
        Self: Sized;
}

/// Opens the storage backend named by `kind` (`memory` or `sqlite`).
pub async fn create_storage(kind: &str, url: Option<&str>) -> Result<Arc<dyn ArticleStorage>> {
    let storage: Arc<dyn ArticleStorage> = match kind.to_lowercase().as_str() {
        "memory" => Arc::new(open::<InMemoryStorage>(url).await?),
        #[cfg(feature = "sqlite")]
        "sqlite" => Arc::new(open::<SQLiteStorage>(url).await?),
        other => {
            return Err(Error::Storage(format!("Unsupported storage backend: {}", other)));
        }
    };
    info!("🏦 Storage backend initialized (using {})", kind);
    Ok(storage)
}

async fn open<T: StorageBackend>(url: Option<&str>) -> Result<T> {
    T::connect(url)
        .await
        .map_err(|e| Error::Storage(format!("{} ({})", T::get_error_message(), e)))
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageBackend};
}
