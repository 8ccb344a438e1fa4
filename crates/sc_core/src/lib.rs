pub mod error;
pub mod identity;
pub mod purge;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use identity::compute_checksum;
pub use purge::{validate_date_boundary, PurgeBoundary};
pub use storage::ArticleStorage;
pub use types::{ArticleBatch, ArticleFields, ArticleFlag, ArticleRecord, Cell, SourceTag};
