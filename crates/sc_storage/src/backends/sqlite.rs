use async_trait::async_trait;
use sc_core::{
    ArticleBatch, ArticleFlag, ArticleRecord, ArticleStorage, Cell, Error, PurgeBoundary, Result,
    SourceTag,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::{StorageBackend, DEFAULT_TABLE};

const DEFAULT_DB_PATH: &str = "scrapchunk.db";

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> Error {
    move |e| Error::Database(format!("{}: {}", context, e))
}

fn column_type(column: &str) -> &'static str {
    match column {
        "ID" => "TEXT PRIMARY KEY",
        "VIEWS" | "COMMENTS" => "INTEGER NOT NULL",
        "EMBEDDED" => "BOOLEAN NOT NULL",
        _ => "TEXT NOT NULL",
    }
}

fn create_table_sql(table: &str) -> String {
    let columns = ArticleRecord::COLUMNS
        .iter()
        .map(|c| format!("{} {}", c, column_type(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE IF NOT EXISTS {} ({})", table, columns)
}

fn insert_sql(table: &str) -> String {
    let placeholders = vec!["?"; ArticleRecord::COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        ArticleRecord::COLUMNS.join(", "),
        placeholders
    )
}

fn select_sql(table: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE TAG = ? ORDER BY rowid",
        ArticleRecord::COLUMNS.join(", "),
        table
    )
}

fn record_from_row(row: &SqliteRow) -> Result<ArticleRecord> {
    let tag: SourceTag = row
        .try_get::<String, _>("TAG")
        .map_err(db_error("Failed to read TAG"))?
        .parse()?;
    let count = |column: &'static str| -> Result<u64> {
        let value: i64 = row.try_get(column).map_err(db_error("Failed to read count"))?;
        Ok(u64::try_from(value).unwrap_or(0))
    };
    let text = |column: &'static str| -> Result<String> {
        row.try_get(column).map_err(db_error("Failed to read column"))
    };

    Ok(ArticleRecord {
        id: text("ID")?,
        checksum: text("CHECKSUM")?,
        tag,
        title: text("TITLE")?,
        url: text("URL")?,
        summary: text("SUMMARY")?,
        posted_date: text("POSTED_DATE")?,
        author: text("AUTHOR")?,
        views: count("VIEWS")?,
        comments: count("COMMENTS")?,
        flag: ArticleFlag::from_column(
            tag,
            row.try_get("EMBEDDED").map_err(db_error("Failed to read EMBEDDED"))?,
        ),
    })
}

pub struct SQLiteStorage {
    pool: SqlitePool,
    table: String,
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        Self::open(options, DEFAULT_TABLE).await
    }

    pub async fn open(options: SqliteConnectOptions, table: &str) -> Result<Self> {
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::Storage(format!("Invalid table name: {:?}", table)));
        }

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(db_error("Failed to connect to database"))?;

        sqlx::query(&create_table_sql(table))
            .execute(&pool)
            .await
            .map_err(db_error("Failed to create table"))?;

        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be writable"
    }

    async fn connect(url: Option<&str>) -> Result<Self> {
        match url {
            Some(url) if url.starts_with("sqlite:") => {
                let options = SqliteConnectOptions::from_str(url)
                    .map_err(db_error("Invalid SQLite URL"))?
                    .create_if_missing(true);
                Self::open(options, DEFAULT_TABLE).await
            }
            Some(path) => Self::new_with_path(Path::new(path)).await,
            None => Self::new_with_path(Path::new(DEFAULT_DB_PATH)).await,
        }
    }
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    async fn append(&self, batch: ArticleBatch) -> Result<usize> {
        let sql = insert_sql(&self.table);
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin append"))?;

        let mut inserted = 0;
        for record in batch.records() {
            let mut query = sqlx::query(&sql);
            for cell in record.row() {
                query = match cell {
                    Cell::Text(value) => query.bind(value),
                    Cell::Int(value) => query.bind(value),
                    Cell::Bool(value) => query.bind(value),
                };
            }
            let result = query
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to append article"))?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit().await.map_err(db_error("Failed to commit append"))?;
        debug!("Appended {} rows to {}", inserted, self.table);
        Ok(inserted)
    }

    async fn delete_before(&self, boundary: &PurgeBoundary) -> Result<usize> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin purge"))?;

        // String comparison narrows the candidates; `covers` has the final say
        let rows = sqlx::query(&format!(
            "SELECT ID, POSTED_DATE FROM {} WHERE POSTED_DATE <> '' AND substr(POSTED_DATE, 1, 10) < ?",
            self.table
        ))
        .bind(boundary.as_iso())
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("Failed to select purge candidates"))?;

        let delete = format!("DELETE FROM {} WHERE ID = ?", self.table);
        let mut deleted = 0;
        for row in rows {
            let posted_date: String = row.try_get("POSTED_DATE").map_err(db_error("Failed to read POSTED_DATE"))?;
            if !boundary.covers(&posted_date) {
                continue;
            }
            let id: String = row.try_get("ID").map_err(db_error("Failed to read ID"))?;
            let result = sqlx::query(&delete)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to delete article"))?;
            deleted += result.rows_affected() as usize;
        }

        tx.commit().await.map_err(db_error("Failed to commit purge"))?;
        Ok(deleted)
    }

    async fn get_by_tag(&self, tag: SourceTag) -> Result<Vec<ArticleRecord>> {
        let rows = sqlx::query(&select_sql(&self.table))
            .bind(tag.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to get articles by tag"))?;

        rows.iter().map(record_from_row).collect()
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.table))
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count articles"))?;
        Ok(count as usize)
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}
