use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::identity::compute_checksum;
use crate::{Error, Result};

/// The two community listings we know how to ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceTag {
    Qna,
    Blog,
}

impl SourceTag {
    pub const ALL: [SourceTag; 2] = [SourceTag::Qna, SourceTag::Blog];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Qna => "QNA",
            SourceTag::Blog => "BLOG",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "QNA" => Ok(SourceTag::Qna),
            "BLOG" => Ok(SourceTag::Blog),
            other => Err(Error::Validation(format!("Unknown source tag: {}", other))),
        }
    }
}

/// Source-conditional flag stored in the shared `EMBEDDED` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleFlag {
    Solved(bool),
    Embedded(bool),
}

impl ArticleFlag {
    /// Flag a freshly extracted record receives. QNA records only survive
    /// filtering when solved or commented, so they are always marked solved.
    pub fn initial(tag: SourceTag) -> Self {
        match tag {
            SourceTag::Qna => ArticleFlag::Solved(true),
            SourceTag::Blog => ArticleFlag::Embedded(false),
        }
    }

    pub fn from_column(tag: SourceTag, value: bool) -> Self {
        match tag {
            SourceTag::Qna => ArticleFlag::Solved(value),
            SourceTag::Blog => ArticleFlag::Embedded(value),
        }
    }

    pub fn value(&self) -> bool {
        match self {
            ArticleFlag::Solved(v) | ArticleFlag::Embedded(v) => *v,
        }
    }
}

/// One cell of a persisted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Text(&'a str),
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub checksum: String,
    pub tag: SourceTag,
    pub title: String,
    pub url: String,
    pub summary: String,
    pub posted_date: String,
    pub author: String,
    pub views: u64,
    pub comments: u64,
    pub flag: ArticleFlag,
}

/// Fields pulled out of one listing tile, before identity is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub posted_date: String,
    pub author: String,
    pub views: u64,
    pub comments: u64,
}

impl ArticleRecord {
    /// Column order of the persisted table. `row` yields cells in the same order.
    pub const COLUMNS: [&'static str; 11] = [
        "ID",
        "CHECKSUM",
        "TAG",
        "TITLE",
        "URL",
        "SUMMARY",
        "POSTED_DATE",
        "AUTHOR",
        "VIEWS",
        "COMMENTS",
        "EMBEDDED",
    ];

    /// Builds a record with a fresh id and the title checksum.
    /// Fails when the title is empty.
    pub fn new(tag: SourceTag, fields: ArticleFields) -> Result<Self> {
        if fields.title.is_empty() {
            return Err(Error::Extraction("article title must not be empty".to_string()));
        }

        Ok(Self {
            id: generate_id(),
            checksum: compute_checksum(&fields.title),
            tag,
            title: fields.title,
            url: fields.url,
            summary: fields.summary,
            posted_date: fields.posted_date,
            author: fields.author,
            views: fields.views,
            comments: fields.comments,
            flag: ArticleFlag::initial(tag),
        })
    }

    pub fn is_solved(&self) -> Option<bool> {
        match self.flag {
            ArticleFlag::Solved(v) => Some(v),
            ArticleFlag::Embedded(_) => None,
        }
    }

    pub fn is_embedded(&self) -> Option<bool> {
        match self.flag {
            ArticleFlag::Embedded(v) => Some(v),
            ArticleFlag::Solved(_) => None,
        }
    }

    pub fn row(&self) -> [Cell<'_>; 11] {
        [
            Cell::Text(&self.id),
            Cell::Text(&self.checksum),
            Cell::Text(self.tag.as_str()),
            Cell::Text(&self.title),
            Cell::Text(&self.url),
            Cell::Text(&self.summary),
            Cell::Text(&self.posted_date),
            Cell::Text(&self.author),
            Cell::Int(clamp_count(self.views)),
            Cell::Int(clamp_count(self.comments)),
            Cell::Bool(self.flag.value()),
        ]
    }
}

fn clamp_count(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Records extracted from one listing page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleBatch {
    records: Vec<ArticleRecord>,
}

impl ArticleBatch {
    pub fn new(records: Vec<ArticleRecord>) -> Self {
        Self { records }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &ArticleRecord::COLUMNS
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ArticleRecord> {
        self.records
    }
}

impl IntoIterator for ArticleBatch {
    type Item = ArticleRecord;
    type IntoIter = std::vec::IntoIter<ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> ArticleFields {
        ArticleFields {
            title: title.to_string(),
            url: "https://community.sap.com/t5/x/td-p/1".to_string(),
            views: 12,
            comments: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_source_tag_parsing() {
        assert_eq!("qna".parse::<SourceTag>().unwrap(), SourceTag::Qna);
        assert_eq!("BLOG".parse::<SourceTag>().unwrap(), SourceTag::Blog);
        assert_eq!(" Blog ".parse::<SourceTag>().unwrap(), SourceTag::Blog);
        assert!("NEWS".parse::<SourceTag>().is_err());
        assert_eq!(SourceTag::Qna.to_string(), "QNA");
    }

    #[test]
    fn test_record_flags() {
        let qna = ArticleRecord::new(SourceTag::Qna, fields("Fix X")).unwrap();
        assert_eq!(qna.is_solved(), Some(true));
        assert_eq!(qna.is_embedded(), None);

        let blog = ArticleRecord::new(SourceTag::Blog, fields("Fix X")).unwrap();
        assert_eq!(blog.is_embedded(), Some(false));
        assert_eq!(blog.is_solved(), None);
    }

    #[test]
    fn test_record_identity() {
        let a = ArticleRecord::new(SourceTag::Qna, fields("Fix X")).unwrap();
        let b = ArticleRecord::new(SourceTag::Qna, fields("Fix X")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
        assert_eq!(a.checksum, b.checksum);
        assert_eq!(a.checksum, compute_checksum("Fix X"));
    }

    #[test]
    fn test_empty_title_is_rejected() {
        assert!(ArticleRecord::new(SourceTag::Blog, fields("")).is_err());
    }

    #[test]
    fn test_row_matches_columns() {
        let record = ArticleRecord::new(SourceTag::Qna, fields("Fix X")).unwrap();
        let row = record.row();
        assert_eq!(row.len(), ArticleRecord::COLUMNS.len());
        assert_eq!(row[2], Cell::Text("QNA"));
        assert_eq!(row[3], Cell::Text("Fix X"));
        assert_eq!(row[8], Cell::Int(12));
        assert_eq!(row[9], Cell::Int(3));
        assert_eq!(row[10], Cell::Bool(true));
    }

    #[test]
    fn test_batch_total() {
        let batch = ArticleBatch::default();
        assert_eq!(batch.total(), 0);
        assert!(batch.is_empty());

        let records = vec![
            ArticleRecord::new(SourceTag::Blog, fields("One")).unwrap(),
            ArticleRecord::new(SourceTag::Blog, fields("Two")).unwrap(),
        ];
        let batch = ArticleBatch::new(records);
        assert_eq!(batch.total(), batch.records().len());
        assert_eq!(batch.columns()[10], "EMBEDDED");
    }
}
