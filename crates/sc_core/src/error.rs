use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl Error {
    /// True when the listing page could not be retrieved at all.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Fetch(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert!(Error::Fetch("503".to_string()).is_fetch());
        assert!(!Error::Extraction("tile 0".to_string()).is_fetch());
        assert!(Error::Validation("bad date".to_string()).is_validation());
        assert!(!Error::Storage("down".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Extraction("tile 3: title anchor has no href".to_string());
        assert_eq!(err.to_string(), "Extraction error: tile 3: title anchor has no href");
    }
}
