//! Per-source extraction profiles and fetch settings.
//!
//! Every selector the normalizer uses lives here as data, so pointing the
//! pipeline at a reworked listing layout is a configuration change. The
//! defaults target the SAP Community technology Q&A and blog listings.
use std::path::Path;
use std::time::Duration;

use sc_core::{Error, Result, SourceTag};
use serde::{Deserialize, Serialize};

const COMMUNITY_ORIGIN: &str = "https://community.sap.com";
const TILE_SELECTOR: &str = "article.custom-message-tile";
const DEFAULT_USER_AGENT: &str = "Chrome/135.0.0.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Named CSS selectors, evaluated relative to one listing tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorTable {
    pub title: String,
    pub summary: String,
    pub posted_date: String,
    #[serde(default = "default_posted_date_attr")]
    pub posted_date_attr: String,
    pub author: String,
    pub views: String,
    pub comments: String,
    /// Marker for accepted answers. Matched against the tile and its descendants.
    #[serde(default)]
    pub solved: Option<String>,
}

fn default_posted_date_attr() -> String {
    "datetime".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProfile {
    pub tag: SourceTag,
    pub listing_url: String,
    /// Origin prefixed to relative article links
    pub base_url: String,
    pub tile: String,
    pub selectors: SelectorTable,
}

impl SourceProfile {
    pub fn qna() -> Self {
        Self {
            tag: SourceTag::Qna,
            listing_url: format!("{}/t5/technology-q-a/qa-p/technology-questions", COMMUNITY_ORIGIN),
            base_url: COMMUNITY_ORIGIN.to_string(),
            tile: TILE_SELECTOR.to_string(),
            selectors: SelectorTable {
                title: "h3 > a".to_string(),
                summary: "footer p".to_string(),
                posted_date: "time".to_string(),
                posted_date_attr: default_posted_date_attr(),
                author: "a.custom-tile-author-link[rel='author']".to_string(),
                views: "ul.custom-tile-statistics li.custom-tile-views b".to_string(),
                comments: "ul.custom-tile-statistics li.custom-tile-replies b".to_string(),
                solved: Some(".custom-tile-solved".to_string()),
            },
        }
    }

    pub fn blog() -> Self {
        Self {
            tag: SourceTag::Blog,
            listing_url: format!("{}/t5/technology-blogs-by-sap/bg-p/technology-blog-sap", COMMUNITY_ORIGIN),
            base_url: COMMUNITY_ORIGIN.to_string(),
            tile: TILE_SELECTOR.to_string(),
            selectors: SelectorTable {
                title: "h3 > a".to_string(),
                summary: "p".to_string(),
                posted_date: "time".to_string(),
                posted_date_attr: default_posted_date_attr(),
                author: "footer .custom-tile-author-info a[rel='author']".to_string(),
                views: "li.custom-tile-views b".to_string(),
                comments: "li.custom-tile-replies b".to_string(),
                solved: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceProfiles(Vec<SourceProfile>);

impl SourceProfiles {
    pub fn new(profiles: Vec<SourceProfile>) -> Result<Self> {
        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|p| p.tag == profile.tag) {
                return Err(Error::Config(format!("Duplicate profile for {}", profile.tag)));
            }
        }
        Ok(Self(profiles))
    }

    pub fn get(&self, tag: SourceTag) -> Result<&SourceProfile> {
        self.0
            .iter()
            .find(|p| p.tag == tag)
            .ok_or_else(|| Error::Config(format!("No profile configured for {}", tag)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceProfile> {
        self.0.iter()
    }
}

impl Default for SourceProfiles {
    fn default() -> Self {
        Self(vec![SourceProfile::qna(), SourceProfile::blog()])
    }
}

/// Everything the scrap manager needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub profiles: SourceProfiles,
}

impl Default for ScrapConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            profiles: SourceProfiles::default(),
        }
    }
}

impl ScrapConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        // Re-run the duplicate check serde skipped
        let profiles = SourceProfiles::new(config.profiles.0)?;
        Ok(Self { profiles, ..config })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_profiles() {
        let profiles = SourceProfiles::default();
        let qna = profiles.get(SourceTag::Qna).unwrap();
        assert!(qna.listing_url.ends_with("/qa-p/technology-questions"));
        assert_eq!(qna.selectors.summary, "footer p");
        assert!(qna.selectors.solved.is_some());

        let blog = profiles.get(SourceTag::Blog).unwrap();
        assert_eq!(blog.selectors.summary, "p");
        assert!(blog.selectors.solved.is_none());
    }

    #[test]
    fn test_duplicate_profiles_rejected() {
        let result = SourceProfiles::new(vec![SourceProfile::qna(), SourceProfile::qna()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_profile() {
        let profiles = SourceProfiles::new(vec![SourceProfile::blog()]).unwrap();
        assert!(profiles.get(SourceTag::Qna).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut blog = SourceProfile::blog();
        blog.listing_url = "https://forum.example.com/blogs".to_string();
        let json = serde_json::json!({
            "user_agent": "sc-test",
            "profiles": [blog],
        });
        write!(file, "{}", json).unwrap();

        let config = ScrapConfig::from_file(file.path()).unwrap();
        assert_eq!(config.user_agent, "sc-test");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(
            config.profiles.get(SourceTag::Blog).unwrap().listing_url,
            "https://forum.example.com/blogs"
        );
        assert!(config.profiles.get(SourceTag::Qna).is_err());
    }

    #[test]
    fn test_posted_date_attr_defaults() {
        let json = r#"{
            "title": "h2 a", "summary": "p", "posted_date": "time",
            "author": ".author", "views": ".views", "comments": ".replies"
        }"#;
        let table: SelectorTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.posted_date_attr, "datetime");
        assert_eq!(table.solved, None);
    }
}
