use scraper::{ElementRef, Selector};
use sc_core::{ArticleFields, ArticleRecord, Error, Result, SourceTag};
use tracing::trace;
use url::Url;

use crate::config::SourceProfile;
use crate::fields;

/// Turns one listing tile into an article record, or skips it.
#[derive(Debug)]
pub struct ArticleNormalizer {
    tag: SourceTag,
    base_url: String,
    title: Selector,
    summary: Selector,
    posted_date: Selector,
    posted_date_attr: String,
    author: Selector,
    views: Selector,
    comments: Selector,
    solved: Option<Selector>,
}

pub(crate) fn compile(name: &str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| Error::Config(format!("Invalid {} selector {:?}: {}", name, css, e)))
}

impl ArticleNormalizer {
    pub fn new(profile: &SourceProfile) -> Result<Self> {
        Url::parse(&profile.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{} ({})", profile.base_url, e)))?;

        let selectors = &profile.selectors;
        Ok(Self {
            tag: profile.tag,
            base_url: profile.base_url.clone(),
            title: compile("title", &selectors.title)?,
            summary: compile("summary", &selectors.summary)?,
            posted_date: compile("posted_date", &selectors.posted_date)?,
            posted_date_attr: selectors.posted_date_attr.clone(),
            author: compile("author", &selectors.author)?,
            views: compile("views", &selectors.views)?,
            comments: compile("comments", &selectors.comments)?,
            solved: selectors
                .solved
                .as_deref()
                .map(|css| compile("solved", css))
                .transpose()?,
        })
    }

    pub fn tag(&self) -> SourceTag {
        self.tag
    }

    /// `position` is the tile's index in the listing, used in error messages.
    pub fn normalize(&self, tile: ElementRef<'_>, position: usize) -> Result<Option<ArticleRecord>> {
        let root = Some(tile);

        let title = fields::text(root, &self.title);
        if title.is_empty() {
            trace!("Skipping untitled {} tile #{}", self.tag, position);
            return Ok(None);
        }

        let comments = fields::int(root, &self.comments);
        if !self.include(tile, comments) {
            trace!("Skipping unanswered {} tile #{} ({:?})", self.tag, position, title);
            return Ok(None);
        }

        let url = fields::url(root, &self.title, &self.base_url).ok_or_else(|| {
            Error::Extraction(format!(
                "{} tile #{} ({:?}): title anchor has no href",
                self.tag, position, title
            ))
        })?;

        let fields = ArticleFields {
            title,
            url,
            summary: fields::text(root, &self.summary),
            posted_date: fields::attr(root, &self.posted_date, &self.posted_date_attr),
            author: fields::text(root, &self.author),
            views: fields::int(root, &self.views),
            comments,
        };

        ArticleRecord::new(self.tag, fields).map(Some)
    }

    fn include(&self, tile: ElementRef<'_>, comments: u64) -> bool {
        match self.tag {
            SourceTag::Qna => self.is_solved(tile) || comments > 0,
            SourceTag::Blog => true,
        }
    }

    fn is_solved(&self, tile: ElementRef<'_>) -> bool {
        self.solved
            .as_ref()
            .map_or(false, |marker| marker.matches(&tile))
    }
}
