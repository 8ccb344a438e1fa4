//! Single-value extractors over a tile element.
//!
//! None of these fail: an absent root, a missing node or an unparsable
//! number all collapse to the type's zero value. `url` is the exception
//! and reports a missing `href` as `None`.
use scraper::{ElementRef, Selector};

pub fn first<'a>(root: Option<ElementRef<'a>>, selector: &Selector) -> Option<ElementRef<'a>> {
    root.and_then(|el| el.select(selector).next())
}

pub fn node_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub fn text(root: Option<ElementRef<'_>>, selector: &Selector) -> String {
    first(root, selector).map(node_text).unwrap_or_default()
}

pub fn attr(root: Option<ElementRef<'_>>, selector: &Selector, name: &str) -> String {
    first(root, selector)
        .and_then(|el| el.value().attr(name))
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn int(root: Option<ElementRef<'_>>, selector: &Selector) -> u64 {
    first(root, selector)
        .and_then(|el| node_text(el).parse::<u64>().ok())
        .unwrap_or(0)
}

/// `None` only when the node or its `href` attribute is absent. An empty
/// `href` resolves to `base_url` itself.
pub fn url(root: Option<ElementRef<'_>>, selector: &Selector, base_url: &str) -> Option<String> {
    let href = first(root, selector)?.value().attr("href")?;
    if href.starts_with("http://") || href.starts_with("https://") {
        Some(href.to_string())
    } else {
        Some(format!("{}{}", base_url, href))
    }
}
