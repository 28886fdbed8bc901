use crate::error::{CrawlError, Result};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

pub const DEFAULT_SELECTORS: [&str; 7] = ["p", "h1", "h2", "h3", "h4", "h5", "h6"];

lazy_static! {
    static ref LINKS: Selector = Selector::parse("a[href]").expect("valid selector");
    static ref DECLARED: Selector = Selector::parse("[data-keyword]").expect("valid selector");
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// CSS selectors for text-bearing elements.
    pub selectors: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { selectors: DEFAULT_SELECTORS.iter().map(|s| s.to_string()).collect() }
    }
}

/// Pulls indexable copy out of a rendered page.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    selector: Selector,
}

impl TextExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let group = config
            .selectors
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if group.is_empty() {
            return Err(CrawlError::Config("at least one text selector is required".into()));
        }
        let selector = Selector::parse(&group)
            .map_err(|e| CrawlError::Config(format!("bad selector list {group:?}: {e:?}")))?;
        Ok(Self { selector })
    }

    /// Visible text of every matching element, in document order, one element
    /// per line. Elements with no text are skipped; a page with no matches
    /// yields an empty string.
    pub fn extract(&self, html: &str) -> String {
        let doc = Html::parse_document(html);
        doc.select(&self.selector)
            .map(visible_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn visible_text(el: ElementRef<'_>) -> String {
    el.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Raw `href` attribute values in DOM order. Nothing is resolved against the
/// page URL, so relative links stay relative and fail validation later.
pub fn extract_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&LINKS)
        .filter_map(|a| a.value().attr("href"))
        .map(|h| h.trim().to_string())
        .collect()
}

/// Author-declared keywords from `data-keyword` attributes, in DOM order.
pub fn declared_keywords(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&DECLARED)
        .filter_map(|el| el.value().attr("data-keyword"))
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
