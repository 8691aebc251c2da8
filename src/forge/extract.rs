// Repository page metadata extraction.
// Runs CSS selector queries against a forge repository page.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ForgeListError, Result};

use super::types::ProjectInfo;

const HISTORY_LINK: &str = "p.history-link";
const DESCRIPTION: &str = "div#repository_description p";
const SOCIAL_COUNT: &str = "ul.pagehead-actions a.social-count";

/// Link text the forge appends to truncated descriptions.
const READ_MORE: &str = "Read more";

/// Extracts display fields from repository pages.
///
/// Every field is queried independently; a missing element leaves that field
/// empty and never affects the others.
pub struct MetadataExtractor {
    history_link: Selector,
    description: Selector,
    social_count: Selector,
}

impl MetadataExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            history_link: compile(HISTORY_LINK)?,
            description: compile(DESCRIPTION)?,
            social_count: compile(SOCIAL_COUNT)?,
        })
    }

    /// Extract all fields of a page fetched from `url`.
    pub fn extract(&self, url: &str, html: &str) -> ProjectInfo {
        let doc = Html::parse_document(html);

        ProjectInfo {
            url: url.to_string(),
            description: or_empty(url, "description", self.description(&doc)),
            commits_summary: or_empty(url, "commits", self.commits_summary(&doc)),
            stars: or_empty(url, "stars", self.stars(&doc)),
            forks: or_empty(url, "forks", self.forks(&doc)),
        }
    }

    /// Text of the history link, e.g. `42 commits`.
    pub fn commits_summary(&self, doc: &Html) -> Option<String> {
        joined_text(doc.select(&self.history_link))
    }

    /// Repository description without the `Read more` link text.
    pub fn description(&self, doc: &Html) -> Option<String> {
        joined_text(doc.select(&self.description))
            .map(|text| normalize_ws(&text.replace(READ_MORE, "")))
    }

    /// First social counter on the page header.
    pub fn stars(&self, doc: &Html) -> Option<String> {
        doc.select(&self.social_count).next().map(element_text)
    }

    /// Last social counter on the page header.
    pub fn forks(&self, doc: &Html) -> Option<String> {
        doc.select(&self.social_count).last().map(element_text)
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ForgeListError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

fn or_empty(url: &str, field: &str, value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        debug!("no {} found on {}", field, url);
        String::new()
    })
}

/// Concatenated text of all matches, None when nothing matched.
fn joined_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> Option<String> {
    let mut matched = false;
    let mut text = String::new();
    for element in elements {
        matched = true;
        text.extend(element.text());
    }
    matched.then(|| normalize_ws(&text))
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<String>())
}

/// Collapse runs of whitespace into a single space and trim.
fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
