//! Newsletter articles and slug lookup.
//!
//! Articles live in `content.json` as an ordered list. Each article's `url`
//! is its canonical path, `/newsletter/<slug>`, and the detail page for a
//! slug is found by scanning the list in order. A missing slug is an
//! ordinary outcome; the site renders an "Article Not Found" page for it.

use serde::{Deserialize, Serialize};

/// Path prefix shared by every article url.
pub const URL_PREFIX: &str = "/newsletter/";

/// Listing excerpts are cut at this many characters by default.
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterArticle {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Scanned newsletter image, when one was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
}

impl NewsletterArticle {
    /// The url with [`URL_PREFIX`] removed. Urls without the prefix are
    /// returned whole.
    pub fn slug(&self) -> &str {
        self.url.strip_prefix(URL_PREFIX).unwrap_or(&self.url)
    }
}

/// First article whose slug equals `slug` exactly.
pub fn find_article<'a>(articles: &'a [NewsletterArticle], slug: &str) -> Option<&'a NewsletterArticle> {
    let found = articles.iter().find(|a| a.slug() == slug);
    if found.is_none() {
        tracing::debug!(slug, "no newsletter article for slug");
    }
    found
}

/// A listing excerpt of an article description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt<'a> {
    pub text: &'a str,
    /// Set when `text` is shorter than the description ("Read more").
    pub truncated: bool,
}

/// Cut `description` to at most `max_chars` characters, trimming trailing
/// whitespace from the cut.
pub fn excerpt(description: &str, max_chars: usize) -> Excerpt<'_> {
    match description.char_indices().nth(max_chars) {
        None => Excerpt {
            text: description,
            truncated: false,
        },
        Some((byte_idx, _)) => Excerpt {
            text: description[..byte_idx].trim(),
            truncated: true,
        },
    }
}
