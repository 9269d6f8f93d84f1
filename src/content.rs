//! Typed site content.
//!
//! Every page is rendered from a single `content.json`. The records below
//! give each content type an explicit shape: required fields must be present
//! for deserialization to succeed, optional ones (`pdf`, `video`, `age`,
//! `thumbnail`, form schemas, ...) default to absent.
//!
//! After parsing, [`SiteContent::validate`] checks cross-record rules that
//! serde cannot express, so broken content fails the build instead of
//! rendering half-empty markup.

use crate::newsletter::{NewsletterArticle, URL_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Slug taken by the generated "Article Not Found" page.
pub const RESERVED_SLUG: &str = "not-found";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

/// Non-fatal content problems reported alongside a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentWarning {
    /// Two articles share a slug; only the first is reachable.
    DuplicateSlug(String),
}

impl fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentWarning::DuplicateSlug(slug) => {
                write!(f, "duplicate newsletter slug '{slug}', later articles are unreachable")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub site: SiteInfo,
    pub navigation: Navigation,
    pub footer: Footer,
    pub home: HomeContent,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    pub about: PageContent,
    pub programs: PageContent,
    pub apply: PageContent,
    pub donate: PageContent,
    pub contact: PageContent,
    pub faq: FaqContent,
    /// Standalone services page; not linked from the navigation by default.
    #[serde(default)]
    pub services: Option<ServicesPage>,
    pub newsletter: NewsletterContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Navigation {
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(alias = "text")]
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub tagline: String,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(default)]
    pub quick_links: Vec<Link>,
    pub copyright: String,
}

/// Full-height banner at the top of every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub subtitle2: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default, rename = "primaryCTA")]
    pub primary_cta: Option<Link>,
    #[serde(default, rename = "secondaryCTA")]
    pub secondary_cta: Option<Link>,
}

/// A titled block of (markdown) text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub content: String,
    #[serde(default, rename = "primaryCTA")]
    pub primary_cta: Option<Link>,
    #[serde(default, rename = "secondaryCTA")]
    pub secondary_cta: Option<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToAction {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub buttons: Vec<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub hero: Hero,
    pub mission: Mission,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub services: Option<Services>,
    pub testimonials: Testimonials,
    pub call_to_action: CallToAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    /// Heading of the zooming image panel; falls back to `title`.
    #[serde(default)]
    pub title2: Option<String>,
    pub content: String,
    /// Background of the zooming image panel.
    #[serde(default)]
    pub image2: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Services {
    pub title: String,
    pub items: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonials {
    pub title: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

impl Testimonial {
    /// Name shown under the quote; the title when no name is given.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineColor {
    Yellow,
    Pink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub label: String,
    pub color: TimelineColor,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Hero plus sections, optionally ending in a placeholder form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub hero: Hero,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub form: Option<FormSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub fields: Vec<FormField>,
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Textarea,
    Select,
    Checkbox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default = "default_field_kind")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Choices for `select` fields.
    #[serde(default)]
    pub options: Vec<String>,
}

fn default_field_kind() -> FieldKind {
    FieldKind::Text
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesPage {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    pub categories: Vec<ServiceCategory>,
}

/// A named group of services, listed as bullet points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqContent {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub intro: Option<String>,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterContent {
    pub hero: Hero,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub articles: Vec<NewsletterArticle>,
}

impl SiteContent {
    /// Check rules that span records.
    ///
    /// Hard errors abort the build; duplicates that only shadow an article
    /// come back as warnings.
    pub fn validate(&self) -> Result<Vec<ContentWarning>, ContentError> {
        if self.site.name.trim().is_empty() {
            return Err(ContentError::Validation("site.name must not be empty".into()));
        }

        let mut hrefs = HashSet::new();
        for link in &self.navigation.links {
            if !hrefs.insert(link.href.as_str()) {
                return Err(ContentError::Validation(format!(
                    "duplicate navigation link: {}",
                    link.href
                )));
            }
        }

        for (idx, testimonial) in self.home.testimonials.items.iter().enumerate() {
            if testimonial.display_name().is_empty() {
                return Err(ContentError::Validation(format!(
                    "testimonial {} has neither name nor title",
                    idx + 1
                )));
            }
        }

        for (page, content) in self.pages() {
            if let Some(form) = &content.form {
                for field in &form.fields {
                    if field.name.trim().is_empty() {
                        return Err(ContentError::Validation(format!(
                            "{page} form has a field without a name"
                        )));
                    }
                    if field.kind == FieldKind::Select && field.options.is_empty() {
                        return Err(ContentError::Validation(format!(
                            "{page} form field '{}' is a select without options",
                            field.name
                        )));
                    }
                }
            }
        }

        let mut warnings = Vec::new();
        let mut slugs = HashSet::new();
        for article in &self.newsletter.articles {
            if !article.url.starts_with(URL_PREFIX) || article.slug().is_empty() {
                return Err(ContentError::Validation(format!(
                    "newsletter article url must look like {URL_PREFIX}<slug>: {}",
                    article.url
                )));
            }
            let slug = article.slug();
            if slug.contains(['/', '\\']) || slug == "." || slug == ".." {
                return Err(ContentError::Validation(format!(
                    "newsletter slug must be a single path segment: {slug}"
                )));
            }
            if slug == RESERVED_SLUG {
                return Err(ContentError::Validation(format!(
                    "newsletter slug '{RESERVED_SLUG}' is reserved"
                )));
            }
            if !slugs.insert(slug) {
                warnings.push(ContentWarning::DuplicateSlug(article.slug().to_string()));
            }
        }
        Ok(warnings)
    }

    /// The hero-and-sections pages, keyed by output directory.
    pub fn pages(&self) -> [(&'static str, &PageContent); 5] {
        [
            ("about", &self.about),
            ("programs", &self.programs),
            ("apply", &self.apply),
            ("donate", &self.donate),
            ("contact", &self.contact),
        ]
    }
}

/// Read and validate a content file.
pub fn load_content(path: &Path) -> Result<(SiteContent, Vec<ContentWarning>), ContentError> {
    let raw = fs::read_to_string(path)?;
    let content: SiteContent = serde_json::from_str(&raw)?;
    let warnings = content.validate()?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    Ok((content, warnings))
}
