//! HTML site generation.
//!
//! Renders every page of the site from [`SiteContent`] and [`SiteConfig`]
//! and writes it under the output directory.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                     # Home
//! ├── about/index.html
//! ├── programs/index.html
//! ├── apply/index.html               # Placeholder application form
//! ├── donate/index.html
//! ├── contact/index.html             # Placeholder contact form
//! ├── faq/index.html
//! ├── services/index.html            # Only when content has `services`
//! ├── newsletter/
//! │   ├── index.html                 # Article listing with excerpts
//! │   ├── September-2025/index.html  # One directory per article slug
//! │   └── not-found/index.html       # Fallback for unknown slugs
//! └── ...                            # Files copied from content/assets/
//! ```
//!
//! ## Runtime Behavior
//!
//! The pages are static; the embedded `static/site.js` only wires browser
//! events to the rules in [`crate::visibility`] and [`crate::scroll`]:
//!
//! - Sections with `data-reveal` fade in once (`data-threshold`, `data-margin`).
//! - The mission image panel with `data-zoom` scales while scrolling.
//! - Testimonial cards open a `<dialog>` whose player was chosen at build time
//!   by [`crate::video::resolve`].
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/); all interpolation
//! is escaped.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{
    self, ContentError, ContentWarning, FieldKind, FormField, FormSchema, Hero, Link, PageContent,
    RESERVED_SLUG, Section, ServicesPage, SiteContent, Testimonial, TimelineColor,
};
use crate::newsletter::{self, NewsletterArticle};
use crate::video::{self, Playback};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
    pub warnings: Vec<ContentWarning>,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Load config and content from `content_dir` and build the site.
pub fn generate(content_dir: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let config = config::load_config(content_dir)?;
    let content_path = content_dir.join(&config.content_file);
    let (content, warnings) = content::load_content(&content_path)?;

    let mut report = build_site(&content, &config, output_dir)?;
    report.assets_copied = copy_assets(&content_dir.join("assets"), output_dir)?;
    report.warnings = warnings;
    tracing::info!(
        pages = report.pages.len(),
        assets = report.assets_copied,
        "site generated"
    );
    Ok(report)
}

/// Render every page into `output_dir`.
pub fn build_site(
    content: &SiteContent,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let site = Site::new(content, config);
    let mut report = GenerateReport::default();
    fs::create_dir_all(output_dir)?;

    let mut write = |path: String, title: &str, markup: Markup| -> std::io::Result<()> {
        let target = output_dir.join(&path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, markup.into_string())?;
        tracing::debug!(%path, "wrote page");
        report.pages.push(GeneratedPage {
            title: title.to_string(),
            path,
        });
        Ok(())
    };

    write("index.html".into(), "Home", render_home(&site))?;
    for (key, page) in content.pages() {
        write(
            format!("{key}/index.html"),
            &page.hero.title,
            render_page(&site, key, page),
        )?;
    }
    write("faq/index.html".into(), &content.faq.title, render_faq(&site))?;
    if let Some(services) = &content.services {
        write(
            "services/index.html".into(),
            &services.title,
            render_services(&site, services),
        )?;
    }
    write(
        "newsletter/index.html".into(),
        &content.newsletter.hero.title,
        render_newsletter_index(&site),
    )?;

    let mut seen = HashSet::new();
    for article in &content.newsletter.articles {
        let slug = article.slug();
        if !seen.insert(slug) {
            continue;
        }
        let (title, markup) = render_article_route(&site, slug);
        write(format!("newsletter/{slug}/index.html"), &title, markup)?;
    }
    let (title, markup) = render_article_route(&site, RESERVED_SLUG);
    write(
        format!("newsletter/{RESERVED_SLUG}/index.html"),
        &title,
        markup,
    )?;

    Ok(report)
}

/// Copy `assets/` verbatim into the output root. Returns the file count.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let target = output_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Everything a page renderer needs.
struct Site<'a> {
    content: &'a SiteContent,
    config: &'a SiteConfig,
    css: String,
}

impl<'a> Site<'a> {
    fn new(content: &'a SiteContent, config: &'a SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            content,
            config,
            css: format!("{color_css}\n\n{CSS_STATIC}"),
        }
    }
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(site: &Site, title: &str, current: &str, banner: bool, main: Markup) -> Markup {
    let page_title = if title.is_empty() || title == site.content.site.name {
        site.content.site.name.clone()
    } else {
        format!("{title} | {}", site.content.site.name)
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = &site.content.site.description {
                    meta name="description" content=(description);
                }
                title { (page_title) }
                style { (PreEscaped(&site.css)) }
            }
            body {
                (site_header(site, current))
                @if banner && site.config.banner.enabled {
                    (apply_banner(site))
                }
                main { (main) }
                (site_footer(site))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn site_header(site: &Site, current: &str) -> Markup {
    let links = &site.content.navigation.links;
    html! {
        header.site-header {
            a.site-name href="/" { (site.content.site.name) }
            nav.site-nav {
                @for link in links {
                    a class=[(link.href == current).then_some("current")] href=(link.href) { (link.label) }
                }
                a.button href="/apply" { "Apply Now" }
            }
            button.nav-toggle type="button" aria-label="Toggle navigation menu" aria-expanded="false" { "☰" }
        }
        nav.mobile-nav hidden {
            @for link in links {
                a href=(link.href) { (link.label) }
                " "
            }
        }
    }
}

fn apply_banner(site: &Site) -> Markup {
    let banner = &site.config.banner;
    html! {
        div.apply-banner {
            p {
                (banner.text) " "
                a href=(banner.href) { (banner.link_text) }
            }
            button.banner-dismiss type="button" aria-label="Dismiss banner" { "×" }
        }
    }
}

fn site_footer(site: &Site) -> Markup {
    let footer = &site.content.footer;
    html! {
        footer.site-footer {
            div.footer-columns {
                div {
                    h3 { (site.content.site.name) }
                    p { (footer.tagline) }
                }
                @if !footer.social.is_empty() {
                    div {
                        h3 { "Follow Us" }
                        ul {
                            @for social in &footer.social {
                                li { a href=(social.url) target="_blank" rel="noopener" { (social.platform) } }
                            }
                        }
                    }
                }
                @if !footer.quick_links.is_empty() {
                    div {
                        h3 { "Quick Links" }
                        ul {
                            @for link in &footer.quick_links {
                                li { a href=(link.href) { (link.label) } }
                            }
                        }
                    }
                }
            }
            p.copyright { (footer.copyright) }
        }
    }
}

/// Hero title with each word cycling through the three brand colors.
fn hero_title(title: &str) -> Markup {
    const WORD_CLASSES: [&str; 3] = ["word-white", "word-accent", "word-highlight"];
    let words: Vec<&str> = title.split(' ').collect();
    html! {
        h1.hero-title {
            @for (idx, word) in words.iter().enumerate() {
                span class=(WORD_CLASSES[idx % WORD_CLASSES.len()]) { (word) }
                @if idx + 1 < words.len() { " " }
            }
        }
    }
}

fn hero(hero: &Hero) -> Markup {
    let primary = hero.primary_cta.clone().unwrap_or_else(|| Link {
        label: "Join Us".into(),
        href: "/apply".into(),
    });
    let secondary = hero.secondary_cta.clone().unwrap_or_else(|| Link {
        label: "Donate".into(),
        href: "/donate".into(),
    });
    let style = (!hero.image.is_empty()).then(|| format!("--hero-image: url('{}')", hero.image));
    html! {
        section.hero style=[style] {
            div.hero-content {
                (hero_title(&hero.title))
                @if let Some(subtitle) = &hero.subtitle { p.hero-subtitle { (subtitle) } }
                @if let Some(subtitle2) = &hero.subtitle2 { p.hero-subtitle { (subtitle2) } }
                @if let Some(intro) = &hero.intro { p.hero-intro { (intro) } }
                div.hero-actions {
                    a.button href=(primary.href) { (primary.label) }
                    a.button.secondary href=(secondary.href) { (secondary.label) }
                }
            }
        }
    }
}

/// A section that fades in once, configured from `[reveal]`.
fn reveal_section(site: &Site, key: &str, extra_class: Option<&str>, body: Markup) -> Markup {
    let reveal = &site.config.reveal;
    let class = match extra_class {
        Some(extra) => format!("section reveal {extra}"),
        None => "section reveal".to_string(),
    };
    html! {
        section class=(class) data-reveal=(key) data-threshold=(reveal.threshold) data-margin=(reveal.early_margin) {
            (body)
        }
    }
}

/// Inline style staggering a fade-in by `ms` milliseconds.
fn delay(ms: usize) -> Option<String> {
    (ms > 0).then(|| format!("transition-delay: {ms}ms"))
}

fn markdown(text: &str) -> Markup {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(text));
    PreEscaped(out)
}

fn content_section(site: &Site, key: &str, section: &Section) -> Markup {
    reveal_section(
        site,
        key,
        None,
        html! {
            h2.fade { (section.title) }
            @if let Some(subtitle) = &section.subtitle {
                p.fade.subtitle style=[delay(100)] { (subtitle) }
            }
            div.fade style=[delay(200)] { (markdown(&section.content)) }
            @if section.primary_cta.is_some() || section.secondary_cta.is_some() {
                div.fade.section-actions style=[delay(400)] {
                    @if let Some(cta) = &section.primary_cta { a.button href=(cta.href) { (cta.label) } }
                    @if let Some(cta) = &section.secondary_cta { " " a.button.secondary href=(cta.href) { (cta.label) } }
                }
            }
        },
    )
}

fn form_field(field: &FormField) -> Markup {
    let id = format!("field-{}", field.name);
    html! {
        label for=(id) {
            (field.label)
            @match field.kind {
                FieldKind::Textarea => {
                    textarea id=(id) name=(field.name) placeholder=[field.placeholder.as_deref()] required[field.required] disabled rows="5" {}
                }
                FieldKind::Select => {
                    select id=(id) name=(field.name) required[field.required] disabled {
                        @for option in &field.options { option { (option) } }
                    }
                }
                kind => {
                    input id=(id) type=(input_type(kind)) name=(field.name) placeholder=[field.placeholder.as_deref()] required[field.required] disabled;
                }
            }
        }
    }
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Email => "email",
        FieldKind::Tel => "tel",
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        FieldKind::Checkbox => "checkbox",
        FieldKind::Textarea | FieldKind::Select => "text",
    }
}

/// Decorative form: fields render from the schema but nothing submits.
fn placeholder_form(site: &Site, form: &FormSchema) -> Markup {
    reveal_section(
        site,
        "form",
        Some("panel"),
        html! {
            h2.fade { (form.title) }
            @if let Some(description) = &form.description { p.fade { (description) } }
            form.placeholder-form.fade style=[delay(200)] action="#" aria-disabled="true" onsubmit="return false" {
                @for field in &form.fields { (form_field(field)) }
                button.button type="submit" disabled { (form.submit_label) }
                p.form-notice { "Online submissions are not available yet." }
            }
        },
    )
}

fn video_player(source: &video::VideoSource, title: &str) -> Markup {
    match source.playback() {
        Playback::Placeholder => html! {
            div.video-placeholder {
                p { "Video coming soon" }
            }
        },
        Playback::Embed { src, allow } => html! {
            iframe src=(src) title=(title) allow=(allow) allowfullscreen {}
        },
        Playback::Native { src } => html! {
            video src=(src) controls preload="none" {
                "Your browser does not support the video tag."
            }
        },
    }
}

fn testimonial_card(idx: usize, testimonial: &Testimonial) -> Markup {
    let name = testimonial.display_name();
    let source = video::resolve(testimonial.video.as_deref());
    let modal_id = format!("video-{idx}");
    html! {
        button.testimonial.card.fade type="button" data-modal=(modal_id) style=[delay(idx * 250)] {
            img src=(testimonial.thumbnail.as_deref().unwrap_or("/placeholder-user.jpg")) alt=(name) loading="lazy";
            span.quote { "\u{201c}" (testimonial.content) "\u{201d}" }
            span.testimonial-name {
                (name)
                @if let Some(age) = testimonial.age { ", AGE " (age) }
            }
            span.read-more { "Hear her story →" }
        }
        dialog.video-modal id=(modal_id) data-video-kind=(source.kind.label()) {
            button.modal-close type="button" aria-label="Close modal" { "×" }
            (video_player(&source, name))
        }
    }
}

fn article_excerpt(site: &Site, article: &NewsletterArticle) -> Markup {
    let excerpt = newsletter::excerpt(&article.description, site.config.newsletter.excerpt_length);
    html! {
        article {
            h3 { a href=(article.url) { (article.title) } }
            p {
                (excerpt.text)
                @if excerpt.truncated {
                    "... "
                    a.read-more href=(article.url) { "Read more" }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(site: &Site) -> Markup {
    let home = &site.content.home;
    let zoom = &site.config.zoom;
    let mission = &home.mission;
    let main = html! {
        (hero(&home.hero))

        (reveal_section(site, "mission", Some("panel"), html! {
            h2.fade { (mission.title) }
            p.fade style=[delay(200)] { (mission.content) }
        }))

        section.section.zoom-panel data-zoom data-zoom-base=(zoom.base_scale) data-zoom-max=(zoom.max_scale) {
            div.zoom-frame {
                div.zoom-target style=[mission.image2.as_ref().map(|img| format!("background-image: url('{img}')"))] {}
            }
            div.panel {
                h2 { (mission.title2.as_deref().unwrap_or(&mission.title)) }
                a.button href="/about" { "Learn More" }
            }
        }

        @if !home.stats.is_empty() {
            (reveal_section(site, "stats", None, html! {
                div.stats {
                    @for (idx, stat) in home.stats.iter().enumerate() {
                        div.fade style=[delay(idx * 200)] {
                            div.stat-value { (stat.value) }
                            div.stat-label { (stat.label) }
                        }
                    }
                }
            }))
        }

        @if let Some(services) = &home.services {
            (reveal_section(site, "services", None, html! {
                h2.fade { (services.title) }
                div.cards {
                    @for (idx, item) in services.items.iter().enumerate() {
                        div.card.fade style=[delay(idx * 250)] {
                            @if let Some(image) = &item.image { img src=(image) alt=(item.title) loading="lazy"; }
                            h3 { (item.title) }
                            p { (item.description) }
                        }
                    }
                }
            }))
        }

        @if !site.content.timeline.is_empty() {
            div.timeline {
                @for (idx, entry) in site.content.timeline.iter().enumerate() {
                    (reveal_section(site, &format!("timeline-{idx}"), None, html! {
                        div class=(format!("timeline-entry {}", timeline_class(entry.color))) {
                            div.fade {
                                span.timeline-label { (entry.label) }
                                h3 { (entry.title) }
                                p { (entry.description) }
                                @if let Some(location) = &entry.location { p.location { (location) } }
                            }
                            img.fade style=[delay(200)] src=(entry.image) alt=(entry.title) loading="lazy";
                        }
                    }))
                }
            }
        }

        (reveal_section(site, "testimonials", None, html! {
            h2.fade { (home.testimonials.title) }
            div.cards {
                @for (idx, testimonial) in home.testimonials.items.iter().enumerate() {
                    (testimonial_card(idx, testimonial))
                }
            }
        }))

        (reveal_section(site, "cta", Some("panel"), html! {
            h2.fade { (home.call_to_action.title) }
            p.fade style=[delay(200)] { (home.call_to_action.content) }
            div.fade.section-actions style=[delay(400)] {
                @for button in &home.call_to_action.buttons {
                    a.button href=(button.href) { (button.label) } " "
                }
            }
        }))

        @if !site.content.newsletter.articles.is_empty() {
            (reveal_section(site, "newsletter", None, html! {
                h2.fade { (site.content.newsletter.hero.title) }
                div.articles.fade style=[delay(200)] {
                    @for article in site.content.newsletter.articles.iter().take(3) {
                        (article_excerpt(site, article))
                    }
                }
                a.button href="/newsletter" { "All Newsletters" }
            }))
        }
    };
    base_document(site, &site.content.site.name, "/", true, main)
}

fn timeline_class(color: TimelineColor) -> &'static str {
    match color {
        TimelineColor::Yellow => "yellow",
        TimelineColor::Pink => "pink",
    }
}

/// Hero, sections, and optional placeholder form.
fn render_page(site: &Site, key: &str, page: &PageContent) -> Markup {
    let main = html! {
        (hero(&page.hero))
        @for (idx, section) in page.sections.iter().enumerate() {
            (content_section(site, &format!("section-{idx}"), section))
        }
        @if let Some(form) = &page.form {
            (placeholder_form(site, form))
        }
    };
    base_document(site, &page.hero.title, &format!("/{key}"), false, main)
}

fn render_faq(site: &Site) -> Markup {
    let faq = &site.content.faq;
    let main = html! {
        section.section.panel {
            h1 { (faq.title) }
            @if let Some(subtitle) = &faq.subtitle { p.subtitle { (subtitle) } }
            @if let Some(intro) = &faq.intro { p { (intro) } }
        }
        section.section.faq {
            @for item in &faq.items {
                details {
                    summary { (item.question) }
                    (markdown(&item.answer))
                }
            }
        }
    };
    base_document(site, &faq.title, "/faq", false, main)
}

fn render_services(site: &Site, services: &ServicesPage) -> Markup {
    let main = html! {
        section.section.panel {
            h1 { (services.title) }
            @if let Some(subtitle) = &services.subtitle { p.subtitle { (subtitle) } }
            @if let Some(intro) = &services.intro { p { (intro) } }
        }
        (reveal_section(site, "services", None, html! {
            div.cards {
                @for (idx, category) in services.categories.iter().enumerate() {
                    div.card.fade style=[delay(idx * 250)] {
                        h2 { (category.name) }
                        ul {
                            @for item in &category.items { li { (item) } }
                        }
                    }
                }
            }
        }))
    };
    base_document(site, &services.title, "/services", false, main)
}

fn render_newsletter_index(site: &Site) -> Markup {
    let newsletter = &site.content.newsletter;
    let main = html! {
        (hero(&newsletter.hero))
        @for (idx, section) in newsletter.sections.iter().enumerate() {
            (content_section(site, &format!("section-{idx}"), section))
        }
        section.section.articles {
            h2 { "Latest Announcements & Articles" }
            @if newsletter.articles.is_empty() {
                p { "No newsletters have been published yet." }
            }
            @for article in &newsletter.articles {
                (article_excerpt(site, article))
            }
        }
    };
    base_document(site, &newsletter.hero.title, "/newsletter", false, main)
}

/// Detail page for `slug`, or the not-found page. Returns the page title too.
fn render_article_route(site: &Site, slug: &str) -> (String, Markup) {
    match newsletter::find_article(&site.content.newsletter.articles, slug) {
        Some(article) => (article.title.clone(), render_article(site, article)),
        None => ("Article Not Found".to_string(), render_article_not_found(site)),
    }
}

fn back_to_newsletter() -> Markup {
    html! { a.button href="/newsletter" { "← Back to Newsletter" } }
}

fn render_article(site: &Site, article: &NewsletterArticle) -> Markup {
    let article_hero = Hero {
        image: site.content.newsletter.hero.image.clone(),
        title: article.title.clone(),
        subtitle: Some("Newsletter Article".to_string()),
        subtitle2: None,
        intro: Some(article.description.clone()),
        primary_cta: None,
        secondary_cta: None,
    };
    let main = html! {
        (hero(&article_hero))
        section.section {
            div.card {
                div.article-header {
                    h2 { (article.title) }
                    (back_to_newsletter())
                }
                @if let Some(image) = &article.pdf {
                    img.newsletter-image src=(image) alt=(article.title) width="1200" height="1600";
                } @else {
                    p { "Newsletter image not available." }
                }
            }
        }
    };
    base_document(site, &article.title, "/newsletter", false, main)
}

fn render_article_not_found(site: &Site) -> Markup {
    let main = html! {
        section.section.not-found {
            h1 { "Article Not Found" }
            p { "The newsletter article you're looking for doesn't exist." }
            (back_to_newsletter())
        }
    };
    base_document(site, "Article Not Found", "/newsletter", false, main)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_content, setup_fixtures};
    use tempfile::TempDir;

    fn with_site<R>(f: impl FnOnce(&Site) -> R) -> R {
        let content = sample_content();
        let config = SiteConfig::default();
        let site = Site::new(&content, &config);
        f(&site)
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn hero_title_cycles_word_colors() {
        let html = hero_title("Find Your New Purpose").into_string();
        assert_eq!(html.matches("word-white").count(), 2);
        assert_eq!(html.matches("word-accent").count(), 1);
        assert_eq!(html.matches("word-highlight").count(), 1);
    }

    #[test]
    fn hero_defaults_ctas() {
        let h = Hero {
            image: String::new(),
            title: "T".into(),
            subtitle: None,
            subtitle2: None,
            intro: None,
            primary_cta: None,
            secondary_cta: None,
        };
        let html = hero(&h).into_string();
        assert!(html.contains(r#"href="/apply""#));
        assert!(html.contains(r#"href="/donate""#));
        assert!(!html.contains("--hero-image"));
    }

    #[test]
    fn reveal_section_carries_config() {
        with_site(|site| {
            let html = reveal_section(site, "mission", None, html! { p { "x" } }).into_string();
            assert!(html.contains(r#"data-reveal="mission""#));
            assert!(html.contains(r#"data-threshold="0.05""#));
            assert!(html.contains(r#"data-margin="200""#));
        });
    }

    #[test]
    fn delay_omitted_for_zero() {
        assert_eq!(delay(0), None);
        assert_eq!(delay(250).as_deref(), Some("transition-delay: 250ms"));
    }

    #[test]
    fn testimonial_youtube_embeds_iframe() {
        let t: Testimonial = serde_json::from_str(
            r#"{"name": "Maria", "age": 34, "content": "Hope", "video": "https://youtu.be/xyz789"}"#,
        )
        .unwrap();
        let html = testimonial_card(1, &t).into_string();
        assert!(html.contains("https://www.youtube.com/embed/xyz789"));
        assert!(html.contains("Maria, AGE 34"));
        assert!(html.contains("transition-delay: 250ms"));
        assert!(html.contains(r#"id="video-1""#));
    }

    #[test]
    fn testimonial_without_video_gets_placeholder() {
        let t: Testimonial = serde_json::from_str(r#"{"title": "Alumna", "content": "Hope"}"#).unwrap();
        let html = testimonial_card(0, &t).into_string();
        assert!(html.contains("video-placeholder"));
        assert!(!html.contains("<iframe"));
        assert!(html.contains("/placeholder-user.jpg"));
    }

    #[test]
    fn testimonial_direct_file_uses_video_tag() {
        let t: Testimonial =
            serde_json::from_str(r#"{"name": "Ana", "content": "Hope", "video": "/v/ana.mp4"}"#)
                .unwrap();
        let html = testimonial_card(0, &t).into_string();
        assert!(html.contains(r#"<video src="/v/ana.mp4""#));
        assert!(html.contains(r#"data-video-kind="file""#));
    }

    #[test]
    fn form_fields_render_disabled() {
        let form: FormSchema = serde_json::from_str(
            r#"{"title": "Apply", "fields": [
                {"name": "email", "label": "Email", "type": "email", "required": true},
                {"name": "why", "label": "Why", "type": "textarea"},
                {"name": "ref", "label": "Ref", "type": "select", "options": ["A", "B"]}
            ]}"#,
        )
        .unwrap();
        with_site(|site| {
            let html = placeholder_form(site, &form).into_string();
            assert!(html.contains(r#"type="email""#));
            assert!(html.contains("required"));
            assert!(html.contains("<textarea"));
            assert!(html.contains("<option>B</option>"));
            assert!(html.contains("Submit"));
            assert!(html.matches("disabled").count() >= 4);
        });
    }

    #[test]
    fn excerpt_links_read_more_when_long() {
        with_site(|site| {
            let article = &site.content.newsletter.articles[0];
            let html = article_excerpt(site, article).into_string();
            assert!(html.contains("Read more"));
            let short = &site.content.newsletter.articles[1];
            let html = article_excerpt(site, short).into_string();
            assert!(!html.contains("Read more"));
        });
    }

    #[test]
    fn markdown_renders_inline_formatting() {
        let html = markdown("Women **committed** to sobriety.").into_string();
        assert!(html.contains("<strong>committed</strong>"));
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn home_has_reveal_regions_and_zoom() {
        with_site(|site| {
            let html = render_home(site).into_string();
            for key in ["mission", "stats", "testimonials", "cta", "newsletter", "timeline-0", "timeline-2"] {
                assert!(html.contains(&format!(r#"data-reveal="{key}""#)), "missing {key}");
            }
            assert!(html.contains(r#"data-zoom-max="1.3""#));
            assert!(html.contains(r#"<div class="apply-banner">"#));
            assert!(html.starts_with("<!DOCTYPE html>"));
        });
    }

    #[test]
    fn banner_can_be_disabled() {
        let content = sample_content();
        let mut config = SiteConfig::default();
        config.banner.enabled = false;
        let site = Site::new(&content, &config);
        let html = render_home(&site).into_string();
        assert!(!html.contains(r#"class="apply-banner""#));
        assert!(!html.contains("banner-dismiss\" type"));
    }

    #[test]
    fn article_route_found() {
        with_site(|site| {
            let (title, markup) = render_article_route(site, "September-2025");
            assert_eq!(title, "September 2025");
            let html = markup.into_string();
            assert!(html.contains("/newsletters/september-2025.png"));
            assert!(html.contains("Newsletter Article"));
        });
    }

    #[test]
    fn article_without_image() {
        with_site(|site| {
            let (_, markup) = render_article_route(site, "August-2025");
            assert!(markup.into_string().contains("Newsletter image not available."));
        });
    }

    #[test]
    fn article_route_not_found() {
        with_site(|site| {
            let (title, markup) = render_article_route(site, "Oct-2025");
            assert_eq!(title, "Article Not Found");
            let html = markup.into_string();
            assert!(html.contains("Article Not Found"));
            assert!(html.contains(r#"href="/newsletter""#));
        });
    }

    #[test]
    fn nav_marks_current_page() {
        with_site(|site| {
            let html = render_faq(site).into_string();
            assert!(html.contains(r#"<a class="current" href="/faq">"#));
        });
    }

    // =========================================================================
    // Full build
    // =========================================================================

    #[test]
    fn build_writes_every_page() {
        let out = TempDir::new().unwrap();
        let content = sample_content();
        let report = build_site(&content, &SiteConfig::default(), out.path()).unwrap();

        for path in [
            "index.html",
            "about/index.html",
            "programs/index.html",
            "apply/index.html",
            "donate/index.html",
            "contact/index.html",
            "faq/index.html",
            "services/index.html",
            "newsletter/index.html",
            "newsletter/September-2025/index.html",
            "newsletter/August-2025/index.html",
            "newsletter/not-found/index.html",
        ] {
            assert!(out.path().join(path).is_file(), "missing {path}");
            assert!(report.pages.iter().any(|p| p.path == path));
        }
    }

    #[test]
    fn services_page_lists_categories() {
        with_site(|site| {
            let services = site.content.services.as_ref().unwrap();
            let html = render_services(site, services).into_string();
            assert!(html.contains("<h2>Housing</h2>"));
            assert!(html.contains("<li>Budgeting classes</li>"));
            assert!(html.contains(r#"data-reveal="services""#));
        });
    }

    #[test]
    fn services_page_skipped_when_absent() {
        let out = TempDir::new().unwrap();
        let mut content = sample_content();
        content.services = None;
        let report = build_site(&content, &SiteConfig::default(), out.path()).unwrap();
        assert!(!out.path().join("services").exists());
        assert!(report.pages.iter().all(|p| p.path != "services/index.html"));
    }

    #[test]
    fn duplicate_slug_written_once_with_first_article() {
        let out = TempDir::new().unwrap();
        let mut content = sample_content();
        let mut dup = content.newsletter.articles[0].clone();
        dup.title = "Shadowed".into();
        content.newsletter.articles.push(dup);

        let report = build_site(&content, &SiteConfig::default(), out.path()).unwrap();
        let count = report
            .pages
            .iter()
            .filter(|p| p.path == "newsletter/September-2025/index.html")
            .count();
        assert_eq!(count, 1);
        let html = fs::read_to_string(out.path().join("newsletter/September-2025/index.html")).unwrap();
        assert!(!html.contains("Shadowed"));
    }

    #[test]
    fn generate_copies_assets() {
        let src = setup_fixtures();
        let out = TempDir::new().unwrap();
        let report = generate(src.path(), out.path()).unwrap();
        assert_eq!(report.assets_copied, 1);
        assert!(out.path().join("extra.css").is_file());
        assert!(report.warnings.is_empty());
    }
}
