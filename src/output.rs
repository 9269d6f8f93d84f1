//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what an entity *is* (page title, testimonial name,
//! region) and shows paths or derived values as secondary context on
//! indented lines. The output reads as a content inventory first.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Site
//!     New Purpose Recovery House
//!
//! Pages
//! 001 About Us (2 sections)
//!     Route: /about
//! 002 Apply for Residency (1 section)
//!     Route: /apply
//!     Form: Residency Application (6 fields)
//!
//! Testimonials
//! 001 Maria
//!     Video: youtube abc123
//!
//! Newsletter
//! 001 September 2025
//!     Route: /newsletter/September-2025
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Home → index.html
//! 002 About Us → about/index.html
//!
//! Generated 12 pages, 1 asset
//! ```
//!
//! ## Simulate
//!
//! ```text
//! Viewport 1280x800, page height 4220px
//!
//! Reveals
//!     mission at 350px
//!     stats at 750px
//!
//! Zoom
//!     0px: 1.000
//!     850px: 1.008
//!     1500px: 1.189
//!
//! Still hidden
//!     late-widget
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::content::{ContentWarning, SiteContent};
use crate::generate::GenerateReport;
use crate::simulate::SimulationReport;
use crate::video::{self, VideoKind, VideoSource};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn warning_lines(warnings: &[ContentWarning]) -> Vec<String> {
    warnings.iter().map(|w| format!("Warning: {w}")).collect()
}

// ============================================================================
// check
// ============================================================================

/// Inventory of a validated content file.
pub fn format_check_output(content: &SiteContent, warnings: &[ContentWarning]) -> Vec<String> {
    let mut lines = vec![
        "Site".to_string(),
        format!("{}{}", indent(1), content.site.name),
    ];

    lines.push(String::new());
    lines.push("Pages".to_string());
    for (i, (key, page)) in content.pages().iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            page.hero.title,
            plural(page.sections.len(), "section")
        ));
        lines.push(format!("{}Route: /{}", indent(1), key));
        if let Some(form) = &page.form {
            lines.push(format!(
                "{}Form: {} ({})",
                indent(1),
                form.title,
                plural(form.fields.len(), "field")
            ));
        }
    }

    lines.push(String::new());
    lines.push("Timeline".to_string());
    for (i, entry) in content.timeline.iter().enumerate() {
        lines.push(format!("{} {} {}", format_index(i + 1), entry.label, entry.title));
    }

    lines.push(String::new());
    lines.push("Testimonials".to_string());
    for (i, testimonial) in content.home.testimonials.items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), testimonial.display_name()));
        let source = video::resolve(testimonial.video.as_deref());
        match (source.kind, &source.embed_id, &source.raw_url) {
            (VideoKind::None, _, _) => {}
            (kind, Some(id), _) => {
                lines.push(format!("{}Video: {} {}", indent(1), kind.label(), id))
            }
            (kind, None, Some(url)) => {
                lines.push(format!("{}Video: {} {}", indent(1), kind.label(), url))
            }
            (_, None, None) => {}
        }
    }

    if let Some(services) = &content.services {
        lines.push(String::new());
        lines.push("Services".to_string());
        for (i, category) in services.categories.iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                category.name,
                plural(category.items.len(), "item")
            ));
        }
    }

    lines.push(String::new());
    lines.push("FAQ".to_string());
    lines.push(format!("{}{}", indent(1), plural(content.faq.items.len(), "question")));

    lines.push(String::new());
    lines.push("Newsletter".to_string());
    for (i, article) in content.newsletter.articles.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), article.title));
        lines.push(format!("{}Route: {}", indent(1), article.url));
        if article.pdf.is_none() {
            lines.push(format!("{}No image", indent(1)));
        }
    }

    if !warnings.is_empty() {
        lines.push(String::new());
        lines.extend(warning_lines(warnings));
    }
    lines
}

pub fn print_check_output(content: &SiteContent, warnings: &[ContentWarning]) {
    for line in format_check_output(content, warnings) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Written pages, each with its output path.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("{} {} \u{2192} {}", format_index(i + 1), page.title, page.path))
        .collect();

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.extend(warning_lines(&report.warnings));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.assets_copied, "asset")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// simulate
// ============================================================================

/// Reveal timeline and zoom samples from a scroll simulation.
///
/// Zoom lines are printed only when the scale changed from the previous frame.
pub fn format_simulation(report: &SimulationReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Viewport {}x{}, page height {}px",
        report.viewport.width, report.viewport.height, report.page_height
    )];

    lines.push(String::new());
    lines.push("Reveals".to_string());
    if report.reveals.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for event in &report.reveals {
        lines.push(format!("{}{} at {}px", indent(1), event.region, event.offset));
    }

    let mut last_scale = None;
    let mut zoom_lines = Vec::new();
    for frame in &report.frames {
        if let Some(scale) = frame.scale
            && last_scale != Some(scale)
        {
            zoom_lines.push(format!("{}{}px: {:.3}", indent(1), frame.offset, scale));
            last_scale = Some(scale);
        }
    }
    if !zoom_lines.is_empty() {
        lines.push(String::new());
        lines.push("Zoom".to_string());
        lines.extend(zoom_lines);
    }

    if !report.hidden.is_empty() {
        lines.push(String::new());
        lines.push("Still hidden".to_string());
        for region in &report.hidden {
            lines.push(format!("{}{}", indent(1), region));
        }
    }
    lines
}

pub fn print_simulation(report: &SimulationReport) {
    for line in format_simulation(report) {
        println!("{}", line);
    }
}

// ============================================================================
// video
// ============================================================================

/// How a testimonial video URL resolves.
pub fn format_video(source: &VideoSource) -> Vec<String> {
    let mut lines = vec![format!("Kind: {}", source.kind.label())];
    if let Some(id) = &source.embed_id {
        lines.push(format!("Id: {}", id));
    }
    match source.playback() {
        video::Playback::Placeholder => lines.push("Player: placeholder".to_string()),
        video::Playback::Embed { src, .. } => lines.push(format!("Embed: {}", src)),
        video::Playback::Native { src } => lines.push(format!("Source: {}", src)),
    }
    lines
}

pub fn print_video(source: &VideoSource) {
    for line in format_video(source) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::{sample_content, sample_layout};

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn plural_handles_one() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "field"), "3 fields");
    }

    // =========================================================================
    // check
    // =========================================================================

    #[test]
    fn check_lists_pages_and_forms() {
        let content = sample_content();
        let lines = format_check_output(&content, &[]);
        assert_eq!(lines[0], "Site");
        assert_eq!(lines[1], "    New Purpose Recovery House");
        assert!(lines.iter().any(|l| l == "    Route: /apply"));
        assert!(lines.iter().any(|l| l == "    Form: Residency Application (6 fields)"));
    }

    #[test]
    fn check_shows_video_ids() {
        let content = sample_content();
        let lines = format_check_output(&content, &[]);
        assert!(lines.iter().any(|l| l == "    Video: youtube abc123"));
        assert!(lines.iter().any(|l| l == "    Video: vimeo 12345"));
    }

    #[test]
    fn check_flags_articles_without_image() {
        let content = sample_content();
        let lines = format_check_output(&content, &[]);
        let idx = lines.iter().position(|l| l == "002 August 2025").unwrap();
        assert_eq!(lines[idx + 1], "    Route: /newsletter/August-2025");
        assert_eq!(lines[idx + 2], "    No image");
    }

    #[test]
    fn check_lists_service_categories() {
        let content = sample_content();
        let lines = format_check_output(&content, &[]);
        let idx = lines.iter().position(|l| l == "Services").unwrap();
        assert_eq!(lines[idx + 1], "001 Housing (3 items)");
        assert_eq!(lines[idx + 2], "002 Life Skills (2 items)");
    }

    #[test]
    fn check_appends_warnings() {
        let content = sample_content();
        let warnings = vec![ContentWarning::DuplicateSlug("dup".into())];
        let lines = format_check_output(&content, &warnings);
        assert!(lines.last().unwrap().starts_with("Warning: "));
        assert!(lines.last().unwrap().contains("dup"));
    }

    // =========================================================================
    // build
    // =========================================================================

    #[test]
    fn generate_output_lists_pages() {
        let report = GenerateReport {
            pages: vec![
                GeneratedPage {
                    title: "Home".into(),
                    path: "index.html".into(),
                },
                GeneratedPage {
                    title: "About Us".into(),
                    path: "about/index.html".into(),
                },
            ],
            assets_copied: 1,
            warnings: vec![],
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "001 Home \u{2192} index.html");
        assert_eq!(lines[1], "002 About Us \u{2192} about/index.html");
        assert_eq!(lines.last().unwrap(), "Generated 2 pages, 1 asset");
    }

    // =========================================================================
    // simulate
    // =========================================================================

    #[test]
    fn simulation_lists_reveals_and_hidden() {
        let report =
            crate::simulate::simulate(&sample_layout(), &SiteConfig::default(), 50.0).unwrap();
        let lines = format_simulation(&report);
        assert!(lines[0].starts_with("Viewport 1280x800"));
        assert!(lines.iter().any(|l| l == "    mission at 350px"));
        assert!(lines.iter().any(|l| l == "    stats at 750px"));
        let hidden = lines.iter().position(|l| l == "Still hidden").unwrap();
        assert_eq!(lines[hidden + 1], "    late-widget");
    }

    #[test]
    fn simulation_zoom_lines_dedupe_scale() {
        let report =
            crate::simulate::simulate(&sample_layout(), &SiteConfig::default(), 50.0).unwrap();
        let lines = format_simulation(&report);
        let zoom = lines.iter().position(|l| l == "Zoom").unwrap();
        assert_eq!(lines[zoom + 1], "    0px: 1.000");
        let samples: Vec<_> = lines[zoom + 1..]
            .iter()
            .take_while(|l| l.starts_with("    ") && l.contains("px: "))
            .collect();
        assert!(samples.len() > 1);
        assert!(samples.len() < report.frames.len());
    }

    // =========================================================================
    // video
    // =========================================================================

    #[test]
    fn video_youtube() {
        let source = video::resolve(Some("https://youtu.be/xyz789"));
        assert_eq!(
            format_video(&source),
            vec![
                "Kind: youtube",
                "Id: xyz789",
                "Embed: https://www.youtube.com/embed/xyz789"
            ]
        );
    }

    #[test]
    fn video_missing() {
        let source = video::resolve(None);
        assert_eq!(format_video(&source), vec!["Kind: none", "Player: placeholder"]);
    }

    #[test]
    fn video_direct_file() {
        let source = video::resolve(Some("/videos/ana.mp4"));
        assert_eq!(
            format_video(&source),
            vec!["Kind: file", "Source: /videos/ana.mp4"]
        );
    }
}
