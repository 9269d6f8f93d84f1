//! # Purpose Site
//!
//! Static site builder for the New Purpose Recovery House, a sober-living
//! home for women. All copy lives in one `content.json`; the builder turns it
//! into a set of plain HTML pages with a small script for scroll effects.
//!
//! # Architecture
//!
//! ```text
//! content/site.toml     →  SiteConfig    (reveal, zoom, banner, colors)
//! content/content.json  →  SiteContent   (pages, testimonials, articles)
//!                       →  dist/         (HTML + copied assets)
//! ```
//!
//! The browser-side behavior is small but has exact rules, and those rules
//! live here as plain Rust so they can be tested and simulated:
//!
//! - [`visibility`]: a section fades in the first time enough of it is on
//!   screen and never fades out again.
//! - [`scroll`]: the mission image scales from 1.0 to 1.3 while it crosses
//!   the viewport.
//! - [`video`]: testimonial video URLs classify into YouTube, Vimeo, a
//!   direct file, or nothing.
//! - [`newsletter`]: article detail pages are looked up by slug.
//!
//! The `simulate` command drives the reveal and zoom rules against a
//! measured page layout without a browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, stock defaults, validation, and CSS color variables |
//! | [`content`] | `content.json` data model and cross-record validation |
//! | [`generate`] | Renders every page with Maud and copies assets |
//! | [`visibility`] | One-way reveal flags driven by intersection reports |
//! | [`scroll`] | Scroll-linked zoom scale |
//! | [`video`] | Testimonial video URL classification |
//! | [`newsletter`] | Article slugs, lookup, and listing excerpts |
//! | [`simulate`] | Scrolls a page layout through the reveal and zoom rules |
//! | [`output`] | CLI output formatting |

pub mod config;
pub mod content;
pub mod generate;
pub mod newsletter;
pub mod output;
pub mod scroll;
pub mod simulate;
pub mod video;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_helpers;
