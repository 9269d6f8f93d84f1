//! Shared test utilities.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let report = generate(tmp.path(), &out).unwrap();
//!
//! let content = sample_content();
//! assert_eq!(content.site.name, "New Purpose Recovery House");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::content::{SiteContent, load_content};
use crate::simulate::PageLayout;

// =========================================================================
// Fixture setup
// =========================================================================

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir().join("content"), tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Parsed fixtures
// =========================================================================

pub fn fixture_content_path() -> PathBuf {
    fixtures_dir().join("content/content.json")
}

/// The fixture `content.json`, parsed and validated.
pub fn sample_content() -> SiteContent {
    let (content, _warnings) = load_content(&fixture_content_path()).unwrap();
    content
}

/// The fixture page layout used by scroll simulation tests.
pub fn sample_layout() -> PageLayout {
    PageLayout::load(&fixtures_dir().join("layout.json")).unwrap()
}
