//! Shared test utilities for the neyna-site test suite.
//!
//! Provides fixture setup and lookup helpers over discovery data
//! (`Catalog`, `FileItem`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let discovery = discover(&public_root(&tmp), &LayoutConfig::default()).unwrap();
//!
//! let invoice = find_item(&discovery.catalog, "invoice.pdf");
//! assert_eq!(invoice.path, "/pdfs/invoice.pdf");
//! assert_eq!(names(&discovery.catalog.images), vec!["logo.png", "workshop.jpg"]);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::types::{Catalog, FileItem};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
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

/// The public root inside a fixture copy.
pub fn public_root(site: &TempDir) -> PathBuf {
    site.path().join("public")
}

// =========================================================================
// Catalog lookups
// =========================================================================

/// Find an item by file name in either section. Panics if not found.
pub fn find_item<'a>(catalog: &'a Catalog, name: &str) -> &'a FileItem {
    catalog.iter().find(|i| i.name == name).unwrap_or_else(|| {
        let available: Vec<&str> = catalog.iter().map(|i| i.name.as_str()).collect();
        panic!("item '{name}' not found. Available: {available:?}")
    })
}

/// Names of a list of items, in order.
pub fn names(items: &[FileItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}
