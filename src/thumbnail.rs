//! Per-item thumbnail state.
//!
//! Images are their own thumbnail; documents show their first page. A
//! thumbnail that fails to load is replaced by the generic icon for its
//! kind. Failure is a flag on the item's path, never a change to the item,
//! and never affects other items.

use crate::discover::public_file;
use crate::types::{Catalog, FileItem, FileKind};
use std::collections::HashSet;
use std::path::Path;

/// What to draw on a catalog card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Image { src: String },
    /// First page of a document, embedded by the browser's viewer.
    Page { src: String },
    Icon(FileKind),
}

#[derive(Debug, Clone, Default)]
pub struct ThumbnailTracker {
    failed: HashSet<String>,
}

impl ThumbnailTracker {
    pub fn mark_failed(&mut self, path: &str) {
        if self.failed.insert(path.to_string()) {
            tracing::debug!(path, "thumbnail failed, using icon");
        }
    }

    pub fn clear(&mut self, path: &str) {
        self.failed.remove(path);
    }

    pub fn is_failed(&self, path: &str) -> bool {
        self.failed.contains(path)
    }

    /// The item's thumbnail unless it is missing or flagged, else the icon.
    pub fn resolve(&self, item: &FileItem) -> Thumbnail {
        let kind = item.kind();
        match &item.thumbnail {
            Some(src) if !self.is_failed(&item.path) => match kind {
                FileKind::Image => Thumbnail::Image { src: src.clone() },
                FileKind::Document => Thumbnail::Page {
                    src: format!("{src}#page=1"),
                },
            },
            _ => Thumbnail::Icon(kind),
        }
    }

    /// Forget flags for paths no longer in the catalog.
    pub fn retain(&mut self, catalog: &Catalog) {
        let live: HashSet<&str> = catalog.iter().map(|i| i.path.as_str()).collect();
        self.failed.retain(|p| live.contains(p.as_str()));
    }

    /// Flag every item whose thumbnail file is missing or empty on disk,
    /// and clear the flag of any that has become readable.
    ///
    /// `public_root` is the directory the catalog paths are relative to.
    pub fn check_files(&mut self, catalog: &Catalog, public_root: &Path) {
        for item in catalog.iter() {
            let Some(thumb) = &item.thumbnail else {
                continue;
            };
            let readable = std::fs::metadata(public_file(public_root, thumb))
                .map(|m| m.is_file() && m.len() > 0)
                .unwrap_or(false);
            if readable {
                self.clear(&item.path);
            } else {
                self.mark_failed(&item.path);
            }
        }
    }
}
