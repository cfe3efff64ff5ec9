//! Catalog types shared by discovery, filtering, preview and generation.
//!
//! The catalog is serialized to `catalog.json` in the output directory and
//! read back by the downloads page when it polls for new files, so the field
//! names here are part of the page script's contract.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Which side of the catalog an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Document,
    Image,
}

impl FileKind {
    /// Short label shown on cards and in CLI output.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Document => "PDF",
            FileKind::Image => "Image",
        }
    }
}

/// A single catalog entry.
///
/// `name` is the display name including its extension; `path` is the public
/// URL path of the asset (`/pdfs/invoice.pdf`). Both are fixed once
/// discovered. Identity within a catalog is the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl FileItem {
    /// Item whose thumbnail is the asset itself, as discovery produces them.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: name.into(),
            thumbnail: Some(path.clone()),
            path,
        }
    }

    /// Documents are recognized by a `.pdf` name or a path under `/pdfs/`.
    pub fn kind(&self) -> FileKind {
        if self.name.to_lowercase().ends_with(".pdf") || self.path.contains("/pdfs/") {
            FileKind::Document
        } else {
            FileKind::Image
        }
    }

    pub fn is_document(&self) -> bool {
        self.kind() == FileKind::Document
    }
}

/// Documents and images, each in discovery order.
///
/// Rebuilt wholesale on every discovery cycle; nothing is merged across
/// refreshes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub documents: Vec<FileItem>,
    pub images: Vec<FileItem>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len() + self.images.len()
    }

    /// All items, documents first.
    pub fn iter(&self) -> impl Iterator<Item = &FileItem> {
        self.documents.iter().chain(self.images.iter())
    }

    pub fn find_by_path(&self, path: &str) -> Option<&FileItem> {
        self.iter().find(|item| item.path == path)
    }

    /// Short fingerprint of the catalog's paths.
    ///
    /// Two catalogs with the same items in the same order share a version.
    /// The page script compares versions to decide whether to re-render.
    pub fn version(&self) -> String {
        let mut hasher = Sha256::new();
        for (section, items) in [("d", &self.documents), ("i", &self.images)] {
            for item in items {
                hasher.update(section.as_bytes());
                hasher.update(item.path.as_bytes());
                hasher.update([0u8]);
            }
        }
        let digest = hasher.finalize();
        digest
            .iter()
            .take(8)
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

/// The `catalog.json` document published next to the pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedCatalog {
    pub version: String,
    pub documents: Vec<PublishedItem>,
    pub images: Vec<PublishedItem>,
}

/// Catalog entry plus the URL of its generated preview page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedItem {
    #[serde(flatten)]
    pub item: FileItem,
    pub preview: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_extension() {
        assert_eq!(FileItem::new("Invoice.PDF", "/x/Invoice.PDF").kind(), FileKind::Document);
        assert_eq!(FileItem::new("logo.png", "/images/logo.png").kind(), FileKind::Image);
    }

    #[test]
    fn kind_from_pdfs_directory() {
        let item = FileItem::new("brochure", "/pdfs/brochure");
        assert!(item.is_document());
    }

    #[test]
    fn new_uses_path_as_thumbnail() {
        let item = FileItem::new("logo.png", "/images/logo.png");
        assert_eq!(item.thumbnail.as_deref(), Some("/images/logo.png"));
    }

    #[test]
    fn version_is_stable_for_equal_catalogs() {
        let a = Catalog {
            documents: vec![FileItem::new("a.pdf", "/pdfs/a.pdf")],
            images: vec![FileItem::new("b.png", "/images/b.png")],
        };
        let b = a.clone();
        assert_eq!(a.version(), b.version());
        assert_eq!(a.version().len(), 16);
    }

    #[test]
    fn version_changes_when_items_change() {
        let a = Catalog {
            documents: vec![FileItem::new("a.pdf", "/pdfs/a.pdf")],
            images: vec![],
        };
        let mut b = a.clone();
        b.images.push(FileItem::new("c.png", "/images/c.png"));
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn version_distinguishes_sections() {
        let item = FileItem::new("a", "/a");
        let as_doc = Catalog {
            documents: vec![item.clone()],
            images: vec![],
        };
        let as_img = Catalog {
            documents: vec![],
            images: vec![item],
        };
        assert_ne!(as_doc.version(), as_img.version());
    }

    #[test]
    fn find_by_path_searches_both_sections() {
        let catalog = Catalog {
            documents: vec![FileItem::new("a.pdf", "/pdfs/a.pdf")],
            images: vec![FileItem::new("b.png", "/images/b.png")],
        };
        assert_eq!(catalog.find_by_path("/images/b.png").unwrap().name, "b.png");
        assert!(catalog.find_by_path("/missing").is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn published_item_flattens_file_fields() {
        let published = PublishedItem {
            item: FileItem::new("a.pdf", "/pdfs/a.pdf"),
            preview: "/preview/a-pdf/".to_string(),
        };
        let json = serde_json::to_value(&published).unwrap();
        assert_eq!(json["name"], "a.pdf");
        assert_eq!(json["path"], "/pdfs/a.pdf");
        assert_eq!(json["preview"], "/preview/a-pdf/");
    }
}
