//! File discovery: public assets → catalog.
//!
//! Enumerates the two asset categories under the public directory and
//! produces a [`Catalog`] of documents and images.
//!
//! ## Directory Structure
//!
//! ```text
//! public/                  # Public root (copied verbatim to the output)
//! ├── pdfs/                # Documents: *.pdf
//! │   ├── brochure.pdf
//! │   └── invoice.pdf
//! ├── images/              # Images: png, jpg, jpeg, gif, webp, avif
//! │   ├── logo.png
//! │   └── workshop.jpg
//! └── favicon.ico          # Anything else is published but not cataloged
//! ```
//!
//! Only the top level of each category directory is read. Hidden files and
//! files with other extensions are ignored. Items are ordered by file name.
//!
//! ## Missing Content
//!
//! A missing or empty category is not an error. The category comes back
//! empty and a [`DiscoveryNotice`] tells the caller to show an empty state.
//! Callers that must never fail (the refresh loop) use
//! [`discover_or_empty`], which logs real I/O failures and returns an empty
//! catalog instead.

use crate::config::LayoutConfig;
use crate::types::{Catalog, FileItem};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif"];

/// Non-fatal conditions worth showing to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryNotice {
    NoDocuments,
    NoImages,
}

impl DiscoveryNotice {
    pub fn message(self) -> &'static str {
        match self {
            DiscoveryNotice::NoDocuments => "No PDF files found",
            DiscoveryNotice::NoImages => "No image files found",
        }
    }
}

/// Result of one discovery cycle.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub catalog: Catalog,
    pub notices: Vec<DiscoveryNotice>,
}

impl Discovery {
    fn from_catalog(catalog: Catalog) -> Self {
        let mut notices = Vec::new();
        if catalog.documents.is_empty() {
            notices.push(DiscoveryNotice::NoDocuments);
        }
        if catalog.images.is_empty() {
            notices.push(DiscoveryNotice::NoImages);
        }
        Self { catalog, notices }
    }
}

/// Discover documents and images under `public_root`.
///
/// Fails only when a category path exists but cannot be enumerated, or when
/// the public root itself is a file.
pub fn discover(public_root: &Path, layout: &LayoutConfig) -> Result<Discovery, DiscoverError> {
    if public_root.exists() && !public_root.is_dir() {
        return Err(DiscoverError::NotADirectory(public_root.to_path_buf()));
    }

    let documents = collect_category(public_root, &layout.pdfs_dir, DOCUMENT_EXTENSIONS)?;
    let images = collect_category(public_root, &layout.images_dir, IMAGE_EXTENSIONS)?;

    tracing::info!(
        documents = documents.len(),
        images = images.len(),
        root = %public_root.display(),
        "discovered files"
    );

    let discovery = Discovery::from_catalog(Catalog { documents, images });
    for notice in &discovery.notices {
        let dir = match notice {
            DiscoveryNotice::NoDocuments => &layout.pdfs_dir,
            DiscoveryNotice::NoImages => &layout.images_dir,
        };
        tracing::warn!(dir = %public_root.join(dir).display(), "{}", notice.message());
    }
    Ok(discovery)
}

/// Like [`discover`], but any failure degrades to an empty catalog.
pub fn discover_or_empty(public_root: &Path, layout: &LayoutConfig) -> Discovery {
    match discover(public_root, layout) {
        Ok(discovery) => discovery,
        Err(e) => {
            tracing::error!(error = %e, "discovery failed, using empty catalog");
            Discovery::from_catalog(Catalog::default())
        }
    }
}

fn collect_category(
    public_root: &Path,
    dir_name: &str,
    extensions: &[&str],
) -> Result<Vec<FileItem>, DiscoverError> {
    let dir = public_root.join(dir_name);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            path: dir.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || !has_extension(&name, extensions) {
            continue;
        }
        tracing::debug!(name = %name, dir = dir_name, "found file");
        let path = format!(
            "/{}/{}",
            urlencoding::encode(dir_name),
            urlencoding::encode(&name)
        );
        items.push(FileItem::new(name, path));
    }
    Ok(items)
}

/// File on disk behind a public URL path (`/pdfs/Q%26A.pdf` →
/// `<public_root>/pdfs/Q&A.pdf`). Segments that do not decode are used as-is.
pub fn public_file(public_root: &Path, url_path: &str) -> PathBuf {
    url_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(public_root.to_path_buf(), |acc, segment| {
            match urlencoding::decode(segment) {
                Ok(decoded) => acc.join(&*decoded),
                Err(_) => acc.join(segment),
            }
        })
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}
