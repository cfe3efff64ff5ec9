//! # neyna-site
//!
//! A static site generator for a small company website: landing, contact
//! and terms pages plus a downloads browser over the PDFs and images placed
//! in a public folder. The filesystem is the data source; there is no
//! backend, no database, and no upload path.
//!
//! # Pipeline
//!
//! ```text
//! 1. Discover  public/   →  Catalog          (pdfs/ + images/ → file items)
//! 2. Generate  Catalog   →  dist/            (HTML pages, previews, catalog.json)
//! 3. Watch     every 30s →  re-discover, republish on change
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discover`] | Enumerates documents and images under the public root |
//! | [`filter`] | Case-insensitive name search over the catalog |
//! | [`preview`] | Preview state machine: open/close, zoom, reload, fullscreen |
//! | [`download`] | Browser-native download links |
//! | [`routes`] | The four routed pages and their output files |
//! | [`thumbnail`] | Per-item thumbnail failure flags and icon fallback |
//! | [`generate`] | Renders pages with Maud and publishes `catalog.json` |
//! | [`refresh`] | Owned, cancellable periodic task |
//! | [`watch`] | Re-discovery loop that republishes changed catalogs |
//! | [`config`] | `config.toml` loading, validation, and CSS variables |
//! | [`types`] | `FileItem`, `Catalog`, and the published catalog format |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Browser Side
//!
//! Generated pages carry a few lines of vanilla JavaScript: search-as-you-type
//! and periodic catalog polling on the downloads page, and the preview
//! controls (zoom, reload, fullscreen) on document previews. The script
//! follows the same rules as [`filter`] and [`preview`]; the Rust side
//! renders each page in the state the script starts from.

pub mod config;
pub mod discover;
pub mod download;
pub mod filter;
pub mod generate;
pub mod logging;
pub mod output;
pub mod preview;
pub mod refresh;
pub mod routes;
pub mod thumbnail;
pub mod types;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
