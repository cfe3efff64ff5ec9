//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, easy to
//! test) and a `print_*` wrapper that writes them to stdout. Log lines go to
//! stderr through `tracing`; this module is the user-facing summary.
//!
//! ## Discover
//!
//! ```text
//! Images (2)
//! 001 logo.png
//!     Path: /images/logo.png
//! 002 workshop.jpg
//!     Path: /images/workshop.jpg
//!
//! PDFs (0)
//!     No PDF files found
//! ```
//!
//! ## Generate
//!
//! ```text
//! Advertise → index.html
//! Downloads → downloads/index.html
//!     001 invoice.pdf → preview/invoice-pdf/index.html
//! Contact → contact/index.html
//! Terms → terms/index.html
//!
//! Generated 4 pages, 1 preview, 3 assets copied
//! ```

use crate::discover::{Discovery, DiscoveryNotice};
use crate::generate::GenerateReport;
use crate::routes::Route;
use crate::types::{Catalog, FileItem};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn section(lines: &mut Vec<String>, title: &str, items: &[FileItem], empty: Option<&str>) {
    lines.push(format!("{} ({})", title, items.len()));
    if items.is_empty() {
        if let Some(message) = empty {
            lines.push(format!("    {message}"));
        }
        return;
    }
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.name));
        lines.push(format!("    Path: {}", item.path));
    }
}

fn notice_for(notices: &[DiscoveryNotice], wanted: DiscoveryNotice) -> Option<&'static str> {
    notices.contains(&wanted).then(|| wanted.message())
}

/// Format the catalog found by discovery, images first like the page.
pub fn format_discovery(discovery: &Discovery) -> Vec<String> {
    let mut lines = Vec::new();
    section(
        &mut lines,
        "Images",
        &discovery.catalog.images,
        notice_for(&discovery.notices, DiscoveryNotice::NoImages),
    );
    lines.push(String::new());
    section(
        &mut lines,
        "PDFs",
        &discovery.catalog.documents,
        notice_for(&discovery.notices, DiscoveryNotice::NoDocuments),
    );
    lines
}

pub fn print_discovery(discovery: &Discovery) {
    for line in format_discovery(discovery) {
        println!("{}", line);
    }
}

/// Format search results for a term.
pub fn format_search(filtered: &Catalog, term: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "Search \"{}\": {}",
        term,
        count(filtered.len(), "match", "matches")
    )];
    if filtered.is_empty() {
        return lines;
    }
    lines.push(String::new());
    section(&mut lines, "Images", &filtered.images, None);
    lines.push(String::new());
    section(&mut lines, "PDFs", &filtered.documents, None);
    lines
}

pub fn print_search(filtered: &Catalog, term: &str) {
    for line in format_search(filtered, term) {
        println!("{}", line);
    }
}

/// Format generated files: routed pages with previews under downloads.
pub fn format_generate(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pages = report.pages.clone();
    pages.sort_by_key(|(route, _)| Route::ALL.iter().position(|r| r == route));

    for (route, file) in &pages {
        lines.push(format!("{} \u{2192} {}", route.label(), file));
        if *route == Route::Downloads {
            for (i, (name, file)) in report.previews.iter().enumerate() {
                lines.push(format!(
                    "    {} {} \u{2192} {}",
                    format_index(i + 1),
                    name,
                    file
                ));
            }
        }
    }

    for notice in &report.notices {
        lines.push(format!("Note: {}", notice.message()));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {} copied",
        count(pages.len(), "page", "pages"),
        count(report.previews.len(), "preview", "previews"),
        count(report.assets_copied, "asset", "assets")
    ));
    lines
}

pub fn print_generate(report: &GenerateReport) {
    for line in format_generate(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            documents: vec![FileItem::new("invoice.pdf", "/pdfs/invoice.pdf")],
            images: vec![
                FileItem::new("logo.png", "/images/logo.png"),
                FileItem::new("workshop.jpg", "/images/workshop.jpg"),
            ],
        }
    }

    #[test]
    fn discovery_lists_images_then_pdfs() {
        let discovery = Discovery {
            catalog: catalog(),
            notices: vec![],
        };
        let lines = format_discovery(&discovery);
        assert_eq!(lines[0], "Images (2)");
        assert_eq!(lines[1], "001 logo.png");
        assert_eq!(lines[2], "    Path: /images/logo.png");
        assert!(lines.contains(&"PDFs (1)".to_string()));
        assert!(lines.contains(&"001 invoice.pdf".to_string()));
    }

    #[test]
    fn discovery_shows_empty_notices() {
        let discovery = Discovery {
            catalog: Catalog::default(),
            notices: vec![DiscoveryNotice::NoDocuments, DiscoveryNotice::NoImages],
        };
        let lines = format_discovery(&discovery);
        assert_eq!(
            lines,
            vec![
                "Images (0)",
                "    No image files found",
                "",
                "PDFs (0)",
                "    No PDF files found",
            ]
        );
    }

    #[test]
    fn search_reports_match_count() {
        let lines = format_search(&catalog(), "o");
        assert_eq!(lines[0], "Search \"o\": 3 matches");

        let lines = format_search(&Catalog::default(), "zzz");
        assert_eq!(lines, vec!["Search \"zzz\": 0 matches"]);
    }

    #[test]
    fn generate_output_nests_previews_under_downloads() {
        let report = GenerateReport {
            pages: vec![
                (Route::Downloads, "downloads/index.html".to_string()),
                (Route::Advertise, "index.html".to_string()),
                (Route::Contact, "contact/index.html".to_string()),
                (Route::Terms, "terms/index.html".to_string()),
            ],
            previews: vec![(
                "invoice.pdf".to_string(),
                "preview/invoice-pdf/index.html".to_string(),
            )],
            catalog: catalog(),
            notices: vec![],
            assets_copied: 3,
        };
        let lines = format_generate(&report);
        assert_eq!(lines[0], "Advertise \u{2192} index.html");
        assert_eq!(lines[1], "Downloads \u{2192} downloads/index.html");
        assert_eq!(
            lines[2],
            "    001 invoice.pdf \u{2192} preview/invoice-pdf/index.html"
        );
        assert_eq!(
            lines.last().unwrap(),
            "Generated 4 pages, 1 preview, 3 assets copied"
        );
    }

    #[test]
    fn generate_output_includes_notices() {
        let report = GenerateReport {
            notices: vec![DiscoveryNotice::NoImages],
            ..Default::default()
        };
        let lines = format_generate(&report);
        assert!(lines.contains(&"Note: No image files found".to_string()));
    }
}
