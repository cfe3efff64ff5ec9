//! Search filtering over the catalog.
//!
//! A file is visible when its display name contains the search term,
//! ignoring case. The empty term shows everything. Input order is kept.
//! The downloads page script applies the same rule in the browser.

use crate::types::{Catalog, FileItem};

/// Case-insensitive substring test on a display name.
pub fn matches(name: &str, term: &str) -> bool {
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

/// Items of `items` whose name matches `term`, in input order.
pub fn filter_items(items: &[FileItem], term: &str) -> Vec<FileItem> {
    items
        .iter()
        .filter(|item| matches(&item.name, term))
        .cloned()
        .collect()
}

/// Visible subset of both catalog sections.
pub fn filter_catalog(catalog: &Catalog, term: &str) -> Catalog {
    let _span = tracing::debug_span!("filter_catalog", total = catalog.len(), term_len = term.len())
        .entered();
    let filtered = Catalog {
        documents: filter_items(&catalog.documents, term),
        images: filter_items(&catalog.images, term),
    };
    tracing::debug!(visible = filtered.len(), "search filter applied");
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            documents: vec![
                FileItem::new("invoice.pdf", "/pdfs/invoice.pdf"),
                FileItem::new("Price-List.pdf", "/pdfs/Price-List.pdf"),
            ],
            images: vec![
                FileItem::new("logo.png", "/images/logo.png"),
                FileItem::new("Invoice-scan.jpg", "/images/Invoice-scan.jpg"),
            ],
        }
    }

    #[test]
    fn empty_term_returns_catalog_unchanged() {
        let c = catalog();
        assert_eq!(filter_catalog(&c, ""), c);
    }

    #[test]
    fn inv_matches_only_invoice() {
        let c = Catalog {
            documents: vec![FileItem::new("invoice.pdf", "/pdfs/invoice.pdf")],
            images: vec![FileItem::new("logo.png", "/images/logo.png")],
        };
        let filtered = filter_catalog(&c, "inv");
        assert_eq!(filtered.documents.len(), 1);
        assert_eq!(filtered.documents[0].name, "invoice.pdf");
        assert!(filtered.images.is_empty());
    }

    #[test]
    fn match_is_case_insensitive_both_ways() {
        let filtered = filter_catalog(&catalog(), "INVOICE");
        assert_eq!(filtered.documents[0].name, "invoice.pdf");
        assert_eq!(filtered.images[0].name, "Invoice-scan.jpg");

        let filtered = filter_catalog(&catalog(), "price");
        assert_eq!(filtered.documents[0].name, "Price-List.pdf");
    }

    #[test]
    fn matches_extension_text() {
        let filtered = filter_catalog(&catalog(), ".pdf");
        assert_eq!(filtered.documents.len(), 2);
        assert!(filtered.images.is_empty());
    }

    #[test]
    fn no_match_yields_empty_sections() {
        let filtered = filter_catalog(&catalog(), "zzz");
        assert!(filtered.is_empty());
    }

    #[test]
    fn result_is_subset_and_every_name_matches() {
        let c = catalog();
        for term in ["", "i", "o", "pdf", "LIST", "-", "x", "scan.j"] {
            let filtered = filter_catalog(&c, term);
            for item in filtered.iter() {
                assert!(c.iter().any(|orig| orig == item), "{item:?} not in catalog");
                assert!(matches(&item.name, term), "{} does not match {term}", item.name);
            }
            // Everything that matches is kept
            let expected = c.iter().filter(|i| matches(&i.name, term)).count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn whitespace_in_term_is_significant() {
        let c = Catalog {
            documents: vec![
                FileItem::new("price list.pdf", "/pdfs/price%20list.pdf"),
                FileItem::new("Price-List.pdf", "/pdfs/Price-List.pdf"),
            ],
            images: vec![],
        };
        assert_eq!(filter_catalog(&c, "list ").len(), 0);
        assert_eq!(filter_catalog(&c, "e l").documents[0].name, "price list.pdf");
        assert_eq!(filter_catalog(&c, " ").len(), 1);
    }

    #[test]
    fn preserves_input_order() {
        let c = Catalog {
            documents: vec![
                FileItem::new("b-report.pdf", "/pdfs/b-report.pdf"),
                FileItem::new("a-report.pdf", "/pdfs/a-report.pdf"),
            ],
            images: vec![],
        };
        let filtered = filter_catalog(&c, "report");
        assert_eq!(filtered.documents[0].name, "b-report.pdf");
        assert_eq!(filtered.documents[1].name, "a-report.pdf");
    }

    #[test]
    fn matches_empty_term() {
        assert!(matches("anything", ""));
        assert!(!matches("", "a"));
    }
}
