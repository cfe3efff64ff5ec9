//! Download links.
//!
//! Downloads use the browser's own affordance: a same-origin anchor with a
//! `download` attribute naming the file. There is nothing to report back;
//! a missing resource is the browser's error to show.

use crate::types::FileItem;
use maud::{Markup, html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub file_name: String,
}

impl DownloadLink {
    pub fn new(path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            href: path.into(),
            file_name: file_name.into(),
        }
    }

    pub fn for_item(item: &FileItem) -> Self {
        Self::new(item.path.clone(), item.name.clone())
    }

    /// Primary "Download" button.
    pub fn button(&self) -> Markup {
        self.render("download-button", "Download")
    }

    /// Anchor with custom class and text, e.g. the viewer's fallback link.
    pub fn render(&self, class: &str, text: &str) -> Markup {
        html! {
            a class=(class) href=(self.href) download=(self.file_name) {
                (text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_from_item() {
        let item = FileItem::new("invoice.pdf", "/pdfs/invoice.pdf");
        let link = DownloadLink::for_item(&item);
        assert_eq!(link.href, "/pdfs/invoice.pdf");
        assert_eq!(link.file_name, "invoice.pdf");
    }

    #[test]
    fn button_has_download_attribute() {
        let html = DownloadLink::new("/images/logo.png", "logo.png")
            .button()
            .into_string();
        assert!(html.contains(r#"href="/images/logo.png""#));
        assert!(html.contains(r#"download="logo.png""#));
        assert!(html.contains("Download"));
    }

    #[test]
    fn file_name_is_escaped() {
        let html = DownloadLink::new("/pdfs/a.pdf", "\"quoted\".pdf")
            .render("x", "Download instead")
            .into_string();
        assert!(html.contains("&quot;quoted&quot;.pdf"));
    }
}
