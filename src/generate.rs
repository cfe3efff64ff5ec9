//! HTML site generation.
//!
//! Renders the four routed pages, one preview page per catalog item, and the
//! published `catalog.json`, and copies the public assets next to them.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Landing route (advertise by default)
//! ├── downloads/index.html       # Catalog browser
//! ├── contact/index.html
//! ├── terms/index.html
//! ├── preview/
//! │   ├── invoice-pdf/index.html # Document viewer (zoom, reload, fullscreen)
//! │   └── logo-png/index.html    # Image viewer
//! ├── catalog.json               # Polled by the downloads page
//! ├── pdfs/…                     # Copied from public/
//! └── images/…
//! ```
//!
//! ## Two Passes
//!
//! [`generate`] writes everything. [`publish_catalog`] rewrites only what
//! depends on the catalog (assets, downloads page, previews, catalog.json);
//! the watcher calls it whenever a refresh finds a different catalog.
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time:
//! - `static/style.css`: base styles (colors injected from config)
//! - `static/site.js`: nav drawer, search-as-you-type, tabs, thumbnail
//!   fallback and periodic catalog refresh on the downloads page
//! - `static/preview.js`: zoom, reload, fullscreen and loading state on
//!   preview pages

use crate::config::{self, SiteConfig, dial_string};
use crate::discover::{self, Discovery, DiscoveryNotice};
use crate::download::DownloadLink;
use crate::preview::{PreviewState, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::routes::{Route, RouteMap};
use crate::thumbnail::{Thumbnail, ThumbnailTracker};
use crate::types::{Catalog, FileItem, FileKind, PublishedCatalog, PublishedItem};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SITE_JS: &str = include_str!("../static/site.js");
const PREVIEW_JS: &str = include_str!("../static/preview.js");
const STOCK_ADVERTISE_MD: &str = include_str!("../static/pages/advertise.md");
const STOCK_TERMS_MD: &str = include_str!("../static/pages/terms.md");

pub const CATALOG_FILE: &str = "catalog.json";
const PREVIEW_DIR: &str = "preview";

/// A page whose copy is markdown.
#[derive(Debug, Clone)]
pub struct MarkdownPage {
    /// First `# heading`, or the fallback title.
    pub title: String,
    pub body: String,
}

impl MarkdownPage {
    fn parse(body: String, fallback_title: &str) -> Self {
        let title = body
            .lines()
            .find(|line| line.starts_with("# "))
            .map(|line| line.trim_start_matches("# ").trim().to_string())
            .unwrap_or_else(|| fallback_title.to_string());
        Self { title, body }
    }

    fn to_html(&self) -> String {
        let mut out = String::new();
        md_html::push_html(&mut out, Parser::new(&self.body));
        out
    }
}

/// Everything needed to render pages, resolved once per build.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub config: SiteConfig,
    pub routes: RouteMap,
    pub public_root: PathBuf,
    pub advertise: MarkdownPage,
    pub terms: MarkdownPage,
    css: String,
}

impl SiteContext {
    /// Load config and page copy from a site directory.
    pub fn load(source: &Path) -> Result<Self, GenerateError> {
        let config = config::load_config(source)?;
        let pages_dir = source.join(&config.pages_dir);
        let advertise = load_markdown_page(&pages_dir, "advertise", STOCK_ADVERTISE_MD)?;
        let terms = load_markdown_page(&pages_dir, "terms", STOCK_TERMS_MD)?;
        Ok(Self::from_parts(config, source, advertise, terms))
    }

    fn from_parts(
        config: SiteConfig,
        source: &Path,
        advertise: MarkdownPage,
        terms: MarkdownPage,
    ) -> Self {
        let css = format!(
            "{}\n\n{}",
            config::generate_color_css(&config.colors),
            CSS_STATIC
        );
        Self {
            routes: RouteMap::new(&config.routes),
            public_root: source.join(&config.public_dir),
            advertise,
            terms,
            css,
            config,
        }
    }

    /// Run one discovery pass over the public root. Never fails.
    pub fn discover(&self) -> Discovery {
        discover::discover_or_empty(&self.public_root, &self.config.layout)
    }

    fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.config.preview.reload_delay_ms)
    }
}

fn load_markdown_page(
    pages_dir: &Path,
    name: &str,
    stock: &str,
) -> Result<MarkdownPage, GenerateError> {
    let path = pages_dir.join(format!("{name}.md"));
    let body = if path.is_file() {
        fs::read_to_string(&path)?
    } else {
        tracing::debug!(page = name, "no page copy, using stock text");
        stock.to_string()
    };
    let fallback = capitalize(name);
    Ok(MarkdownPage::parse(body, &fallback))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Files written by a generation pass, relative to the output directory.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<(Route, String)>,
    pub previews: Vec<(String, String)>,
    pub catalog: Catalog,
    pub notices: Vec<DiscoveryNotice>,
    pub assets_copied: usize,
}

/// Write the whole site for an already discovered catalog.
pub fn generate(
    ctx: &SiteContext,
    discovery: &Discovery,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let mut thumbs = ThumbnailTracker::default();
    let mut report = publish_catalog(ctx, discovery, &mut thumbs, output_dir)?;

    let static_pages = [
        (Route::Advertise, render_advertise_page(ctx)),
        (Route::Contact, render_contact_page(ctx)),
        (Route::Terms, render_terms_page(ctx)),
    ];
    for (route, markup) in static_pages {
        let file = write_route(ctx, route, markup, output_dir)?;
        report.pages.push((route, file));
    }

    tracing::info!(output = %output_dir.display(), "site generated");
    Ok(report)
}

/// Rewrite everything that depends on the catalog.
///
/// `thumbs` carries thumbnail flags across refreshes; flags for files that
/// left the catalog are dropped and every image is re-checked on disk.
pub fn publish_catalog(
    ctx: &SiteContext,
    discovery: &Discovery,
    thumbs: &mut ThumbnailTracker,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let catalog = &discovery.catalog;

    let assets_copied = copy_public_assets(ctx, output_dir)?;

    thumbs.retain(catalog);
    thumbs.check_files(catalog, &ctx.public_root);

    let previews = preview_urls(catalog);

    let preview_root = output_dir.join(PREVIEW_DIR);
    if preview_root.exists() {
        fs::remove_dir_all(&preview_root)?;
    }
    let mut written_previews = Vec::new();
    for item in catalog.iter() {
        let url = &previews[&item.path];
        let mut state = PreviewState::new(ctx.reload_delay());
        state.open(item.clone());
        let markup = render_preview_page(ctx, &state);
        let rel = format!("{}index.html", url.trim_start_matches('/'));
        let dest = output_dir.join(&rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, markup.into_string())?;
        written_previews.push((item.name.clone(), rel));
    }

    let downloads = render_downloads_page(ctx, discovery, &previews, thumbs);
    let downloads_file = write_route(ctx, Route::Downloads, downloads, output_dir)?;

    let published = published_catalog(catalog, &previews);
    fs::write(
        output_dir.join(CATALOG_FILE),
        serde_json::to_string_pretty(&published)?,
    )?;

    tracing::info!(
        version = %published.version,
        previews = written_previews.len(),
        "catalog published"
    );

    Ok(GenerateReport {
        pages: vec![(Route::Downloads, downloads_file)],
        previews: written_previews,
        catalog: catalog.clone(),
        notices: discovery.notices.clone(),
        assets_copied,
    })
}

fn write_route(
    ctx: &SiteContext,
    route: Route,
    markup: Markup,
    output_dir: &Path,
) -> Result<String, GenerateError> {
    let rel = ctx.routes.output_file(route);
    let dest = output_dir.join(&rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest, markup.into_string())?;
    tracing::debug!(file = %rel, "page written");
    Ok(rel)
}

/// Copy the public directory into the output. Category directories are
/// cleared first so deleted files do not linger.
fn copy_public_assets(ctx: &SiteContext, output_dir: &Path) -> Result<usize, GenerateError> {
    if !ctx.public_root.is_dir() {
        return Ok(0);
    }
    for dir in [&ctx.config.layout.pdfs_dir, &ctx.config.layout.images_dir] {
        let target = output_dir.join(dir);
        if target.is_dir() {
            fs::remove_dir_all(&target)?;
        }
    }
    Ok(copy_dir_recursive(&ctx.public_root, output_dir)?)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Preview URLs
// ============================================================================

/// URL-safe slug from a file name: `Price List.pdf` → `price-list-pdf`.
pub fn preview_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "file".to_string()
    } else {
        slug.to_string()
    }
}

/// Preview page URL for every catalog path, unique within the catalog.
pub fn preview_urls(catalog: &Catalog) -> BTreeMap<String, String> {
    let mut taken = HashSet::new();
    let mut urls = BTreeMap::new();
    for item in catalog.iter() {
        let base = preview_slug(&item.name);
        let mut slug = base.clone();
        let mut n = 2;
        while !taken.insert(slug.clone()) {
            slug = format!("{base}-{n}");
            n += 1;
        }
        urls.insert(item.path.clone(), format!("/{PREVIEW_DIR}/{slug}/"));
    }
    urls
}

fn published_catalog(catalog: &Catalog, previews: &BTreeMap<String, String>) -> PublishedCatalog {
    let publish = |items: &[FileItem]| -> Vec<PublishedItem> {
        items
            .iter()
            .map(|item| PublishedItem {
                item: item.clone(),
                preview: previews.get(&item.path).cloned().unwrap_or_default(),
            })
            .collect()
    };
    PublishedCatalog {
        version: catalog.version(),
        documents: publish(&catalog.documents),
        images: publish(&catalog.images),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn page_title(ctx: &SiteContext, page: &str) -> String {
    format!("{} - {}", page, ctx.config.site_name)
}

/// Renders the header: brand, route links, and an optional search box.
///
/// On narrow screens the links move into a drawer opened by the hamburger.
fn site_header(ctx: &SiteContext, current: Option<Route>, search: bool) -> Markup {
    html! {
        header.app-header {
            div.header-left {
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label="Menu" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                a.brand href="/" { (ctx.config.site_name) }
                nav.nav-panel {
                    label.nav-close for="nav-toggle" { "×" }
                    (render_nav(ctx, current))
                }
            }
            @if search {
                div.search-bar {
                    input #search type="search" placeholder="Search files..."
                        autocomplete="off" aria-label="Search files";
                }
            }
        }
    }
}

/// Route links, excluding the landing route (the brand links there).
fn render_nav(ctx: &SiteContext, current: Option<Route>) -> Markup {
    html! {
        ul.nav-links {
            @for route in Route::ALL.into_iter().filter(|r| *r != ctx.routes.landing()) {
                @let is_current = current == Some(route);
                li class=[is_current.then_some("current")] {
                    a href=(ctx.routes.path(route)) { (route.label()) }
                }
            }
        }
    }
}

fn file_icon(kind: FileKind) -> Markup {
    let modifier = match kind {
        FileKind::Document => "file-icon-document",
        FileKind::Image => "file-icon-image",
    };
    html! {
        span class={ "file-icon " (modifier) } { (kind.label()) }
    }
}

/// One catalog card: thumbnail (or icon), name, and download button.
///
/// The icon after a thumbnail stays hidden until the card is flagged
/// `thumb-failed`, at build time or by the page script on a load error.
fn render_file_card(item: &FileItem, preview_url: &str, thumbs: &ThumbnailTracker) -> Markup {
    let thumbnail = thumbs.resolve(item);
    let failed = thumbs.is_failed(&item.path);
    html! {
        div.file-card.thumb-failed[failed] data-name=(item.name.to_lowercase()) {
            a.thumbnail-container href=(preview_url) title=(item.name) {
                @match &thumbnail {
                    Thumbnail::Image { src } => {
                        img.file-thumbnail src=(src) alt=(item.name) loading="lazy";
                        (file_icon(FileKind::Image))
                    }
                    Thumbnail::Page { src } => {
                        object.file-thumbnail data=(src) type="application/pdf"
                            aria-label=(item.name) {
                            (file_icon(FileKind::Document))
                        }
                        (file_icon(FileKind::Document))
                    }
                    Thumbnail::Icon(kind) => {
                        (file_icon(*kind))
                    }
                }
                @if item.is_document() {
                    span.pdf-label { "PDF" }
                }
            }
            p.file-name { (item.name) }
            div.file-actions {
                (DownloadLink::for_item(item).button())
            }
        }
    }
}

fn render_file_section(
    id: &str,
    active: bool,
    items: &[FileItem],
    notice: DiscoveryNotice,
    previews: &BTreeMap<String, String>,
    thumbs: &ThumbnailTracker,
) -> Markup {
    html! {
        section.tab-panel.active[active] id=(id) {
            p.empty-state.hidden[!items.is_empty()] data-empty=(notice.message()) {
                (notice.message())
            }
            p.no-matches.hidden { "No files match your search" }
            div.file-grid {
                @for item in items {
                    @let url = previews.get(&item.path).map(String::as_str).unwrap_or("#");
                    (render_file_card(item, url, thumbs))
                }
            }
        }
    }
}

fn count_label(n: usize) -> String {
    if n > 0 { format!("({n})") } else { String::new() }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the catalog browser: Images and PDFs tabs, search, and the
/// refresh hook that polls `catalog.json`.
fn render_downloads_page(
    ctx: &SiteContext,
    discovery: &Discovery,
    previews: &BTreeMap<String, String>,
    thumbs: &ThumbnailTracker,
) -> Markup {
    let catalog = &discovery.catalog;
    let refresh_ms = ctx.config.refresh.interval_secs.saturating_mul(1000);

    let content = html! {
        (site_header(ctx, Some(Route::Downloads), true))
        main.downloads-page
            data-catalog={ "/" (CATALOG_FILE) }
            data-version=(catalog.version())
            data-refresh-ms=(refresh_ms) {
            div.tabs role="tablist" {
                button.tab.active type="button" data-tab="images-panel" {
                    "Images " span.count data-count="images" { (count_label(catalog.images.len())) }
                }
                button.tab type="button" data-tab="pdfs-panel" {
                    "PDFs " span.count data-count="documents" { (count_label(catalog.documents.len())) }
                }
            }
            (render_file_section("images-panel", true, &catalog.images, DiscoveryNotice::NoImages, previews, thumbs))
            (render_file_section("pdfs-panel", false, &catalog.documents, DiscoveryNotice::NoDocuments, previews, thumbs))
        }
        script { (PreEscaped(SITE_JS)) }
    };

    base_document(
        &page_title(ctx, Route::Downloads.label()),
        &ctx.css,
        Some("downloads"),
        content,
    )
}

/// Renders a preview page from an opened preview state.
///
/// Documents get the viewer with zoom/reload/fullscreen controls and a
/// loading overlay; images get a plain enlarged view. Both offer download
/// and close.
pub fn render_preview_page(ctx: &SiteContext, state: &PreviewState) -> Markup {
    let Some(item) = state.item() else {
        return html! {};
    };
    let download = DownloadLink::for_item(item);
    let close_href = ctx.routes.path(Route::Downloads);
    let zoom = state.zoom();

    let body = if item.is_document() {
        html! {
            div.pdf-preview-container #viewer
                data-zoom=(zoom.value())
                data-zoom-min=(ZOOM_MIN)
                data-zoom-max=(ZOOM_MAX)
                data-zoom-step=(ZOOM_STEP)
                data-reload-delay=(state.reload_delay().as_millis() as u64) {
                div.pdf-loading.hidden[!state.is_loading()] {
                    span.spinner {}
                    span { "Loading PDF..." }
                }
                div.pdf-controls {
                    button #zoom-out type="button" title="Zoom Out" disabled[!zoom.can_zoom_out()] { "−" }
                    span.zoom-level { (zoom.percent()) "%" }
                    button #zoom-in type="button" title="Zoom In" disabled[!zoom.can_zoom_in()] { "+" }
                    button #reload type="button" title="Reload PDF" { "↻" }
                    button.fullscreen-toggle type="button" title="Fullscreen" { "⛶" }
                }
                iframe #document src=(item.path) title=(item.name)
                    style={ "transform: scale(" (zoom.value()) ")" } {
                    p {
                        "Your browser does not support PDF preview. "
                        (download.render("fallback-download", "Download instead"))
                    }
                }
            }
        }
    } else {
        html! {
            div.image-preview-container {
                img src=(item.path) alt=(item.name);
            }
        }
    };

    let content = html! {
        div.preview-overlay {
            div.preview-modal {
                header.preview-header {
                    h1.preview-title { (item.name) }
                    a.preview-close href=(close_href) aria-label="Close" { "×" }
                }
                div.preview-body { (body) }
                footer.preview-footer {
                    @if item.is_document() {
                        button.fullscreen-toggle type="button" {
                            span.fullscreen-label {
                                @if state.is_fullscreen() { "Exit Fullscreen" } @else { "Fullscreen" }
                            }
                        }
                        button.reload type="button" { "Reload" }
                    }
                    (download.render("download-button primary", "Download"))
                    a.button href=(close_href) { "Close" }
                }
            }
        }
        @if item.is_document() {
            script { (PreEscaped(PREVIEW_JS)) }
        }
    };

    base_document(&page_title(ctx, &item.name), &ctx.css, Some("preview"), content)
}

fn render_markdown_page(ctx: &SiteContext, route: Route, page: &MarkdownPage) -> Markup {
    let content = html! {
        (site_header(ctx, Some(route), false))
        main.page-content {
            article.page-card {
                (PreEscaped(page.to_html()))
            }
        }
    };
    base_document(&page_title(ctx, &page.title), &ctx.css, None, content)
}

/// Renders the advertise page from markdown copy.
fn render_advertise_page(ctx: &SiteContext) -> Markup {
    render_markdown_page(ctx, Route::Advertise, &ctx.advertise)
}

/// Renders the terms page from markdown copy.
fn render_terms_page(ctx: &SiteContext) -> Markup {
    render_markdown_page(ctx, Route::Terms, &ctx.terms)
}

/// Renders the contact page from the fixed contact affordances in config.
fn render_contact_page(ctx: &SiteContext) -> Markup {
    let contact = &ctx.config.contact;
    let whatsapp = dial_string(&contact.whatsapp);
    let whatsapp = whatsapp.trim_start_matches('+');

    let content = html! {
        (site_header(ctx, Some(Route::Contact), false))
        main.page-content {
            article.page-card.contact-card {
                h1 { "Contact" }
                p.contact-intro {
                    "We're here to help! If you have any questions about our services or need "
                    "assistance, please don't hesitate to reach out to us."
                }
                div.contact-grid {
                    @if !contact.phone.is_empty() {
                        div.contact-info-card {
                            h2 { "Phone" }
                            p.contact-detail {
                                a href={ "tel:" (dial_string(&contact.phone)) } { (contact.phone) }
                            }
                            p.contact-note { (contact.phone_note) }
                        }
                    }
                    @if !contact.email.is_empty() {
                        div.contact-info-card {
                            h2 { "Email" }
                            p.contact-detail {
                                a href={ "mailto:" (contact.email.trim()) } { (contact.email) }
                            }
                            p.contact-note { (contact.email_note) }
                        }
                    }
                    @if !contact.address.is_empty() {
                        div.contact-info-card {
                            h2 { "Address" }
                            p.contact-detail {
                                @for (i, line) in contact.address.iter().enumerate() {
                                    @if i > 0 { br; }
                                    (line)
                                }
                            }
                            p.contact-note { (contact.address_note) }
                        }
                    }
                }
                @if !whatsapp.is_empty() || !contact.social.is_empty() {
                    h2.follow-us-title { "Follow Us" }
                    p { "Stay connected with us on social media for updates and more." }
                    ul.social-links {
                        @if !whatsapp.is_empty() {
                            li {
                                a href={ "https://wa.me/" (whatsapp) } target="_blank" rel="noopener" {
                                    "Message us on WhatsApp"
                                }
                            }
                        }
                        @for link in &contact.social {
                            li {
                                a href=(link.url) target="_blank" rel="noopener" {
                                    "Visit us on " (link.label)
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(&page_title(ctx, "Contact"), &ctx.css, None, content)
}

// ============================================================================
// Tests
// ============================================================================
