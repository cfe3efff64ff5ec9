//! End-to-end build tests: load a site directory, discover, generate, and
//! inspect the output tree.

use neyna_site::generate::{self, GenerateError, SiteContext};
use neyna_site::routes::Route;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn copy_dir_recursive(src: &Path, dst: &Path) {
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            fs::create_dir_all(&dst_path).unwrap();
            copy_dir_recursive(&src_path, &dst_path);
        } else {
            fs::copy(&src_path, &dst_path).unwrap();
        }
    }
}

fn fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path());
    tmp
}

fn build(site: &Path, out: &Path) -> Result<generate::GenerateReport, GenerateError> {
    let ctx = SiteContext::load(site)?;
    let discovery = ctx.discover();
    generate::generate(&ctx, &discovery, out)
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("reading {}: {e}", path.as_ref().display()))
}

#[test]
fn builds_all_routes_and_previews() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    let report = build(site.path(), out.path()).unwrap();

    assert_eq!(report.pages.len(), Route::ALL.len());
    assert_eq!(report.previews.len(), 5);
    for file in [
        "index.html",
        "downloads/index.html",
        "contact/index.html",
        "terms/index.html",
        "preview/invoice-pdf/index.html",
        "preview/price-list-pdf/index.html",
        "preview/workshop-jpg/index.html",
    ] {
        assert!(out.path().join(file).is_file(), "missing {file}");
    }
}

#[test]
fn copies_public_assets() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    let report = build(site.path(), out.path()).unwrap();

    assert_eq!(report.assets_copied, 6);
    assert!(out.path().join("pdfs/brochure.pdf").is_file());
    assert!(out.path().join("images/logo.png").is_file());
    assert!(out.path().join("favicon.ico").is_file());
}

#[test]
fn landing_uses_site_page_copy() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    build(site.path(), out.path()).unwrap();

    let index = read(out.path().join("index.html"));
    assert!(index.contains("<title>Advertise on Neyna Test - Neyna Test</title>"));
    assert!(index.contains(r#"<a href="/contact/">link</a>"#));

    // No terms.md in the fixture: stock copy
    let terms = read(out.path().join("terms/index.html"));
    assert!(terms.contains("Intellectual Property"));
}

#[test]
fn contact_page_uses_configured_phone() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    build(site.path(), out.path()).unwrap();

    let contact = read(out.path().join("contact/index.html"));
    assert!(contact.contains(r#"href="tel:+919000000000""#));
}

#[test]
fn catalog_json_matches_discovery() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    let report = build(site.path(), out.path()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&read(out.path().join(generate::CATALOG_FILE))).unwrap();
    assert_eq!(json["version"], report.catalog.version());
    assert_eq!(json["documents"].as_array().unwrap().len(), 3);
    assert_eq!(json["images"].as_array().unwrap().len(), 2);

    let invoice = &json["documents"][1];
    assert_eq!(invoice["name"], "invoice.pdf");
    assert_eq!(invoice["path"], "/pdfs/invoice.pdf");
    assert_eq!(invoice["preview"], "/preview/invoice-pdf/");
}

#[test]
fn downloads_page_lists_every_item() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    let report = build(site.path(), out.path()).unwrap();

    let downloads = read(out.path().join("downloads/index.html"));
    for item in report.catalog.iter() {
        assert!(
            downloads.contains(&format!(r#"download="{}""#, item.name)),
            "no download link for {}",
            item.name
        );
    }
    assert!(downloads.contains(r#"data-refresh-ms="30000""#));
}

#[test]
fn empty_site_builds_with_empty_states() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let report = build(site.path(), out.path()).unwrap();

    assert!(report.catalog.is_empty());
    assert_eq!(report.notices.len(), 2);
    assert!(report.previews.is_empty());
    assert!(!out.path().join("preview").exists());

    let downloads = read(out.path().join("downloads/index.html"));
    assert!(downloads.contains(r#"<p class="empty-state" data-empty="No PDF files found">"#));
    assert!(downloads.contains(r#"<p class="empty-state" data-empty="No image files found">"#));
}

#[test]
fn downloads_landing_swaps_index() {
    let site = fixture_site();
    fs::write(
        site.path().join("config.toml"),
        "[routes]\nlanding = \"downloads\"\n",
    )
    .unwrap();
    let out = TempDir::new().unwrap();
    build(site.path(), out.path()).unwrap();

    assert!(read(out.path().join("index.html")).contains("downloads-page"));
    assert!(out.path().join("advertise/index.html").is_file());
    assert!(!out.path().join("downloads").exists());

    // Close goes back to the landing page
    let preview = read(out.path().join("preview/logo-png/index.html"));
    assert!(preview.contains(r#"<a class="button" href="/">Close</a>"#));
}

#[test]
fn invalid_config_fails_the_build() {
    let site = fixture_site();
    fs::write(site.path().join("config.toml"), "unknown_key = true\n").unwrap();
    let out = TempDir::new().unwrap();

    assert!(matches!(
        build(site.path(), out.path()),
        Err(GenerateError::Config(_))
    ));
}

#[test]
fn rebuild_drops_removed_files() {
    let site = fixture_site();
    let out = TempDir::new().unwrap();
    build(site.path(), out.path()).unwrap();

    fs::remove_file(site.path().join("public/images/workshop.jpg")).unwrap();
    build(site.path(), out.path()).unwrap();

    assert!(!out.path().join("images/workshop.jpg").exists());
    assert!(!out.path().join("preview/workshop-jpg").exists());
}
