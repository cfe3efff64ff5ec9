//! Periodic re-discovery for a running site.
//!
//! A [`Watcher`] remembers a fingerprint of the tree it last published: the
//! catalog version plus each file's size and modification time. Each refresh
//! discovers again and republishes only when the fingerprint differs, so a
//! file replaced under the same name is picked up too. The catalog is always
//! replaced as a whole.

use crate::discover::{Discovery, public_file};
use crate::generate::{self, GenerateError, GenerateReport, SiteContext};
use crate::refresh::RefreshTask;
use crate::thumbnail::ThumbnailTracker;
use crate::types::Catalog;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

/// What one refresh did.
#[derive(Debug)]
pub enum RefreshOutcome {
    Unchanged,
    Published(GenerateReport),
}

pub struct Watcher {
    ctx: SiteContext,
    output_dir: PathBuf,
    thumbs: ThumbnailTracker,
    published: Option<String>,
}

impl Watcher {
    pub fn new(ctx: SiteContext, output_dir: PathBuf) -> Self {
        Self {
            ctx,
            output_dir,
            thumbs: ThumbnailTracker::default(),
            published: None,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.ctx.config.refresh.interval_secs)
    }

    /// Build the full site once. Call before starting the refresh loop.
    pub fn build(&mut self) -> Result<GenerateReport, GenerateError> {
        let discovery = self.ctx.discover();
        let report = generate::generate(&self.ctx, &discovery, &self.output_dir)?;
        self.published = Some(fingerprint(&discovery.catalog, &self.ctx.public_root));
        Ok(report)
    }

    /// Discover again and republish if the catalog changed.
    pub fn refresh(&mut self) -> Result<RefreshOutcome, GenerateError> {
        let discovery = self.ctx.discover();
        self.publish_if_changed(discovery)
    }

    fn publish_if_changed(&mut self, discovery: Discovery) -> Result<RefreshOutcome, GenerateError> {
        let current = fingerprint(&discovery.catalog, &self.ctx.public_root);
        if self.published.as_deref() == Some(current.as_str()) {
            tracing::debug!(fingerprint = %current, "catalog unchanged");
            return Ok(RefreshOutcome::Unchanged);
        }
        tracing::info!(
            fingerprint = %current,
            items = discovery.catalog.len(),
            "catalog changed, republishing"
        );
        let report =
            generate::publish_catalog(&self.ctx, &discovery, &mut self.thumbs, &self.output_dir)?;
        self.published = Some(current);
        Ok(RefreshOutcome::Published(report))
    }

    /// Move the watcher onto a refresh task ticking at the configured
    /// interval. `on_publish` sees every republished report.
    pub fn spawn<F>(mut self, mut on_publish: F) -> RefreshTask
    where
        F: FnMut(&GenerateReport) + Send + 'static,
    {
        let interval = self.interval();
        RefreshTask::spawn(interval, move || match self.refresh() {
            Ok(RefreshOutcome::Published(report)) => on_publish(&report),
            Ok(RefreshOutcome::Unchanged) => {}
            // The next tick tries again
            Err(e) => tracing::error!(error = %e, "refresh failed"),
        })
    }
}

/// Catalog version plus size and mtime of every cataloged file. A file
/// that cannot be read hashes as absent.
fn fingerprint(catalog: &Catalog, public_root: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(catalog.version().as_bytes());
    for item in catalog.iter() {
        hasher.update(item.path.as_bytes());
        if let Ok(meta) = std::fs::metadata(public_file(public_root, &item.path)) {
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |d| d.as_nanos());
            hasher.update(meta.len().to_le_bytes());
            hasher.update(modified.to_le_bytes());
        }
        hasher.update([0u8]);
    }
    hasher
        .finalize()
        .iter()
        .take(8)
        .map(|b| format!("{b:02x}"))
        .collect()
}
