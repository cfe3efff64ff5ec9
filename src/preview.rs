//! Preview state machine.
//!
//! ```text
//!            open(doc)                      open(image)
//!  Closed ─────────────▶ Open(document) ◀──────────────── Closed
//!    ▲                   zoom = 1.0, loading
//!    │ close()                │ viewer_loaded()
//!    └────────────────────────┘
//! ```
//!
//! The generated preview page script mirrors these transitions in the
//! browser; the page is rendered from a freshly opened [`PreviewState`] so
//! the initial markup (spinner, zoom label, disabled buttons) is exactly the
//! state right after `open`.
//!
//! Fullscreen has one source of truth: the environment's change
//! notification, delivered through [`PreviewState::fullscreen_changed`].
//! [`PreviewState::toggle_fullscreen`] only produces a request. If the
//! request is denied or unsupported, no notification arrives and nothing
//! changes.

use crate::types::FileItem;
use std::time::Duration;

/// Zoom bounds and step, as multiples of the natural size.
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.25;
pub const ZOOM_DEFAULT: f64 = 1.0;

const MIN_STEPS: u8 = 2;
const MAX_STEPS: u8 = 12;
const DEFAULT_STEPS: u8 = 4;

/// Document zoom, kept as a whole number of quarter steps so repeated
/// in/out never accumulates float error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub fn value(self) -> f64 {
        f64::from(self.0) * ZOOM_STEP
    }

    /// Rounded percentage for the zoom label (`100%`).
    pub fn percent(self) -> u32 {
        u32::from(self.0) * 25
    }

    pub fn can_zoom_in(self) -> bool {
        self.0 < MAX_STEPS
    }

    pub fn can_zoom_out(self) -> bool {
        self.0 > MIN_STEPS
    }

    fn zoom_in(self) -> Self {
        Self((self.0 + 1).min(MAX_STEPS))
    }

    fn zoom_out(self) -> Self {
        Self(self.0.saturating_sub(1).max(MIN_STEPS))
    }

    /// Nearest level to `value`, clamped to the allowed range.
    pub fn from_value(value: f64) -> Self {
        let steps = (value / ZOOM_STEP).round();
        Self(steps.clamp(f64::from(MIN_STEPS), f64::from(MAX_STEPS)) as u8)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_STEPS)
    }
}

/// What the page should do after `toggle_fullscreen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenRequest {
    Enter,
    Exit,
}

/// Instructions for re-fetching the document viewer: clear its source,
/// wait `delay`, restore `src`, then call `finish_reload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadPlan {
    pub src: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    item: Option<FileItem>,
    zoom: ZoomLevel,
    loading: bool,
    fullscreen: bool,
    reload_delay: Duration,
}

impl PreviewState {
    pub fn new(reload_delay: Duration) -> Self {
        Self {
            reload_delay,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.item.is_some()
    }

    pub fn item(&self) -> Option<&FileItem> {
        self.item.as_ref()
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn reload_delay(&self) -> Duration {
        self.reload_delay
    }

    fn showing_document(&self) -> bool {
        self.item.as_ref().is_some_and(FileItem::is_document)
    }

    pub fn open(&mut self, item: FileItem) {
        if item.is_document() {
            self.zoom = ZoomLevel::default();
            self.loading = true;
        } else {
            // Images have no viewer to wait for
            self.loading = false;
        }
        tracing::debug!(path = %item.path, loading = self.loading, "preview opened");
        self.item = Some(item);
    }

    /// Zoom and fullscreen are left as they are; `open` resets what it needs.
    pub fn close(&mut self) {
        if let Some(item) = self.item.take() {
            tracing::debug!(path = %item.path, "preview closed");
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.zoom_out();
    }

    /// Document viewer finished its first render.
    pub fn viewer_loaded(&mut self) {
        self.loading = false;
    }

    pub fn begin_reload(&mut self) -> Option<ReloadPlan> {
        if !self.showing_document() {
            self.loading = false;
            return None;
        }
        self.loading = true;
        self.item.as_ref().map(|item| ReloadPlan {
            src: item.path.clone(),
            delay: self.reload_delay,
        })
    }

    pub fn finish_reload(&mut self) {
        self.loading = false;
    }

    /// Request the opposite of the current fullscreen state. Does not
    /// change state; see [`Self::fullscreen_changed`].
    pub fn toggle_fullscreen(&self) -> Option<FullscreenRequest> {
        if !self.is_open() {
            return None;
        }
        Some(if self.fullscreen {
            FullscreenRequest::Exit
        } else {
            FullscreenRequest::Enter
        })
    }

    /// Environment reported a fullscreen change (including exits through
    /// paths other than our toggle, e.g. the Escape key).
    pub fn fullscreen_changed(&mut self, active: bool) {
        self.fullscreen = active;
    }
}
