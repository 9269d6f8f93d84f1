//! Scroll simulation over a page layout.
//!
//! The browser drives [`crate::scroll`] and [`crate::visibility`] from scroll
//! and intersection events. [`ScrollDriver`] is the same bridge without a
//! browser: it mounts the regions of a [`PageLayout`], converts page
//! coordinates into viewport coordinates for a scroll offset, and feeds the
//! results to a [`VisibilityTracker`] and a [`ScrollZoom`].
//!
//! [`simulate`] walks a page from top to bottom in fixed steps and reports
//! where each section reveals and how the mission image scales, which is
//! handy when tuning `[reveal]` and `[zoom]` in `site.toml`.
//!
//! ## Layout file
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "regions": [
//!     { "name": "mission", "top": 900, "height": 420 },
//!     { "name": "programs", "top": 1400, "height": 600, "threshold": 0.1, "early_margin": 0 },
//!     { "name": "late-widget", "top": 2400, "height": 200, "mounted": false }
//!   ],
//!   "zoom": { "top": 1320, "height": 500 }
//! }
//! ```

use crate::config::SiteConfig;
use crate::scroll::ScrollZoom;
use crate::visibility::{IntersectionEntry, RevealOptions, Subscription, VisibilityTracker};
use kurbo::{Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid layout: {0}")]
    Layout(String),
    #[error("Scroll step must be a positive number of pixels, got {0}")]
    Step(f64),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRegion {
    pub name: String,
    /// Distance from the top of the page.
    pub top: f64,
    pub height: f64,
    /// Regions that never mount are never observed.
    #[serde(default = "default_mounted")]
    pub mounted: bool,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub early_margin: Option<f64>,
}

fn default_mounted() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoomTarget {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub viewport: ViewportSize,
    pub regions: Vec<LayoutRegion>,
    #[serde(default)]
    pub zoom: Option<ZoomTarget>,
}

impl PageLayout {
    pub fn load(path: &Path) -> Result<Self, SimulateError> {
        let raw = fs::read_to_string(path)?;
        let layout: PageLayout = serde_json::from_str(&raw)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), SimulateError> {
        if self.viewport.width.is_nan()
            || self.viewport.height.is_nan()
            || self.viewport.width <= 0.0
            || self.viewport.height <= 0.0
        {
            return Err(SimulateError::Layout("viewport must have a positive size".into()));
        }
        let mut names = HashSet::new();
        for region in &self.regions {
            if region.name.is_empty() {
                return Err(SimulateError::Layout("region without a name".into()));
            }
            if !names.insert(region.name.as_str()) {
                return Err(SimulateError::Layout(format!(
                    "duplicate region name '{}'",
                    region.name
                )));
            }
            if !region.height.is_finite() || region.height < 0.0 || !region.top.is_finite() {
                return Err(SimulateError::Layout(format!(
                    "region '{}' has invalid geometry",
                    region.name
                )));
            }
        }
        if let Some(zoom) = &self.zoom
            && (!zoom.height.is_finite() || zoom.height <= 0.0 || !zoom.top.is_finite())
        {
            return Err(SimulateError::Layout("zoom target has invalid geometry".into()));
        }
        Ok(())
    }

    /// Bottom edge of the lowest region or zoom target.
    pub fn page_height(&self) -> f64 {
        let regions = self.regions.iter().map(|r| r.top + r.height);
        let zoom = self.zoom.iter().map(|z| z.top + z.height);
        regions.chain(zoom).fold(self.viewport.height, f64::max)
    }
}

/// State after handling one scroll position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollFrame {
    pub offset: f64,
    /// Zoom scale, when the layout has a zoom target.
    pub scale: Option<f64>,
    /// Regions that revealed at this offset.
    pub revealed: Vec<String>,
}

struct Observed {
    subscription: Subscription,
    page_bounds: Rect,
}

/// Bridges scroll positions to the reveal tracker and the zoom state.
pub struct ScrollDriver {
    tracker: VisibilityTracker,
    observed: Vec<Observed>,
    zoom: Option<(ScrollZoom, ZoomTarget)>,
    viewport: Size,
}

impl ScrollDriver {
    /// Observe every mounted region. Nothing is measured until the first
    /// [`ScrollDriver::scroll_to`].
    pub fn mount(layout: &PageLayout, config: &SiteConfig) -> Self {
        let tracker = VisibilityTracker::new();
        let defaults = RevealOptions::from_config(&config.reveal);
        let observed = layout
            .regions
            .iter()
            .filter_map(|region| {
                let options = RevealOptions {
                    threshold: region.threshold.unwrap_or(defaults.threshold),
                    early_margin: region.early_margin.unwrap_or(defaults.early_margin),
                };
                let handle = region.mounted.then_some(region.name.as_str());
                let subscription = tracker.observe(handle, options)?;
                Some(Observed {
                    subscription,
                    page_bounds: Rect::from_origin_size(
                        (0.0, region.top),
                        (layout.viewport.width, region.height),
                    ),
                })
            })
            .collect();
        let zoom = layout
            .zoom
            .map(|target| (ScrollZoom::from_config(&config.zoom), target));
        Self {
            tracker,
            observed,
            zoom,
            viewport: Size::new(layout.viewport.width, layout.viewport.height),
        }
    }

    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    /// Handle the page being scrolled to `offset` pixels.
    pub fn scroll_to(&mut self, offset: f64) -> ScrollFrame {
        let shift = Vec2::new(0.0, -offset);
        let entries: Vec<IntersectionEntry> = self
            .observed
            .iter()
            .map(|o| IntersectionEntry {
                subscription: o.subscription.id(),
                bounds: o.page_bounds + shift,
            })
            .collect();
        let revealed = self.tracker.deliver(self.viewport, &entries);

        let viewport_height = self.viewport.height;
        let scale = self
            .zoom
            .as_mut()
            .map(|(zoom, target)| zoom.update(target.top - offset, target.height, viewport_height));

        ScrollFrame {
            offset,
            scale,
            revealed,
        }
    }

    /// Stop observing one region, as when its section unmounts. Its reveal
    /// flag goes with it.
    pub fn unmount(&mut self, region: &str) {
        self.observed.retain(|o| o.subscription.region() != region);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealEvent {
    pub region: String,
    pub offset: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub viewport: ViewportSize,
    pub page_height: f64,
    pub frames: Vec<ScrollFrame>,
    pub reveals: Vec<RevealEvent>,
    /// Regions (mounted or not) that were still hidden at the bottom.
    pub hidden: Vec<String>,
}

/// Scroll `layout` from the top to the bottom in `step`-pixel increments.
pub fn simulate(
    layout: &PageLayout,
    config: &SiteConfig,
    step: f64,
) -> Result<SimulationReport, SimulateError> {
    if !step.is_finite() || step <= 0.0 {
        return Err(SimulateError::Step(step));
    }
    layout.validate()?;

    let page_height = layout.page_height();
    let max_offset = (page_height - layout.viewport.height).max(0.0);
    let mut driver = ScrollDriver::mount(layout, config);
    let mut frames = Vec::new();
    let mut reveals = Vec::new();

    let mut offset = 0.0;
    loop {
        let frame = driver.scroll_to(offset);
        reveals.extend(frame.revealed.iter().map(|region| RevealEvent {
            region: region.clone(),
            offset,
        }));
        frames.push(frame);
        if offset >= max_offset {
            break;
        }
        offset = (offset + step).min(max_offset);
    }

    let hidden = layout
        .regions
        .iter()
        .filter(|r| !driver.tracker().is_revealed(&r.name))
        .map(|r| r.name.clone())
        .collect();

    tracing::info!(
        frames = frames.len(),
        reveals = reveals.len(),
        "scroll simulation finished"
    );
    Ok(SimulationReport {
        viewport: layout.viewport,
        page_height,
        frames,
        reveals,
        hidden,
    })
}
