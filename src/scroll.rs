//! Scroll-driven zoom for the mission image.
//!
//! As the tracked element travels up through the viewport its scale grows
//! linearly from `base_scale` to `max_scale`. The calculation only needs the
//! element's bounding box relative to the viewport top and the viewport
//! height, so it runs identically in the browser script and in
//! [`crate::simulate`].
//!
//! ```text
//!   element_top >= viewport_height      → base scale (below the fold)
//!   element_top <= -element_height      → unchanged (scrolled past, frozen)
//!   otherwise                           → base + progress * (max - base)
//!
//!   progress = clamp((vh - top) / (vh + height), 0, 1)
//! ```
//!
//! The frozen branch is asymmetric on purpose: once the element leaves above
//! the fold the last computed scale sticks instead of snapping back.

use crate::config::ZoomConfig;

/// Scale with no zoom applied.
pub const BASE_SCALE: f64 = 1.0;
/// Scale reached once the element has fully transited the viewport.
pub const MAX_SCALE: f64 = 1.3;

/// Fraction of the element's transit through the viewport, in `[0, 1]`.
///
/// Returns `None` for degenerate geometry (non-finite input or a
/// non-positive `viewport_height + element_height`).
pub fn transit_progress(element_top: f64, element_height: f64, viewport_height: f64) -> Option<f64> {
    let span = viewport_height + element_height;
    if !element_top.is_finite() || !span.is_finite() || span <= 0.0 {
        return None;
    }
    Some(((viewport_height - element_top) / span).clamp(0.0, 1.0))
}

/// Zoom state for a single tracked element.
///
/// Owns the retained scale, so each element on a page gets its own
/// `ScrollZoom`. Call [`ScrollZoom::update`] once at mount and then on every
/// scroll event.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollZoom {
    base: f64,
    max: f64,
    current: f64,
}

impl Default for ScrollZoom {
    fn default() -> Self {
        Self::new(BASE_SCALE, MAX_SCALE)
    }
}

impl ScrollZoom {
    pub fn new(base: f64, max: f64) -> Self {
        Self {
            base,
            max,
            current: base,
        }
    }

    pub fn from_config(config: &ZoomConfig) -> Self {
        Self::new(config.base_scale, config.max_scale)
    }

    /// The most recently computed scale.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Recompute the scale from the element's position and return it.
    pub fn update(&mut self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        if element_top >= viewport_height {
            self.current = self.base;
        } else if element_top <= -element_height {
            // Scrolled past: keep whatever we had.
        } else if let Some(progress) =
            transit_progress(element_top, element_height, viewport_height)
        {
            self.current = self.base + progress * (self.max - self.base);
        }
        self.current
    }

    /// CSS transform value for the current scale.
    pub fn transform(&self) -> String {
        format!("scale({})", self.current)
    }
}
