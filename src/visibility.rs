//! One-way reveal flags for page regions.
//!
//! Each page section that fades in on scroll is a *region*. A region starts
//! [`RevealState::Hidden`] and flips to [`RevealState::Revealed`] the first
//! time enough of it is inside the viewport. The flip is terminal: scrolling
//! the region back out never hides it again.
//!
//! ## Intersection rule
//!
//! The effective viewport is the window with its bottom edge pulled up by
//! `early_margin` pixels. A region qualifies when the fraction of its area
//! inside that rectangle exceeds `threshold`:
//!
//! ```text
//!   0 ┌──────────────────────┐
//!     │      viewport        │
//!     │   ┌──────────┐       │
//!     │   │  region  │       │  ratio = overlap / region area
//!  vh-m ──┼──────────┼───────┤  ← effective bottom edge
//!     │   └──────────┘       │
//!  vh └──────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! [`VisibilityTracker::observe`] hands out a [`Subscription`] guard. Dropping
//! it (or calling [`Subscription::dispose`], any number of times) stops
//! observation. Entries delivered for a disposed subscription are ignored,
//! and a subscription that outlives its tracker disposes as a no-op.
//!
//! A region's flag lives as long as the region is observed. When its last
//! subscription goes away the flag is dropped, so a region mounted again
//! under the same name starts hidden.
//!
//! The tracker is single-threaded (`Rc<RefCell<_>>`), matching the UI event
//! loop it models.

use crate::config::RevealConfig;
use kurbo::{Rect, Size};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Fraction of a region's area that must be visible.
pub const DEFAULT_THRESHOLD: f64 = 0.05;
/// Pixels trimmed off the bottom of the viewport before testing.
pub const DEFAULT_EARLY_MARGIN: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub early_margin: f64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            early_margin: DEFAULT_EARLY_MARGIN,
        }
    }
}

impl RevealOptions {
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            early_margin: config.early_margin,
        }
    }

    /// Options with no early margin, e.g. the programs grid (`threshold = 0.1`).
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            early_margin: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

/// Fraction of `region` inside the viewport once its bottom edge is pulled
/// up by `early_margin`.
///
/// Zero-area regions count as fully visible when their origin sits inside
/// (or on the edge of) the effective viewport.
pub fn visible_ratio(region: Rect, viewport: Size, early_margin: f64) -> f64 {
    let root = Rect::new(
        0.0,
        0.0,
        viewport.width.max(0.0),
        (viewport.height - early_margin.max(0.0)).max(0.0),
    );
    if root.height() <= 0.0 || root.width() <= 0.0 {
        return 0.0;
    }
    let region = region.abs();
    let area = region.area();
    if !area.is_finite() {
        return 0.0;
    }
    if area <= 0.0 {
        let origin = region.origin();
        let inside = origin.x >= root.x0
            && origin.x <= root.x1
            && origin.y >= root.y0
            && origin.y <= root.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    (region.intersect(root).area() / area).clamp(0.0, 1.0)
}

/// Whether a measured ratio is enough to reveal under `options`.
///
/// The ratio must exceed the threshold. A fully visible region always
/// qualifies, so `threshold = 1.0` still fires.
pub fn qualifies(ratio: f64, options: &RevealOptions) -> bool {
    let threshold = options.threshold.clamp(0.0, 1.0);
    ratio > threshold || (threshold >= 1.0 && ratio >= 1.0)
}

/// Opaque identifier of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// One intersection measurement for an observed region.
#[derive(Debug, Clone, Copy)]
pub struct IntersectionEntry {
    pub subscription: SubscriptionId,
    /// Region bounds relative to the viewport's top-left corner.
    pub bounds: Rect,
}

#[derive(Debug)]
struct Observation {
    region: String,
    options: RevealOptions,
    /// Shared with the [`Subscription`]; cleared on dispose.
    live: Rc<Cell<bool>>,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: HashMap<SubscriptionId, Observation>,
    states: HashMap<String, RevealState>,
}

impl Registry {
    /// Remove one observation, dropping the region's flag if nothing else
    /// observes it.
    fn release(&mut self, id: SubscriptionId) {
        let Some(observation) = self.active.remove(&id) else {
            return;
        };
        let still_observed = self
            .active
            .values()
            .any(|o| o.region == observation.region && o.live.get());
        if !still_observed {
            self.states.remove(&observation.region);
            tracing::trace!(region = %observation.region, "region released");
        }
    }

    /// Release observations whose guard was disposed while the registry
    /// was borrowed.
    fn purge_disposed(&mut self) {
        let stale: Vec<SubscriptionId> = self
            .active
            .iter()
            .filter(|(_, o)| !o.live.get())
            .map(|(id, _)| *id)
            .collect();
        for id in stale {
            self.release(id);
        }
    }
}

/// Tracks reveal flags for any number of independent regions.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    registry: Rc<RefCell<Registry>>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `region`.
    ///
    /// `None` stands for a region that is not attached to the page yet; the
    /// call is then a no-op and returns no subscription.
    pub fn observe(&self, region: Option<&str>, options: RevealOptions) -> Option<Subscription> {
        let region = region?;
        let mut registry = self.registry.borrow_mut();
        registry.purge_disposed();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        let live = Rc::new(Cell::new(true));
        registry.states.entry(region.to_string()).or_default();
        registry.active.insert(
            id,
            Observation {
                region: region.to_string(),
                options,
                live: Rc::clone(&live),
            },
        );
        tracing::trace!(region, ?id, "observing region");
        Some(Subscription {
            id,
            region: region.to_string(),
            live,
            registry: Rc::downgrade(&self.registry),
        })
    }

    /// Observe each region of a per-item list independently.
    pub fn observe_each<'a>(
        &self,
        regions: impl IntoIterator<Item = &'a str>,
        options: RevealOptions,
    ) -> Vec<Subscription> {
        regions
            .into_iter()
            .filter_map(|region| self.observe(Some(region), options))
            .collect()
    }

    /// Apply a batch of intersection measurements.
    ///
    /// Returns the regions that flipped to revealed during this batch, in
    /// entry order. Entries for disposed subscriptions and for regions that
    /// are already revealed are skipped.
    pub fn deliver(&self, viewport: Size, entries: &[IntersectionEntry]) -> Vec<String> {
        let mut registry = self.registry.borrow_mut();
        registry.purge_disposed();
        let Registry { active, states, .. } = &mut *registry;
        let mut revealed = Vec::new();
        for entry in entries {
            let Some(observation) = active.get(&entry.subscription) else {
                continue;
            };
            if !observation.live.get() {
                continue;
            }
            let state = states.entry(observation.region.clone()).or_default();
            if *state == RevealState::Revealed {
                continue;
            }
            let ratio = visible_ratio(entry.bounds, viewport, observation.options.early_margin);
            if qualifies(ratio, &observation.options) {
                *state = RevealState::Revealed;
                tracing::debug!(region = %observation.region, ratio, "region revealed");
                revealed.push(observation.region.clone());
            }
        }
        revealed
    }

    pub fn state(&self, region: &str) -> RevealState {
        self.registry
            .borrow()
            .states
            .get(region)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_revealed(&self, region: &str) -> bool {
        self.state(region) == RevealState::Revealed
    }

    /// Whether `subscription` is still being observed.
    pub fn is_active(&self, subscription: SubscriptionId) -> bool {
        self.registry
            .borrow()
            .active
            .get(&subscription)
            .is_some_and(|o| o.live.get())
    }

    /// Reset a region's flag to hidden while it stays observed.
    pub fn forget(&self, region: &str) {
        self.registry.borrow_mut().states.remove(region);
    }
}

/// Guard for one observation; disposes itself on drop.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    region: String,
    live: Rc<Cell<bool>>,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Stop observing. Safe to call repeatedly and after the tracker is gone.
    pub fn dispose(&self) {
        if !self.live.replace(false) {
            return;
        }
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // A busy registry releases the entry on its next `deliver`.
        if let Ok(mut registry) = registry.try_borrow_mut() {
            registry.release(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
