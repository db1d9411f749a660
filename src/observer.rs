//! Shared viewport watcher for scroll reveal
//!
//! One [`ViewportObserver`] watches every reveal target. The watcher does
//! not see the true viewport: its trigger region is the viewport with the
//! bottom edge raised by a fixed offset, so an element "enters" only once
//! enough of it sits above that trigger line — slightly before it has fully
//! scrolled into view, and never while it only peeks into the bottom band.
//! A minimum-visible-fraction threshold below which an intersection does
//! not count as entered is applied on top.
//!
//! Delivery is host-driven: the host's event loop calls
//! [`ViewportObserver::sweep`] on scroll/frame events, after startup has
//! returned. A sweep evaluates every watched target and returns a batch of
//! [`IntersectionRecord`]s — zero, one, or many — for targets whose
//! intersection state changed since the last report. The first sweep
//! reports every watched target once, so a target sitting below threshold
//! is observably "reported but not entered" rather than silently skipped.
//!
//! The observer holds no element state beyond its registry; deciding what a
//! record *means* belongs to [`crate::reveal::RevealController`].

use crate::geometry::Rect;
use crate::page::{ElementId, Page};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Tuning for the reveal trigger region
///
/// # Examples
///
/// ```
/// use uplift::RevealOptions;
///
/// let options = RevealOptions::default();
/// assert_eq!(options.trigger_offset, 48.0);
/// assert_eq!(options.min_visible_fraction, 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealOptions {
  /// How far above the true viewport bottom the trigger line sits, in px
  pub trigger_offset: f32,

  /// Fraction of a target's area that must be inside the trigger region
  /// before it counts as entered
  pub min_visible_fraction: f32,
}

impl Default for RevealOptions {
  fn default() -> Self {
    Self {
      trigger_offset: 48.0,
      min_visible_fraction: 0.1,
    }
  }
}

/// One target's intersection state, as delivered in a sweep batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRecord {
  /// The watched element
  pub target: ElementId,
  /// Fraction of the target's area inside the trigger region
  pub visible_fraction: f32,
  /// Whether that fraction clears the entry threshold
  pub is_intersecting: bool,
}

/// The shared watcher over all reveal targets
pub struct ViewportObserver {
  options: RevealOptions,
  watched: FxHashMap<ElementId, Option<bool>>,
}

impl ViewportObserver {
  /// Creates a watcher with the given tuning and nothing under watch
  pub fn new(options: RevealOptions) -> Self {
    Self {
      options,
      watched: FxHashMap::default(),
    }
  }

  /// The tuning this watcher was installed with
  pub fn options(&self) -> RevealOptions {
    self.options
  }

  /// Starts watching `target`
  ///
  /// Re-observing an already-watched target keeps its reporting state.
  pub fn observe(&mut self, target: ElementId) {
    self.watched.entry(target).or_insert(None);
  }

  /// Stops watching `target`; unobserving an unwatched target is a no-op
  pub fn unobserve(&mut self, target: ElementId) {
    self.watched.remove(&target);
  }

  /// Whether `target` is currently under watch
  pub fn is_watching(&self, target: ElementId) -> bool {
    self.watched.contains_key(&target)
  }

  /// Number of live watch registrations
  pub fn watched_count(&self) -> usize {
    self.watched.len()
  }

  /// The trigger region for a given viewport
  pub fn trigger_region(&self, viewport: Rect) -> Rect {
    viewport.shrink_bottom(self.options.trigger_offset)
  }

  /// Evaluates all watched targets against the current viewport
  ///
  /// Returns records (in ascending target order) for every target whose
  /// intersection state changed since the last report, including the
  /// initial report after `observe`. A target with no layout bounds is
  /// treated as not intersecting.
  pub fn sweep(&mut self, page: &dyn Page) -> Vec<IntersectionRecord> {
    let region = self.trigger_region(page.viewport());

    let mut targets: Vec<ElementId> = self.watched.keys().copied().collect();
    targets.sort_unstable();

    let mut records = Vec::new();
    for target in targets {
      let visible_fraction = page
        .element_bounds(target)
        .map(|bounds| bounds.fraction_inside(region))
        .unwrap_or(0.0);
      let is_intersecting =
        visible_fraction > 0.0 && visible_fraction >= self.options.min_visible_fraction;

      let last = self.watched.get_mut(&target);
      let Some(last) = last else { continue };
      if *last != Some(is_intersecting) {
        *last = Some(is_intersecting);
        records.push(IntersectionRecord {
          target,
          visible_fraction,
          is_intersecting,
        });
      }
    }
    records
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::page::{ElementSpec, StaticPage};

  fn page_with_target(bounds: Rect) -> (StaticPage, ElementId) {
    let mut page = StaticPage::new();
    let el = page.insert(ElementSpec::new("div").with_class("reveal").with_bounds(bounds));
    (page, el)
  }

  #[test]
  fn test_observe_and_unobserve_registrations() {
    let (_, el) = page_with_target(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
    let mut observer = ViewportObserver::new(RevealOptions::default());

    assert_eq!(observer.watched_count(), 0);
    observer.observe(el);
    assert!(observer.is_watching(el));
    assert_eq!(observer.watched_count(), 1);

    observer.unobserve(el);
    assert!(!observer.is_watching(el));

    // Second unobserve is a no-op, not a failure.
    observer.unobserve(el);
    assert_eq!(observer.watched_count(), 0);
  }

  #[test]
  fn test_first_sweep_reports_every_target() {
    let mut page = StaticPage::new();
    let inside = page.insert(
      ElementSpec::new("div").with_bounds(Rect::from_xywh(0.0, 100.0, 100.0, 100.0)),
    );
    let below = page.insert(
      ElementSpec::new("div").with_bounds(Rect::from_xywh(0.0, 5000.0, 100.0, 100.0)),
    );

    let mut observer = ViewportObserver::new(RevealOptions::default());
    observer.observe(inside);
    observer.observe(below);

    let records = observer.sweep(&page);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].target, inside);
    assert!(records[0].is_intersecting);
    assert_eq!(records[1].target, below);
    assert!(!records[1].is_intersecting);
  }

  #[test]
  fn test_unchanged_state_is_not_rereported() {
    let (page, el) = page_with_target(Rect::from_xywh(0.0, 100.0, 100.0, 100.0));
    let mut observer = ViewportObserver::new(RevealOptions::default());
    observer.observe(el);

    assert_eq!(observer.sweep(&page).len(), 1);
    assert_eq!(observer.sweep(&page).len(), 0);
  }

  #[test]
  fn test_state_change_reports_again() {
    let (mut page, el) = page_with_target(Rect::from_xywh(0.0, 5000.0, 100.0, 100.0));
    let mut observer = ViewportObserver::new(RevealOptions::default());
    observer.observe(el);

    let first = observer.sweep(&page);
    assert!(!first[0].is_intersecting);

    // Scroll the viewport down to the element.
    page.set_viewport(Rect::from_xywh(0.0, 4800.0, 1280.0, 720.0));
    let second = observer.sweep(&page);
    assert_eq!(second.len(), 1);
    assert!(second[0].is_intersecting);
  }

  #[test]
  fn test_below_threshold_fraction_is_not_entered() {
    // 720px viewport, 48px trigger offset: trigger line at y=672.
    // Target spans y 662..762: 10 of 100 rows above the line = 0.10, but
    // options demand 0.25.
    let (page, el) = page_with_target(Rect::from_xywh(0.0, 662.0, 100.0, 100.0));
    let mut observer = ViewportObserver::new(RevealOptions {
      trigger_offset: 48.0,
      min_visible_fraction: 0.25,
    });
    observer.observe(el);

    let records = observer.sweep(&page);
    assert_eq!(records.len(), 1);
    assert!((records[0].visible_fraction - 0.10).abs() < 1e-6);
    assert!(!records[0].is_intersecting);
  }

  #[test]
  fn test_bottom_band_does_not_trigger() {
    // Entirely inside the 48px band above the true bottom edge (672..720):
    // visible in the viewport, but not in the trigger region.
    let (page, el) = page_with_target(Rect::from_xywh(0.0, 680.0, 100.0, 30.0));
    let mut observer = ViewportObserver::new(RevealOptions::default());
    observer.observe(el);

    let records = observer.sweep(&page);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].visible_fraction, 0.0);
    assert!(!records[0].is_intersecting);
  }

  #[test]
  fn test_target_without_layout_is_not_intersecting() {
    let mut page = StaticPage::new();
    let el = page.insert(ElementSpec::new("div").with_class("reveal"));
    let mut observer = ViewportObserver::new(RevealOptions::default());
    observer.observe(el);

    let records = observer.sweep(&page);
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_intersecting);
  }
}
