//! Scroll-reveal state machine
//!
//! Each reveal target moves through exactly one transition:
//! `Pending → Visible`, fired the first time the target sufficiently enters
//! the trigger region. `Visible` is terminal — leaving and re-entering the
//! viewport afterwards changes nothing.
//!
//! Startup picks one of two modes and never switches:
//!
//! - **Reduced motion**: every target is revealed immediately and no
//!   watcher is installed at all. This is a full bypass, not a degraded
//!   watcher — after it, zero watch registrations exist.
//! - **Normal**: one shared [`ViewportObserver`] watches every target.
//!   When a record marks a target as entered, the controller reveals it and
//!   permanently unwatches it, so fired registrations never accumulate on
//!   long pages full of never-revealed targets.
//!
//! Duplicate reports for an already-visible target are tolerated: the class
//! write is idempotent and unwatching an unwatched target is a no-op.

use crate::media::MediaFlags;
use crate::observer::{IntersectionRecord, RevealOptions, ViewportObserver};
use crate::page::{ElementId, Page};
use rustc_hash::FxHashMap;

/// Lifecycle of one reveal target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
  /// Not yet revealed; watched unless motion is reduced
  Pending,
  /// Revealed; terminal
  Visible,
}

/// Owns the per-target states and the shared watcher
pub struct RevealController {
  states: FxHashMap<ElementId, RevealState>,
  observer: Option<ViewportObserver>,
  visible_class: String,
}

impl RevealController {
  /// Installs reveal behavior over `targets`
  ///
  /// With reduced motion, all targets are revealed before this returns and
  /// no observer exists. Otherwise all targets start `Pending` under one
  /// shared observer.
  pub fn install(
    page: &mut dyn Page,
    targets: Vec<ElementId>,
    flags: MediaFlags,
    options: RevealOptions,
    visible_class: &str,
  ) -> Self {
    let mut controller = Self {
      states: FxHashMap::default(),
      observer: None,
      visible_class: visible_class.to_string(),
    };

    if flags.prefers_reduced_motion {
      for target in targets {
        controller.reveal(page, target);
      }
      return controller;
    }

    let mut observer = ViewportObserver::new(options);
    for target in targets {
      controller.states.insert(target, RevealState::Pending);
      observer.observe(target);
    }
    controller.observer = Some(observer);
    controller
  }

  /// Runs one watcher pass and applies the resulting batch
  ///
  /// Convenience for hosts driving the observer from their event loop.
  /// Returns how many targets were newly revealed; always zero after the
  /// reduced-motion bypass, which has no observer to sweep.
  pub fn sweep(&mut self, page: &mut dyn Page) -> usize {
    let records = match self.observer.as_mut() {
      Some(observer) => observer.sweep(&*page),
      None => return 0,
    };
    self.on_intersections(page, &records)
  }

  /// Applies one batch of intersection records
  ///
  /// Entered targets transition to `Visible` and are unwatched. Targets
  /// reported below threshold, or as having left before ever revealing,
  /// stay `Pending` and watched. Records for already-visible or unknown
  /// targets are tolerated no-ops. Returns the newly revealed count.
  pub fn on_intersections(
    &mut self,
    page: &mut dyn Page,
    records: &[IntersectionRecord],
  ) -> usize {
    let mut revealed = 0;
    for record in records {
      if !record.is_intersecting {
        continue;
      }
      match self.states.get(&record.target) {
        Some(RevealState::Pending) => {
          self.reveal(page, record.target);
          revealed += 1;
        }
        Some(RevealState::Visible) => {
          // Duplicate report after reveal: make sure the registration is
          // gone, nothing else.
          self.unwatch(record.target);
        }
        None => {}
      }
    }
    revealed
  }

  /// Stops watching `target`; safe to call any number of times
  pub fn unwatch(&mut self, target: ElementId) {
    if let Some(observer) = self.observer.as_mut() {
      observer.unobserve(target);
    }
  }

  /// Current state of `target`, if it is a reveal target at all
  pub fn state(&self, target: ElementId) -> Option<RevealState> {
    self.states.get(&target).copied()
  }

  /// Whether `target` currently has a live watch registration
  pub fn is_watching(&self, target: ElementId) -> bool {
    self
      .observer
      .as_ref()
      .is_some_and(|observer| observer.is_watching(target))
  }

  /// Live watch registrations; zero after the reduced-motion bypass
  pub fn watched_count(&self) -> usize {
    self
      .observer
      .as_ref()
      .map_or(0, ViewportObserver::watched_count)
  }

  /// Number of targets still pending
  pub fn pending_count(&self) -> usize {
    self
      .states
      .values()
      .filter(|&&s| s == RevealState::Pending)
      .count()
  }

  fn reveal(&mut self, page: &mut dyn Page, target: ElementId) {
    self.states.insert(target, RevealState::Visible);
    page.add_class(target, &self.visible_class);
    self.unwatch(target);
  }
}
