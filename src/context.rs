//! Audience-context application, kept as an explicit extension point.
//!
//! The original behavior reads the stored audience tag and locates the
//! context element, then deliberately changes nothing — the intended
//! presentation adjustment was never specified. Rather than guess, the seam
//! is a [`ContextDecorator`] the host can supply; the default decorator
//! mutates nothing so the shipped behavior stays a faithful no-op.

use crate::page::{ElementId, Page};
use crate::query::Selector;
use crate::store::PreferenceStore;

/// Hook invoked when both a stored tag and the context element exist.
pub trait ContextDecorator {
  /// Adjusts the context element's presentation for the given audience tag.
  fn decorate(&self, page: &mut dyn Page, element: ElementId, tag: &str);
}

/// Default decorator: performs no mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDecoration;

impl ContextDecorator for NoDecoration {
  fn decorate(&self, _page: &mut dyn Page, _element: ElementId, _tag: &str) {}
}

/// Reads the preference and hands tag + context element to the decorator.
///
/// Returns true when the decorator ran. A missing tag or a missing context
/// element is a valid no-op, never a failure.
pub fn apply_context(
  page: &mut dyn Page,
  prefs: &PreferenceStore,
  context: &Selector,
  decorator: &dyn ContextDecorator,
) -> bool {
  let Some(tag) = prefs.get() else {
    return false;
  };
  let Some(element) = page.query_first(context) else {
    return false;
  };

  decorator.decorate(page, element, &tag);
  true
}
