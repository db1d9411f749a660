//! Active-location marking for navigation entries
//!
//! One-shot at startup: every navigation link whose target's final path
//! segment equals the current location's final path segment gets the active
//! class. The current location defaults to the canonical index name when
//! its path is empty or ends at a directory; hrefs get no such defaulting.
//! Matching is exact string equality on the final segment only — query
//! strings and fragments are stripped first, and there is no
//! directory-prefix matching. The marker never reacts to later client-side
//! navigation.

use crate::page::{ElementId, Page};
use crate::query::Selector;
use rustc_hash::FxHashSet;
use url::Url;

/// Marks every matching navigation entry on `page` with `active_class`
///
/// `selectors` are tried in order and their results merged (an element
/// matched by several selectors is still marked once). Returns how many
/// entries were marked; zero matches is a valid outcome.
pub fn mark_active_entries(
  page: &mut dyn Page,
  selectors: &[Selector],
  active_class: &str,
  index_page: &str,
) -> usize {
  let current = current_page_name(&page.location_path(), index_page);

  let mut seen: FxHashSet<ElementId> = FxHashSet::default();
  let mut entries: Vec<ElementId> = Vec::new();
  for selector in selectors {
    for element in page.query_all(selector) {
      if seen.insert(element) {
        entries.push(element);
      }
    }
  }

  let mut marked = 0;
  for element in entries {
    let Some(href) = page.attribute(element, "href") else {
      continue;
    };
    if href_page_name(&href) == current {
      page.add_class(element, active_class);
      marked += 1;
    }
  }
  marked
}

/// Final path segment of the current location, defaulted to `index_page`
///
/// Empty paths, `/`, and directory paths like `/services/` all resolve to
/// the index name.
pub fn current_page_name(path: &str, index_page: &str) -> String {
  let segment = final_path_segment(strip_query_and_fragment(path));
  if segment.is_empty() {
    index_page.to_string()
  } else {
    segment.to_string()
  }
}

/// Final path segment a navigation href points at
///
/// Absolute URLs are parsed properly; relative hrefs fall back to manual
/// string handling. No index defaulting here — only the current location
/// gets that.
pub fn href_page_name(href: &str) -> String {
  if let Ok(parsed) = Url::parse(href) {
    return final_path_segment(parsed.path()).to_string();
  }
  final_path_segment(strip_query_and_fragment(href)).to_string()
}

fn strip_query_and_fragment(path: &str) -> &str {
  let end = path.find(['?', '#']).unwrap_or(path.len());
  &path[..end]
}

fn final_path_segment(path: &str) -> &str {
  match path.rfind('/') {
    Some(idx) => &path[idx + 1..],
    None => path,
  }
}
