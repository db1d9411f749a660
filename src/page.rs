//! Page capability surface
//!
//! Every environment touch goes through the [`Page`] trait: element queries,
//! attribute and class access, the current location, document readiness, and
//! geometry for the viewport observer. The enhancement components never see
//! a real DOM — a deployment implements `Page` over its host document, and
//! [`StaticPage`] provides an in-memory implementation for tests and
//! server-side pre-render checks.
//!
//! Element handles are opaque [`ElementId`]s minted by the page. They are
//! read-only references into structure the crate does not own; the only
//! mutation the capability exposes is the idempotent `add_class`.

use crate::geometry::Rect;
use crate::query::Selector;

/// Opaque handle to a page element
///
/// Stable for the lifetime of a page load. Hashable so watcher registries
/// can key on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

/// Document readiness, used to gate startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
  /// Document still loading; startup must be deferred to the ready event
  Loading,
  /// DOM available, subresources may still be loading
  Interactive,
  /// Fully loaded
  Complete,
}

/// Host-document capability required by the enhancement components
pub trait Page {
  /// All elements matching `selector`, in document order
  fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

  /// First element matching `selector`, if any
  fn query_first(&self, selector: &Selector) -> Option<ElementId> {
    self.query_all(selector).into_iter().next()
  }

  /// Value of the named attribute on `element`, if present
  fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

  /// Whether `element` carries the given class
  fn has_class(&self, element: ElementId, class: &str) -> bool;

  /// Adds a class to `element`; adding a class it already has is a no-op
  fn add_class(&mut self, element: ElementId, class: &str);

  /// Path component of the current location (e.g. `/about.html`)
  fn location_path(&self) -> String;

  /// Current document readiness
  fn ready_state(&self) -> ReadyState;

  /// The currently visible region of the document, in document coordinates
  ///
  /// Scrolling moves this rectangle down the document.
  fn viewport(&self) -> Rect;

  /// Bounding rectangle of `element`, in the same document coordinates
  ///
  /// `None` when the element has no layout (e.g. `display: none`).
  fn element_bounds(&self, element: ElementId) -> Option<Rect>;
}

/// Description of one element for [`StaticPage::insert`]
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
  tag: String,
  classes: Vec<String>,
  attributes: Vec<(String, String)>,
  parent: Option<ElementId>,
  bounds: Option<Rect>,
}

impl ElementSpec {
  /// Starts a spec for an element with the given tag name
  pub fn new(tag: &str) -> Self {
    Self {
      tag: tag.to_ascii_lowercase(),
      ..Self::default()
    }
  }

  /// Adds a class
  pub fn with_class(mut self, class: &str) -> Self {
    self.classes.push(class.to_string());
    self
  }

  /// Adds an attribute
  pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
    self.attributes.push((name.to_string(), value.to_string()));
    self
  }

  /// Places the element under `parent` for descendant matching
  pub fn with_parent(mut self, parent: ElementId) -> Self {
    self.parent = Some(parent);
    self
  }

  /// Gives the element layout bounds in document coordinates
  pub fn with_bounds(mut self, bounds: Rect) -> Self {
    self.bounds = Some(bounds);
    self
  }
}

struct PageElement {
  tag: String,
  classes: Vec<String>,
  attributes: Vec<(String, String)>,
  parent: Option<ElementId>,
  bounds: Option<Rect>,
}

/// In-memory [`Page`] implementation
///
/// Holds a flat element list with scripted location, readiness, viewport,
/// and per-element bounds, so scenarios can be driven without a rendering
/// environment: tests script scroll with [`StaticPage::set_viewport`] and
/// readiness transitions with [`StaticPage::set_ready_state`].
///
/// # Examples
///
/// ```
/// use uplift::{ElementSpec, Page, Selector, StaticPage};
///
/// let mut page = StaticPage::new();
/// let nav = page.insert(ElementSpec::new("nav"));
/// page.insert(
///   ElementSpec::new("a")
///     .with_attribute("href", "/about.html")
///     .with_parent(nav),
/// );
///
/// let links = Selector::parse("nav a").unwrap();
/// assert_eq!(page.query_all(&links).len(), 1);
/// ```
pub struct StaticPage {
  elements: Vec<PageElement>,
  location_path: String,
  ready_state: ReadyState,
  viewport: Rect,
}

impl StaticPage {
  /// Creates an empty page at `/`, fully loaded, with a 1280×720 viewport
  pub fn new() -> Self {
    Self {
      elements: Vec::new(),
      location_path: "/".to_string(),
      ready_state: ReadyState::Complete,
      viewport: Rect::from_xywh(0.0, 0.0, 1280.0, 720.0),
    }
  }

  /// Inserts an element and returns its handle
  pub fn insert(&mut self, spec: ElementSpec) -> ElementId {
    let id = ElementId(self.elements.len() as u32);
    self.elements.push(PageElement {
      tag: spec.tag,
      classes: spec.classes,
      attributes: spec.attributes,
      parent: spec.parent,
      bounds: spec.bounds,
    });
    id
  }

  /// Sets the location path reported to components
  pub fn set_location(&mut self, path: &str) {
    self.location_path = path.to_string();
  }

  /// Sets the readiness reported to components
  pub fn set_ready_state(&mut self, state: ReadyState) {
    self.ready_state = state;
  }

  /// Moves the viewport (scripted scrolling)
  pub fn set_viewport(&mut self, viewport: Rect) {
    self.viewport = viewport;
  }

  /// Repositions one element (scripted layout change)
  pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
    if let Some(el) = self.elements.get_mut(element.0 as usize) {
      el.bounds = Some(bounds);
    }
  }

  fn get(&self, element: ElementId) -> Option<&PageElement> {
    self.elements.get(element.0 as usize)
  }

  fn matches_with_ancestry(&self, index: usize, selector: &Selector) -> bool {
    let el = &self.elements[index];
    if !selector.target().matches(&el.tag, &el.classes, &el.attributes) {
      return false;
    }

    let Some(ancestor) = selector.ancestor() else {
      return true;
    };

    let mut current = el.parent;
    while let Some(parent_id) = current {
      let Some(parent) = self.get(parent_id) else {
        return false;
      };
      if ancestor.matches(&parent.tag, &parent.classes, &parent.attributes) {
        return true;
      }
      current = parent.parent;
    }
    false
  }
}

impl Default for StaticPage {
  fn default() -> Self {
    Self::new()
  }
}

impl Page for StaticPage {
  fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
    (0..self.elements.len())
      .filter(|&i| self.matches_with_ancestry(i, selector))
      .map(|i| ElementId(i as u32))
      .collect()
  }

  fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
    let el = self.get(element)?;
    if name.eq_ignore_ascii_case("class") {
      return Some(el.classes.join(" "));
    }
    el.attributes
      .iter()
      .find(|(k, _)| k.eq_ignore_ascii_case(name))
      .map(|(_, v)| v.clone())
  }

  fn has_class(&self, element: ElementId, class: &str) -> bool {
    self
      .get(element)
      .is_some_and(|el| el.classes.iter().any(|c| c == class))
  }

  fn add_class(&mut self, element: ElementId, class: &str) {
    if let Some(el) = self.elements.get_mut(element.0 as usize) {
      if !el.classes.iter().any(|c| c == class) {
        el.classes.push(class.to_string());
      }
    }
  }

  fn location_path(&self) -> String {
    self.location_path.clone()
  }

  fn ready_state(&self) -> ReadyState {
    self.ready_state
  }

  fn viewport(&self) -> Rect {
    self.viewport
  }

  fn element_bounds(&self, element: ElementId) -> Option<Rect> {
    self.get(element)?.bounds
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_query_by_class() {
    let mut page = StaticPage::new();
    page.insert(ElementSpec::new("div").with_class("reveal"));
    page.insert(ElementSpec::new("div"));
    page.insert(ElementSpec::new("section").with_class("reveal"));

    let sel = Selector::parse(".reveal").unwrap();
    assert_eq!(page.query_all(&sel).len(), 2);
  }

  #[test]
  fn test_query_descendant() {
    let mut page = StaticPage::new();
    let nav = page.insert(ElementSpec::new("nav"));
    let inside = page.insert(ElementSpec::new("a").with_parent(nav));
    let outside = page.insert(ElementSpec::new("a"));

    let sel = Selector::parse("nav a").unwrap();
    let found = page.query_all(&sel);
    assert_eq!(found, vec![inside]);
    assert_ne!(found[0], outside);
  }

  #[test]
  fn test_query_descendant_through_intermediate() {
    let mut page = StaticPage::new();
    let nav = page.insert(ElementSpec::new("nav"));
    let list = page.insert(ElementSpec::new("ul").with_parent(nav));
    let link = page.insert(ElementSpec::new("a").with_parent(list));

    let sel = Selector::parse("nav a").unwrap();
    assert_eq!(page.query_all(&sel), vec![link]);
  }

  #[test]
  fn test_query_first_in_document_order() {
    let mut page = StaticPage::new();
    let first = page.insert(ElementSpec::new("div").with_class("context-card"));
    page.insert(ElementSpec::new("div").with_class("context-card"));

    let sel = Selector::parse(".context-card").unwrap();
    assert_eq!(page.query_first(&sel), Some(first));
  }

  #[test]
  fn test_attribute_lookup() {
    let mut page = StaticPage::new();
    let el = page.insert(ElementSpec::new("a").with_attribute("href", "/about.html"));
    assert_eq!(page.attribute(el, "href").as_deref(), Some("/about.html"));
    assert_eq!(page.attribute(el, "data-audience"), None);
  }

  #[test]
  fn test_class_attribute_reflects_classes() {
    let mut page = StaticPage::new();
    let el = page.insert(ElementSpec::new("div").with_class("reveal"));
    page.add_class(el, "reveal--visible");
    assert_eq!(
      page.attribute(el, "class").as_deref(),
      Some("reveal reveal--visible")
    );
  }

  #[test]
  fn test_add_class_idempotent() {
    let mut page = StaticPage::new();
    let el = page.insert(ElementSpec::new("div"));
    page.add_class(el, "reveal--visible");
    page.add_class(el, "reveal--visible");
    assert_eq!(page.attribute(el, "class").as_deref(), Some("reveal--visible"));
  }

  #[test]
  fn test_element_bounds_absent_without_layout() {
    let mut page = StaticPage::new();
    let el = page.insert(ElementSpec::new("div"));
    assert_eq!(page.element_bounds(el), None);

    page.set_bounds(el, Rect::from_xywh(0.0, 100.0, 50.0, 50.0));
    assert!(page.element_bounds(el).is_some());
  }

  #[test]
  fn test_scripted_state() {
    let mut page = StaticPage::new();
    assert_eq!(page.ready_state(), ReadyState::Complete);

    page.set_ready_state(ReadyState::Loading);
    assert_eq!(page.ready_state(), ReadyState::Loading);

    page.set_location("/services.html");
    assert_eq!(page.location_path(), "/services.html");

    page.set_viewport(Rect::from_xywh(0.0, 500.0, 1280.0, 720.0));
    assert_eq!(page.viewport().min_y(), 500.0);
  }
}
