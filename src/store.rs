//! Audience preference persistence
//!
//! One key, one string value, best effort. The [`KeyValueStore`] trait
//! abstracts the persistence medium; [`PreferenceStore`] owns the
//! well-known key and the absorption policy: a failed write is swallowed
//! (reported as [`BestEffort::Absorbed`], never an error to the caller) and
//! a failed or absent read collapses to `None`. Callers cannot distinguish
//! "never written" from "storage broken" — that is the contract, not an
//! accident.
//!
//! [`AudienceMemory`] is the click-side wiring: it finds the audience
//! selection cards at startup, and when the host reports a click on one of
//! them, persists that card's audience tag. Writes only ever originate from
//! those discrete user actions, so there is no locking anywhere here.

use crate::error::StoreError;
use crate::page::{ElementId, Page};
use crate::query::Selector;
use rustc_hash::FxHashMap;

/// Persistence capability: one string value per key
///
/// Implementations model real storage conditions: [`MemoryStore`] works,
/// [`UnavailableStore`] fails every call the way storage does in privacy
/// mode.
pub trait KeyValueStore {
  /// Reads the value stored under `key`
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  /// Stores `value` under `key`, overwriting any earlier value
  fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Working in-memory backend
///
/// # Examples
///
/// ```
/// use uplift::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("audience", "advisor").unwrap();
/// assert_eq!(store.get("audience").unwrap().as_deref(), Some("advisor"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: FxHashMap<String, String>,
}

impl MemoryStore {
  /// Creates an empty store
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
    self.entries.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// Backend where every operation fails
///
/// Models storage in privacy mode or with quota exhausted, for exercising
/// the absorbed path.
#[derive(Debug, Default)]
pub struct UnavailableStore;

impl UnavailableStore {
  /// Creates the failing backend
  pub fn new() -> Self {
    Self
  }
}

impl KeyValueStore for UnavailableStore {
  fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
    Err(StoreError::Unavailable {
      reason: "persistence disabled".to_string(),
    })
  }

  fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
    Err(StoreError::Unavailable {
      reason: "persistence disabled".to_string(),
    })
  }
}

/// Outcome of a best-effort operation
///
/// `Absorbed` means the operation failed and the failure was swallowed per
/// policy. Callers are free to ignore it; tests assert on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestEffort {
  /// The operation took effect
  Applied,
  /// The operation failed and the failure was absorbed
  Absorbed,
}

/// The audience preference: one tag under one well-known key
///
/// # Examples
///
/// ```
/// use uplift::{BestEffort, MemoryStore, PreferenceStore};
///
/// let mut prefs = PreferenceStore::new(Box::new(MemoryStore::new()), "audience");
/// assert_eq!(prefs.get(), None);
/// assert_eq!(prefs.set("advisor"), BestEffort::Applied);
/// assert_eq!(prefs.get().as_deref(), Some("advisor"));
/// ```
pub struct PreferenceStore {
  backend: Box<dyn KeyValueStore>,
  key: String,
}

impl PreferenceStore {
  /// Wraps a backend with the well-known key
  pub fn new(backend: Box<dyn KeyValueStore>, key: &str) -> Self {
    Self {
      backend,
      key: key.to_string(),
    }
  }

  /// Persists `tag`, overwriting any earlier tag; failures are absorbed
  pub fn set(&mut self, tag: &str) -> BestEffort {
    match self.backend.set(&self.key, tag) {
      Ok(()) => BestEffort::Applied,
      Err(_) => BestEffort::Absorbed,
    }
  }

  /// The stored tag; `None` when never written or when the read fails
  pub fn get(&self) -> Option<String> {
    self.backend.get(&self.key).ok().flatten()
  }

  /// The well-known key this store writes under
  pub fn key(&self) -> &str {
    &self.key
  }
}

/// Startup binding for the audience selection cards
///
/// `bind` collects the cards once; the host reports clicks through
/// [`AudienceMemory::on_card_click`], which reads the card's audience
/// attribute and persists it. Clicks on elements that were never bound, or
/// cards whose attribute has gone missing, are absorbed.
pub struct AudienceMemory {
  cards: Vec<ElementId>,
  audience_attribute: String,
}

impl AudienceMemory {
  /// Finds the selection cards on `page`
  pub fn bind(page: &dyn Page, cards: &Selector, audience_attribute: &str) -> Self {
    Self {
      cards: page.query_all(cards),
      audience_attribute: audience_attribute.to_string(),
    }
  }

  /// The bound card handles, in document order
  pub fn cards(&self) -> &[ElementId] {
    &self.cards
  }

  /// Whether `element` is one of the bound cards
  pub fn is_bound(&self, element: ElementId) -> bool {
    self.cards.contains(&element)
  }

  /// Handles a host-reported click on `element`
  pub fn on_card_click(
    &self,
    page: &dyn Page,
    prefs: &mut PreferenceStore,
    element: ElementId,
  ) -> BestEffort {
    if !self.is_bound(element) {
      return BestEffort::Absorbed;
    }

    match page.attribute(element, &self.audience_attribute) {
      Some(tag) if !tag.is_empty() => prefs.set(&tag),
      _ => BestEffort::Absorbed,
    }
  }
}
