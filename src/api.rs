//! Public entry point for uplift
//!
//! [`Uplift`] owns the four enhancement components and runs them once, in a
//! fixed order, gated on document readiness:
//!
//! ```text
//! audience memory → active-nav marking → context applier → reveal install
//! ```
//!
//! After startup the only live entry points are the observer path
//! ([`Uplift::sweep`]) and host-reported clicks
//! ([`Uplift::on_card_click`]); the two are independent and unordered.
//!
//! # Example
//!
//! ```
//! use uplift::{ElementSpec, MediaFlags, MemoryStore, Page, Rect, StaticPage, Uplift};
//!
//! let mut page = StaticPage::new();
//! page.set_location("/index.html");
//! let card = page.insert(
//!   ElementSpec::new("div")
//!     .with_class("reveal")
//!     .with_bounds(Rect::from_xywh(0.0, 200.0, 600.0, 300.0)),
//! );
//!
//! let mut uplift = Uplift::new(Box::new(MemoryStore::new()), MediaFlags::none());
//! uplift.start(&mut page).unwrap();
//!
//! // Host event loop: evaluate the watcher after startup.
//! uplift.sweep(&mut page);
//! assert!(page.has_class(card, "reveal--visible"));
//! ```

use crate::context::{apply_context, ContextDecorator, NoDecoration};
use crate::error::Result;
use crate::media::MediaFlags;
use crate::nav::mark_active_entries;
use crate::observer::RevealOptions;
use crate::page::{ElementId, Page, ReadyState};
use crate::query::Selector;
use crate::reveal::RevealController;
use crate::store::{AudienceMemory, BestEffort, KeyValueStore, PreferenceStore};
use serde::{Deserialize, Serialize};

/// Markup contract and tuning, shippable as data
///
/// Every field has a default matching the conventional markup contract;
/// hosts can deserialize a partial JSON object and only override what
/// differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpliftConfig {
  /// Selector for the audience selection cards
  pub audience_card_selector: String,
  /// Attribute naming a card's audience tag
  pub audience_attribute: String,
  /// Well-known persistence key for the audience tag
  pub storage_key: String,
  /// Selectors whose union forms the navigation entries
  pub nav_selectors: Vec<String>,
  /// Class applied to navigation entries matching the current location
  pub nav_active_class: String,
  /// Canonical page name for empty and directory locations
  pub index_page_name: String,
  /// Selector for the optional context element
  pub context_selector: String,
  /// Selector for reveal candidates
  pub reveal_selector: String,
  /// Class applied when a target reveals
  pub reveal_visible_class: String,
  /// Trigger-region tuning
  pub reveal: RevealOptions,
}

impl Default for UpliftConfig {
  fn default() -> Self {
    Self {
      audience_card_selector: ".selector-card[data-audience]".to_string(),
      audience_attribute: "data-audience".to_string(),
      storage_key: "audience".to_string(),
      nav_selectors: vec!["nav a".to_string(), ".nav-item".to_string()],
      nav_active_class: "nav-item--active".to_string(),
      index_page_name: "index.html".to_string(),
      context_selector: ".context-card".to_string(),
      reveal_selector: ".reveal".to_string(),
      reveal_visible_class: "reveal--visible".to_string(),
      reveal: RevealOptions::default(),
    }
  }
}

/// How [`Uplift::start`] resolved against document readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boot {
  /// The document was ready; startup ran before `start` returned
  Ran,
  /// The document was still loading; the host must call
  /// [`Uplift::document_ready`] when its ready event fires
  Deferred,
}

/// The enhancement engine: one instance per page load
pub struct Uplift {
  config: UpliftConfig,
  flags: MediaFlags,
  prefs: PreferenceStore,
  decorator: Box<dyn ContextDecorator>,
  audience: Option<AudienceMemory>,
  reveal: Option<RevealController>,
  started: bool,
}

impl Uplift {
  /// Creates an engine with the default markup contract
  pub fn new(backend: Box<dyn KeyValueStore>, flags: MediaFlags) -> Self {
    Self::with_config(UpliftConfig::default(), backend, flags)
  }

  /// Creates an engine with an explicit configuration
  pub fn with_config(
    config: UpliftConfig,
    backend: Box<dyn KeyValueStore>,
    flags: MediaFlags,
  ) -> Self {
    let prefs = PreferenceStore::new(backend, &config.storage_key);
    Self {
      config,
      flags,
      prefs,
      decorator: Box::new(NoDecoration),
      audience: None,
      reveal: None,
      started: false,
    }
  }

  /// Replaces the context decorator (defaults to the no-op)
  pub fn set_context_decorator(&mut self, decorator: Box<dyn ContextDecorator>) {
    self.decorator = decorator;
  }

  /// The active configuration
  pub fn config(&self) -> &UpliftConfig {
    &self.config
  }

  /// The stored audience tag, if any
  pub fn preference(&self) -> Option<String> {
    self.prefs.get()
  }

  /// Whether startup has run
  pub fn has_started(&self) -> bool {
    self.started
  }

  /// The reveal controller, present once startup has run
  pub fn reveal(&self) -> Option<&RevealController> {
    self.reveal.as_ref()
  }

  /// The audience binding, present once startup has run
  pub fn audience(&self) -> Option<&AudienceMemory> {
    self.audience.as_ref()
  }

  /// Runs startup now, or defers it until the document is ready
  ///
  /// The only public trigger. Startup runs at most once per instance:
  /// calling `start` again after it has run is a no-op reporting
  /// [`Boot::Ran`]. Configured selectors outside the supported subset
  /// surface here as [`crate::Error::Selector`].
  pub fn start(&mut self, page: &mut dyn Page) -> Result<Boot> {
    if self.started {
      return Ok(Boot::Ran);
    }
    if page.ready_state() == ReadyState::Loading {
      return Ok(Boot::Deferred);
    }
    self.run_startup(page)?;
    Ok(Boot::Ran)
  }

  /// Host callback for the document-ready event after a deferred start
  pub fn document_ready(&mut self, page: &mut dyn Page) -> Result<()> {
    if self.started {
      return Ok(());
    }
    self.run_startup(page)
  }

  /// Host callback for a click on a page element
  ///
  /// Persists the audience tag when the element is a bound card; anything
  /// else is absorbed. Before startup there are no bound cards, so every
  /// click is absorbed.
  pub fn on_card_click(&mut self, page: &dyn Page, element: ElementId) -> BestEffort {
    match self.audience.as_ref() {
      Some(memory) => memory.on_card_click(page, &mut self.prefs, element),
      None => BestEffort::Absorbed,
    }
  }

  /// Runs one observer pass; returns the newly revealed count
  pub fn sweep(&mut self, page: &mut dyn Page) -> usize {
    match self.reveal.as_mut() {
      Some(reveal) => reveal.sweep(page),
      None => 0,
    }
  }

  fn run_startup(&mut self, page: &mut dyn Page) -> Result<()> {
    // Parse the whole markup contract before mutating anything, so a bad
    // selector cannot leave startup half-applied.
    let cards = Selector::parse(&self.config.audience_card_selector)?;
    let nav: Vec<Selector> = self
      .config
      .nav_selectors
      .iter()
      .map(|s| Selector::parse(s))
      .collect::<std::result::Result<_, _>>()?;
    let context = Selector::parse(&self.config.context_selector)?;
    let reveal = Selector::parse(&self.config.reveal_selector)?;

    self.audience = Some(AudienceMemory::bind(
      page,
      &cards,
      &self.config.audience_attribute,
    ));

    mark_active_entries(
      page,
      &nav,
      &self.config.nav_active_class,
      &self.config.index_page_name,
    );

    apply_context(page, &self.prefs, &context, self.decorator.as_ref());

    let targets = page.query_all(&reveal);
    self.reveal = Some(RevealController::install(
      page,
      targets,
      self.flags,
      self.config.reveal,
      &self.config.reveal_visible_class,
    ));

    self.started = true;
    Ok(())
  }
}
