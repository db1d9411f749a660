use uplift::{
  BestEffort, ElementId, ElementSpec, KeyValueStore, MediaFlags, MemoryStore, StaticPage,
  UnavailableStore, Uplift,
};

fn card(page: &mut StaticPage, audience: &str) -> ElementId {
  page.insert(
    ElementSpec::new("div")
      .with_class("selector-card")
      .with_attribute("data-audience", audience),
  )
}

#[test]
fn clicking_a_card_persists_its_audience_tag() {
  let mut page = StaticPage::new();
  let advisor = card(&mut page, "advisor");
  card(&mut page, "investor");

  let mut uplift = Uplift::new(Box::new(MemoryStore::new()), MediaFlags::none());
  uplift.start(&mut page).unwrap();

  assert_eq!(uplift.preference(), None);
  assert_eq!(uplift.on_card_click(&page, advisor), BestEffort::Applied);
  assert_eq!(uplift.preference().as_deref(), Some("advisor"));
}

#[test]
fn later_selection_overwrites_the_earlier_one() {
  let mut page = StaticPage::new();
  let advisor = card(&mut page, "advisor");
  let investor = card(&mut page, "investor");

  let mut uplift = Uplift::new(Box::new(MemoryStore::new()), MediaFlags::none());
  uplift.start(&mut page).unwrap();

  uplift.on_card_click(&page, advisor);
  uplift.on_card_click(&page, investor);
  assert_eq!(uplift.preference().as_deref(), Some("investor"));
}

#[test]
fn unavailable_storage_absorbs_writes_and_reads() {
  let mut page = StaticPage::new();
  let advisor = card(&mut page, "advisor");

  let mut uplift = Uplift::new(Box::new(UnavailableStore::new()), MediaFlags::none());
  uplift.start(&mut page).unwrap();

  // The failed write surfaces as Absorbed, never as an error, and reads
  // keep reporting "no preference".
  assert_eq!(uplift.on_card_click(&page, advisor), BestEffort::Absorbed);
  assert_eq!(uplift.preference(), None);
}

#[test]
fn clicks_on_elements_that_are_not_cards_are_absorbed() {
  let mut page = StaticPage::new();
  card(&mut page, "advisor");
  let bystander = page.insert(ElementSpec::new("div").with_class("hero"));

  let mut uplift = Uplift::new(Box::new(MemoryStore::new()), MediaFlags::none());
  uplift.start(&mut page).unwrap();

  assert_eq!(uplift.on_card_click(&page, bystander), BestEffort::Absorbed);
  assert_eq!(uplift.preference(), None);
}

#[test]
fn cards_without_the_audience_attribute_are_never_bound() {
  let mut page = StaticPage::new();
  let untagged = page.insert(ElementSpec::new("div").with_class("selector-card"));

  let mut uplift = Uplift::new(Box::new(MemoryStore::new()), MediaFlags::none());
  uplift.start(&mut page).unwrap();

  assert_eq!(uplift.audience().unwrap().cards().len(), 0);
  assert_eq!(uplift.on_card_click(&page, untagged), BestEffort::Absorbed);
}

#[test]
fn stored_preference_survives_into_the_next_page_load() {
  // A fresh engine over a backend that already holds the tag models the
  // next page load after a selection on the landing page.
  let mut backend = MemoryStore::new();
  backend.set("audience", "advisor").unwrap();

  let mut page = StaticPage::new();
  let mut uplift = Uplift::new(Box::new(backend), MediaFlags::none());
  uplift.start(&mut page).unwrap();

  assert_eq!(uplift.preference().as_deref(), Some("advisor"));
}
