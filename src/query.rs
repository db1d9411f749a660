//! Selector parsing for the page capability surface
//!
//! Components locate page elements through selector strings, and real hosts
//! hand those strings to their own query engine untouched. The in-memory
//! page needs to evaluate them itself, so this module parses the subset the
//! markup contract actually uses: tag names, `.class`, `[attr]`,
//! `[attr=value]`, and at most one descendant combinator (`nav a`).
//! Anything outside the subset is a typed [`SelectorError`] rather than a
//! silent mismatch.

use crate::error::SelectorError;
use std::fmt;

/// A parsed selector from the supported subset
///
/// # Examples
///
/// ```
/// use uplift::Selector;
///
/// let cards = Selector::parse(".selector-card[data-audience]").unwrap();
/// assert_eq!(cards.as_str(), ".selector-card[data-audience]");
///
/// let links = Selector::parse("nav a").unwrap();
/// assert!(links.has_ancestor());
///
/// assert!(Selector::parse("nav > a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
  raw: String,
  ancestor: Option<Compound>,
  target: Compound,
}

impl Selector {
  /// Parses a selector string, rejecting syntax outside the subset
  pub fn parse(input: &str) -> Result<Self, SelectorError> {
    let raw = input.trim();
    if raw.is_empty() {
      return Err(SelectorError::Empty);
    }

    let parts: Vec<&str> = raw.split_whitespace().collect();
    let (ancestor, target) = match parts.as_slice() {
      [only] => (None, Compound::parse(raw, only)?),
      [first, second] => (
        Some(Compound::parse(raw, first)?),
        Compound::parse(raw, second)?,
      ),
      _ => {
        return Err(SelectorError::Unsupported {
          selector: raw.to_string(),
          feature: "more than one descendant combinator".to_string(),
        })
      }
    };

    Ok(Self {
      raw: raw.to_string(),
      ancestor,
      target,
    })
  }

  /// The original selector string, for hosts that pass it through
  pub fn as_str(&self) -> &str {
    &self.raw
  }

  /// Whether this selector carries a descendant requirement
  pub fn has_ancestor(&self) -> bool {
    self.ancestor.is_some()
  }

  pub(crate) fn target(&self) -> &Compound {
    &self.target
  }

  pub(crate) fn ancestor(&self) -> Option<&Compound> {
    self.ancestor.as_ref()
  }
}

impl fmt::Display for Selector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

/// One compound selector: optional tag plus class and attribute tests
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Compound {
  pub tag: Option<String>,
  pub classes: Vec<String>,
  pub attributes: Vec<AttributeTest>,
}

/// A single `[name]` or `[name=value]` test
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeTest {
  pub name: String,
  pub value: Option<String>,
}

fn is_ident_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Compound {
  fn parse(selector: &str, part: &str) -> Result<Self, SelectorError> {
    let unsupported = |feature: &str| SelectorError::Unsupported {
      selector: selector.to_string(),
      feature: feature.to_string(),
    };

    let mut compound = Compound::default();
    let mut rest = part;

    // Universal selector or a leading tag name.
    if rest.starts_with('*') {
      rest = &rest[1..];
    } else {
      let tag_len = rest.chars().take_while(|&c| is_ident_char(c)).count();
      if tag_len > 0 {
        compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
        rest = &rest[tag_len..];
      }
    }

    while !rest.is_empty() {
      if let Some(after) = rest.strip_prefix('.') {
        let len = after.chars().take_while(|&c| is_ident_char(c)).count();
        if len == 0 {
          return Err(unsupported("class name expected after '.'"));
        }
        compound.classes.push(after[..len].to_string());
        rest = &after[len..];
      } else if let Some(after) = rest.strip_prefix('[') {
        let Some(end) = after.find(']') else {
          return Err(SelectorError::UnterminatedAttribute {
            selector: selector.to_string(),
          });
        };
        compound.attributes.push(AttributeTest::parse(&after[..end]));
        rest = &after[end + 1..];
      } else {
        let feature = match rest.chars().next() {
          Some('#') => "id selector".to_string(),
          Some(':') => "pseudo-class".to_string(),
          Some('>') | Some('+') | Some('~') => "combinator".to_string(),
          Some(c) => format!("unexpected '{}'", c),
          None => break,
        };
        return Err(unsupported(&feature));
      }
    }

    Ok(compound)
  }

  /// Evaluates this compound against one element's tag, classes, attributes
  pub(crate) fn matches(
    &self,
    tag: &str,
    classes: &[String],
    attributes: &[(String, String)],
  ) -> bool {
    if let Some(required) = &self.tag {
      if !tag.eq_ignore_ascii_case(required) {
        return false;
      }
    }

    if !self.classes.iter().all(|c| classes.iter().any(|have| have == c)) {
      return false;
    }

    self.attributes.iter().all(|test| {
      attributes
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(&test.name))
        .is_some_and(|(_, actual)| match &test.value {
          Some(expected) => actual == expected,
          None => true,
        })
    })
  }
}

impl AttributeTest {
  fn parse(body: &str) -> Self {
    match body.split_once('=') {
      Some((name, value)) => Self {
        name: name.trim().to_string(),
        value: Some(value.trim().trim_matches('"').trim_matches('\'').to_string()),
      },
      None => Self {
        name: body.trim().to_string(),
        value: None,
      },
    }
  }
}
