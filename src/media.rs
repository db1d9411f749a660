//! Environment media signals
//!
//! The reveal behavior branches on the host's reduced-motion preference.
//! [`MediaFlags`] is a snapshot of that signal, read once at startup and
//! passed by value; the page's lifetime never revisits it. Hosts construct
//! it from their media-query facility; headless runs can override it
//! through the environment.

use std::env;

/// Value of the reduced-motion preference query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReducedMotion {
  /// No stated preference; animate normally
  NoPreference,
  /// The user asked for reduced motion
  Reduce,
}

impl ReducedMotion {
  /// True when motion should be suppressed
  pub fn reduce(self) -> bool {
    matches!(self, ReducedMotion::Reduce)
  }
}

/// One-shot snapshot of the environment's media signals
///
/// # Examples
///
/// ```
/// use uplift::{MediaFlags, ReducedMotion};
///
/// let flags = MediaFlags::none().with_reduced_motion(true);
/// assert_eq!(flags.reduced_motion(), ReducedMotion::Reduce);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaFlags {
  /// `(prefers-reduced-motion: reduce)` result
  pub prefers_reduced_motion: bool,
}

impl MediaFlags {
  /// A snapshot with no preferences set
  pub const fn none() -> Self {
    Self {
      prefers_reduced_motion: false,
    }
  }

  /// Sets the reduced-motion preference
  pub fn with_reduced_motion(mut self, reduce: bool) -> Self {
    self.prefers_reduced_motion = reduce;
    self
  }

  /// The reduced-motion preference as a query value
  pub fn reduced_motion(&self) -> ReducedMotion {
    if self.prefers_reduced_motion {
      ReducedMotion::Reduce
    } else {
      ReducedMotion::NoPreference
    }
  }

  /// Applies environment-variable overrides for headless runs
  ///
  /// `UPLIFT_PREFERS_REDUCED_MOTION` = `reduce` | `no-preference` |
  /// truthy/falsy.
  pub fn apply_env_overrides(&mut self) {
    if let Ok(value) = env::var("UPLIFT_PREFERS_REDUCED_MOTION") {
      self.prefers_reduced_motion = matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "reduce" | "1" | "true" | "yes"
      );
    }
  }

  /// Snapshot with no preferences, then environment overrides applied
  pub fn from_env() -> Self {
    let mut flags = Self::none();
    flags.apply_env_overrides();
    flags
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_to_no_preference() {
    let flags = MediaFlags::none();
    assert!(!flags.prefers_reduced_motion);
    assert_eq!(flags.reduced_motion(), ReducedMotion::NoPreference);
    assert!(!flags.reduced_motion().reduce());
  }

  #[test]
  fn test_with_reduced_motion() {
    let flags = MediaFlags::none().with_reduced_motion(true);
    assert_eq!(flags.reduced_motion(), ReducedMotion::Reduce);
    assert!(flags.reduced_motion().reduce());
  }

  #[test]
  fn test_env_override_round_trip() {
    env::set_var("UPLIFT_PREFERS_REDUCED_MOTION", "reduce");
    let mut flags = MediaFlags::none();
    flags.apply_env_overrides();
    assert!(flags.prefers_reduced_motion);

    env::set_var("UPLIFT_PREFERS_REDUCED_MOTION", "no-preference");
    flags.apply_env_overrides();
    assert!(!flags.prefers_reduced_motion);

    env::remove_var("UPLIFT_PREFERS_REDUCED_MOTION");
  }
}
