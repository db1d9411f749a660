//! Error types for uplift
//!
//! The enhancement layer is deliberately non-fatal: a failure never breaks
//! the page, it only means a visual feature silently does not apply. The
//! errors here therefore cover the two places where a *caller* mistake can
//! surface — selector strings outside the supported subset, and persistence
//! backends reporting why a read or write could not happen. Persistence
//! errors never escape [`crate::store::PreferenceStore`]; they exist so the
//! absorbed path is typed and testable rather than an implicit suppression.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for uplift operations
///
/// # Examples
///
/// ```
/// use uplift::Result;
///
/// fn configure() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for uplift
///
/// Each variant wraps a more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Selector string outside the supported subset
  #[error("Selector error: {0}")]
  Selector(#[from] SelectorError),

  /// Persistence backend failure
  #[error("Store error: {0}")]
  Store(#[from] StoreError),
}

/// Errors raised while parsing a selector string
///
/// The query layer supports a small subset of CSS simple selectors: tag
/// names, `.class`, `[attr]`, `[attr=value]`, and a single descendant
/// combinator. Anything else is rejected with one of these variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
  /// Empty or whitespace-only selector string
  #[error("Empty selector")]
  Empty,

  /// Syntax outside the supported subset
  #[error("Unsupported selector syntax in '{selector}': {feature}")]
  Unsupported { selector: String, feature: String },

  /// An attribute selector with no closing bracket
  #[error("Unterminated attribute selector: {selector}")]
  UnterminatedAttribute { selector: String },
}

/// Errors reported by persistence backends
///
/// These model the ways a browser's storage can fail: missing entirely
/// (privacy mode), or rejecting a write (quota). Components absorb them;
/// they are public so backends and tests can construct them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
  /// The persistence medium is not available at all
  #[error("Persistence unavailable: {reason}")]
  Unavailable { reason: String },

  /// A specific write was rejected
  #[error("Write rejected: {reason}")]
  WriteRejected { reason: String },
}
