//! Error types for `relato-core`.

use thiserror::Error;

use crate::story::MIN_STORY_CHARS;

/// Why a submitted story draft was rejected.
///
/// Validation rejects the single operation and nothing else; a draft that
/// fails here is never partially applied anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// A required field is absent or empty after trimming whitespace.
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("story must be at least {MIN_STORY_CHARS} characters, got {0}")]
  StoryTooShort(usize),

  #[error("share must be \"yes\" or \"no\", got {0:?}")]
  InvalidShareFlag(String),
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;
