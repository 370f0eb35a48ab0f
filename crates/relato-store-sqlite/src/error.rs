//! Error type for `relato-store-sqlite`.

use thiserror::Error;

/// A storage failure. Any variant aborts the whole operation; no partial
/// mutation is ever visible to the caller.
#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored row carries a share value outside 'yes'/'no'. Creation never
  /// writes such a value; this indicates out-of-band tampering.
  #[error("invalid share flag in story {id}: {value:?}")]
  InvalidShareFlag { id: i64, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
