//! SQLite backend for the Relato story store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The single connection also serializes
//! writers, which is what makes id assignment and delete row counts atomic
//! with respect to concurrent callers.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
