//! Storage abstraction for Muster.
//!
//! This module defines the `RecordStore` trait and the model record types
//! for persisting a miniature collection.
//!
//! ## Architecture
//!
//! - `traits`: the `RecordStore` operations, one statement each
//! - `types`: `ModelRecord`, `NewModel`, and the per-field update vocabulary
//! - `sqlite`: a single-file SQLite backend plus a transactional view over it
//!
//! Updates and deletes are row-count-agnostic: touching an id that does not
//! exist succeeds without changing anything. Detecting a missing record is the
//! caller's job, via `fetch_by_id`.

pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use sqlite::{SqliteStore, SqliteTransaction, StoreConfig};
pub use traits::RecordStore;
pub use types::{Field, FieldUpdate, ModelRecord, NewModel};
