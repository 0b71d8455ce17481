//! # Muster Core
//!
//! Core library for Muster - a tracker for a personal collection of tabletop
//! miniature models.
//!
//! This crate provides the persistence and partial-update reconciliation logic,
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **date**: Calendar date value with a canonical `YYYY-MM-DD` encoding
//! - **storage**: Record store trait, model record types, SQLite backend
//! - **reconcile**: Diffs a proposed record against the stored one and applies
//!   only the changed fields

pub mod date;
pub mod error;
pub mod reconcile;
pub mod storage;

pub use date::Date;
pub use error::{MusterError, Result};
pub use reconcile::{reconcile_with_mode, Reconciliation, ReconcileMode, Reconciler};
pub use storage::{
    Field, FieldUpdate, ModelRecord, NewModel, RecordStore, SqliteStore, SqliteTransaction,
    StoreConfig,
};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
