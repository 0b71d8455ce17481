//! Record store trait definition.
//!
//! The `RecordStore` trait is the seam between the reconciler and the
//! persisted table. Implementations must run every operation as a single
//! statement against the backing store.

use super::types::{FieldUpdate, ModelRecord, NewModel};
use crate::error::Result;

/// CRUD primitives over the `models` table.
pub trait RecordStore {
    /// Insert a new model.
    ///
    /// Points default to 0, build and painted dates are empty and there is
    /// no image.
    ///
    /// # Returns
    ///
    /// Returns the id assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns `MusterError::Store` on constraint violations or I/O failure.
    fn insert(&self, model: &NewModel) -> Result<i64>;

    /// List every model in storage order. An empty store yields an empty vec.
    fn fetch_all(&self) -> Result<Vec<ModelRecord>>;

    /// Get a model by id.
    ///
    /// # Errors
    ///
    /// Returns `MusterError::NotFound` if no row has this id.
    fn fetch_by_id(&self, id: i64) -> Result<ModelRecord>;

    /// Overwrite a single column of one row.
    ///
    /// Updating an id that does not exist is a no-op and still returns `Ok`.
    fn update_field(&self, id: i64, update: &FieldUpdate) -> Result<()>;

    /// Remove a row. No-op if absent.
    fn delete(&self, id: i64) -> Result<()>;

    /// Change a record's identity.
    ///
    /// The store does not check `new_id` itself; a primary-key collision
    /// surfaces as `MusterError::Store`.
    fn reassign_id(&self, old_id: i64, new_id: i64) -> Result<()>;

    /// Reset the autoincrement counter. Only future inserts are affected.
    fn reset_autoincrement(&self, value: i64) -> Result<()>;
}
