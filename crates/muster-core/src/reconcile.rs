//! Partial-update reconciliation.
//!
//! A [`Reconciler`] compares a caller's proposed record with the stored one
//! and issues one `update_field` call per field that actually changed. A
//! proposal with id 0 creates the record first.
//!
//! Fields are visited in [`Field::ALL`] order. The default mode is
//! best-effort: when a later field fails validation or the store rejects an
//! update, fields already written earlier in the pass stay written. Use
//! [`ReconcileMode::Atomic`] with [`reconcile_with_mode`] to roll the whole
//! pass back instead.
//!
//! The fetch-then-update sequence takes no lock of its own. Two best-effort
//! reconciliations of the same id can interleave and lose updates.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::date::Date;
use crate::error::{MusterError, Result};
use crate::storage::{Field, FieldUpdate, ModelRecord, NewModel, RecordStore, SqliteStore};

/// How a reconciliation treats failures partway through a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileMode {
    /// Apply fields one statement at a time; abort on the first failure and
    /// keep whatever was already written.
    #[default]
    BestEffort,
    /// Run the pass in one transaction; any failure rolls everything back.
    Atomic,
}

/// Outcome of a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Final record state
    pub record: ModelRecord,

    /// Fields written during this pass, in the order they were written
    pub applied: Vec<Field>,

    /// Whether the pass inserted a new record
    pub created: bool,
}

impl Reconciliation {
    /// True when nothing was inserted or updated.
    pub fn is_noop(&self) -> bool {
        !self.created && self.applied.is_empty()
    }
}

/// Diffs proposed records against a [`RecordStore`] and applies the changes.
pub struct Reconciler<'s, S: RecordStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: RecordStore + ?Sized> Reconciler<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Reconcile `proposed` and return the final record.
    ///
    /// # Errors
    ///
    /// - `MusterError::InvalidInput` when a changed date (or, on creation, the
    ///   game or purchase date) is invalid
    /// - `MusterError::NotFound` when `proposed.id` is set but not stored
    /// - `MusterError::Store` when the backend fails
    pub fn reconcile(&self, proposed: &ModelRecord) -> Result<ModelRecord> {
        self.reconcile_detailed(proposed).map(|outcome| outcome.record)
    }

    /// Like [`Reconciler::reconcile`], also reporting which fields were written.
    pub fn reconcile_detailed(&self, proposed: &ModelRecord) -> Result<Reconciliation> {
        let (mut current, created) = if proposed.is_persisted() {
            (self.store.fetch_by_id(proposed.id)?, false)
        } else {
            (self.create(proposed)?, true)
        };

        if proposed.is_persisted() && proposed.game != current.game {
            debug!(id = current.id, "ignoring proposed game change; game is fixed at creation");
        }

        let mut applied = Vec::new();
        for field in Field::ALL {
            let written = diff_field(field, &current, proposed).and_then(|update| match update {
                Some(update) => {
                    self.store.update_field(current.id, &update)?;
                    Ok(Some(update))
                }
                None => Ok(None),
            });

            match written {
                Ok(Some(update)) => {
                    update.apply_to(&mut current);
                    applied.push(field);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        id = current.id,
                        field = %field,
                        applied = applied.len(),
                        error = %err,
                        "reconciliation aborted"
                    );
                    return Err(err);
                }
            }
        }

        debug!(id = current.id, created, applied = ?applied, "reconciled model");
        Ok(Reconciliation {
            record: current,
            applied,
            created,
        })
    }

    /// Insert the proposed record and return it as freshly stored.
    fn create(&self, proposed: &ModelRecord) -> Result<ModelRecord> {
        if proposed.game.trim().is_empty() {
            return Err(MusterError::invalid_value("game", "game must not be empty"));
        }
        let purchase_date = Date::parse(&proposed.purchase_date)
            .map_err(|e| MusterError::invalid_input(Field::PurchaseDate.name(), e))?;

        let new_model = NewModel::new(
            proposed.game.clone(),
            proposed.faction.clone(),
            proposed.unit_name.clone(),
            proposed.unit_size,
            purchase_date,
        );
        let id = self.store.insert(&new_model)?;
        info!(id, game = %new_model.game, unit = %new_model.unit_name, "created model");

        self.store.fetch_by_id(id)
    }
}

/// Reconcile against a SQLite store in the given mode.
pub fn reconcile_with_mode(
    store: &SqliteStore,
    mode: ReconcileMode,
    proposed: &ModelRecord,
) -> Result<Reconciliation> {
    match mode {
        ReconcileMode::BestEffort => Reconciler::new(store).reconcile_detailed(proposed),
        ReconcileMode::Atomic => {
            store.with_transaction(|tx| Reconciler::new(tx).reconcile_detailed(proposed))
        }
    }
}

/// The update needed to bring `current` in line with `proposed` for one field.
fn diff_field(
    field: Field,
    current: &ModelRecord,
    proposed: &ModelRecord,
) -> Result<Option<FieldUpdate>> {
    let update = match field {
        Field::Faction => (proposed.faction != current.faction)
            .then(|| FieldUpdate::Faction(proposed.faction.clone())),
        Field::UnitName => (proposed.unit_name != current.unit_name)
            .then(|| FieldUpdate::UnitName(proposed.unit_name.clone())),
        Field::UnitSize => (proposed.unit_size != current.unit_size)
            .then_some(FieldUpdate::UnitSize(proposed.unit_size)),
        Field::Points => {
            (proposed.points != current.points).then_some(FieldUpdate::Points(proposed.points))
        }
        Field::PurchaseDate => diff_date(field, &current.purchase_date, &proposed.purchase_date)?,
        Field::BuildDate => diff_date(field, &current.build_date, &proposed.build_date)?,
        Field::PaintedDate => diff_date(field, &current.painted_date, &proposed.painted_date)?,
        // Blobs are not compared; a present image always overwrites.
        Field::Image => proposed.image.clone().map(FieldUpdate::Image),
    };
    Ok(update)
}

fn diff_date(field: Field, current: &str, proposed: &str) -> Result<Option<FieldUpdate>> {
    if proposed == current {
        return Ok(None);
    }
    let date = Date::parse(proposed).map_err(|e| MusterError::invalid_input(field.name(), e))?;
    Ok(FieldUpdate::date(field, date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> ModelRecord {
        ModelRecord {
            id: 1,
            game: "Warhammer".to_string(),
            faction: "Orks".to_string(),
            unit_name: "Boyz".to_string(),
            unit_size: 10,
            points: 0,
            purchase_date: "2024-01-15".to_string(),
            build_date: String::new(),
            painted_date: String::new(),
            image: None,
        }
    }

    #[test]
    fn test_identical_records_have_no_diff() {
        let current = stored();
        for field in Field::ALL {
            assert_eq!(diff_field(field, &current, &current).unwrap(), None);
        }
    }

    #[test]
    fn test_changed_date_is_parsed() {
        let current = stored();
        let proposed = ModelRecord {
            build_date: "2024-03-02".to_string(),
            ..stored()
        };
        assert_eq!(
            diff_field(Field::BuildDate, &current, &proposed).unwrap(),
            Some(FieldUpdate::BuildDate(Date::new(2024, 3, 2).unwrap()))
        );
    }

    #[test]
    fn test_malformed_changed_date_names_field() {
        let current = stored();
        let proposed = ModelRecord {
            painted_date: "soon".to_string(),
            ..stored()
        };
        let err = diff_field(Field::PaintedDate, &current, &proposed).unwrap_err();
        assert_eq!(err.field(), Some("painted_date"));
    }

    #[test]
    fn test_present_image_always_overwrites() {
        let current = ModelRecord {
            image: Some(vec![9, 9]),
            ..stored()
        };
        assert_eq!(
            diff_field(Field::Image, &current, &current).unwrap(),
            Some(FieldUpdate::Image(vec![9, 9]))
        );
        assert_eq!(diff_field(Field::Image, &current, &stored()).unwrap(), None);
    }

    #[test]
    fn test_reconcile_mode_serde_names() {
        let mode: ReconcileMode = serde_json::from_str("\"atomic\"").unwrap();
        assert_eq!(mode, ReconcileMode::Atomic);
        assert_eq!(ReconcileMode::default(), ReconcileMode::BestEffort);
    }
}
