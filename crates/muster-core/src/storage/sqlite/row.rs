//! Model row type for database queries.

use rusqlite::Row;

use crate::storage::types::ModelRecord;

/// Column list shared by every `SELECT` against the models table.
pub const MODEL_COLUMNS: &str =
    "id, game, faction, unitName, unitSize, points, purchaseDate, buildDate, paintedDate, image";

/// Raw row data from the models table, before mapping into the domain type.
#[derive(Debug)]
pub struct ModelRow {
    pub id: i64,
    pub game: String,
    pub faction: String,
    pub unit_name: String,
    pub unit_size: Option<i64>,
    pub points: Option<i64>,
    pub purchase_date: String,
    pub build_date: String,
    pub painted_date: String,
    pub image: Option<Vec<u8>>,
}

impl ModelRow {
    /// Read a row selected with [`MODEL_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            game: row.get(1)?,
            faction: row.get(2)?,
            unit_name: row.get(3)?,
            unit_size: row.get(4)?,
            points: row.get(5)?,
            purchase_date: row.get(6)?,
            build_date: row.get(7)?,
            painted_date: row.get(8)?,
            image: row.get(9)?,
        })
    }
}

impl From<ModelRow> for ModelRecord {
    fn from(row: ModelRow) -> Self {
        // unitSize and points are nullable columns; rows written by older
        // tools may carry NULL there.
        ModelRecord {
            id: row.id,
            game: row.game,
            faction: row.faction,
            unit_name: row.unit_name,
            unit_size: row.unit_size.unwrap_or(0),
            points: row.points.unwrap_or(0),
            purchase_date: row.purchase_date,
            build_date: row.build_date,
            painted_date: row.painted_date,
            image: row.image,
        }
    }
}
