//! Core data types for the storage layer.
//!
//! Dates live in `ModelRecord` as canonical strings (empty when unset) because
//! that is both the persisted format and what callers propose. They only
//! become [`Date`] values once validated, in [`NewModel`] and [`FieldUpdate`].

use serde::{Deserialize, Serialize};

use crate::date::Date;

/// One collection item (a miniature unit) and its tracked attributes.
///
/// Serialized with the wire field names `id, game, faction, unit_name,
/// unit_size, points, purchase_date, build_date, painted_date, image`. The
/// image is base64 in JSON and `null` when absent.
///
/// Deserializing requires `game`, `faction`, `unit_name`, `unit_size` and
/// `purchase_date`. A missing `id` means a new record; missing `points`,
/// build or painted dates and `image` take their empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Store-assigned identifier; 0 means "not yet persisted"
    #[serde(default)]
    pub id: i64,

    /// Game system (e.g., "Warhammer 40,000")
    pub game: String,

    pub faction: String,

    pub unit_name: String,

    /// Number of miniatures in the unit
    pub unit_size: i64,

    /// Point cost
    #[serde(default)]
    pub points: i64,

    /// `YYYY-MM-DD`, or empty
    pub purchase_date: String,

    /// `YYYY-MM-DD`, or empty
    #[serde(default)]
    pub build_date: String,

    /// `YYYY-MM-DD`, or empty
    #[serde(default)]
    pub painted_date: String,

    /// Opaque image blob
    #[serde(default, with = "image_base64")]
    pub image: Option<Vec<u8>>,
}

impl ModelRecord {
    /// Whether the record has been assigned an id by the store.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// Builder for inserting a new model.
#[derive(Debug, Clone)]
pub struct NewModel {
    pub game: String,
    pub faction: String,
    pub unit_name: String,
    pub unit_size: i64,
    pub purchase_date: Date,
}

impl NewModel {
    pub fn new(
        game: impl Into<String>,
        faction: impl Into<String>,
        unit_name: impl Into<String>,
        unit_size: i64,
        purchase_date: Date,
    ) -> Self {
        Self {
            game: game.into(),
            faction: faction.into(),
            unit_name: unit_name.into(),
            unit_size,
            purchase_date,
        }
    }
}

/// The mutable fields of a model, in reconciliation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Faction,
    UnitName,
    UnitSize,
    Points,
    PurchaseDate,
    BuildDate,
    PaintedDate,
    Image,
}

impl Field {
    /// Every mutable field, in the order the reconciler visits them.
    pub const ALL: [Field; 8] = [
        Field::Faction,
        Field::UnitName,
        Field::UnitSize,
        Field::Points,
        Field::PurchaseDate,
        Field::BuildDate,
        Field::PaintedDate,
        Field::Image,
    ];

    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Faction => "faction",
            Field::UnitName => "unit_name",
            Field::UnitSize => "unit_size",
            Field::Points => "points",
            Field::PurchaseDate => "purchase_date",
            Field::BuildDate => "build_date",
            Field::PaintedDate => "painted_date",
            Field::Image => "image",
        }
    }

    /// Column name in the `models` table.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Faction => "faction",
            Field::UnitName => "unitName",
            Field::UnitSize => "unitSize",
            Field::Points => "points",
            Field::PurchaseDate => "purchaseDate",
            Field::BuildDate => "buildDate",
            Field::PaintedDate => "paintedDate",
            Field::Image => "image",
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(
            self,
            Field::PurchaseDate | Field::BuildDate | Field::PaintedDate
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A new value for exactly one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Faction(String),
    UnitName(String),
    UnitSize(i64),
    Points(i64),
    PurchaseDate(Date),
    BuildDate(Date),
    PaintedDate(Date),
    Image(Vec<u8>),
}

impl FieldUpdate {
    /// Build the update for a date field. Returns `None` for non-date fields.
    pub fn date(field: Field, date: Date) -> Option<Self> {
        match field {
            Field::PurchaseDate => Some(FieldUpdate::PurchaseDate(date)),
            Field::BuildDate => Some(FieldUpdate::BuildDate(date)),
            Field::PaintedDate => Some(FieldUpdate::PaintedDate(date)),
            _ => None,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Faction(_) => Field::Faction,
            FieldUpdate::UnitName(_) => Field::UnitName,
            FieldUpdate::UnitSize(_) => Field::UnitSize,
            FieldUpdate::Points(_) => Field::Points,
            FieldUpdate::PurchaseDate(_) => Field::PurchaseDate,
            FieldUpdate::BuildDate(_) => Field::BuildDate,
            FieldUpdate::PaintedDate(_) => Field::PaintedDate,
            FieldUpdate::Image(_) => Field::Image,
        }
    }

    /// Overlay this update onto an in-memory record, mirroring what the store
    /// persists.
    pub fn apply_to(&self, record: &mut ModelRecord) {
        match self {
            FieldUpdate::Faction(value) => record.faction = value.clone(),
            FieldUpdate::UnitName(value) => record.unit_name = value.clone(),
            FieldUpdate::UnitSize(value) => record.unit_size = *value,
            FieldUpdate::Points(value) => record.points = *value,
            FieldUpdate::PurchaseDate(date) => record.purchase_date = date.to_string(),
            FieldUpdate::BuildDate(date) => record.build_date = date.to_string(),
            FieldUpdate::PaintedDate(date) => record.painted_date = date.to_string(),
            FieldUpdate::Image(bytes) => record.image = Some(bytes.clone()),
        }
    }
}

mod image_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(image: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match image {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|value| STANDARD.decode(value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
