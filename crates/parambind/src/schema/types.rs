//! Core type definitions for attribute schemas.

use serde::{Deserialize, Serialize};

/// Storage type of a record column.
///
/// Only a few of these change how form values are bound: booleans are
/// coerced from `"1"`/`"0"`, and the temporal types are assembled from
/// multi-part parameters. Everything else passes through as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Boolean values (true/false).
    Boolean,
    /// Short text values.
    String,
    /// Long text values.
    Text,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Fixed-point numbers.
    Decimal,
    /// Date only (no time component).
    Date,
    /// Date and time.
    #[serde(rename = "datetime", alias = "timestamp")]
    DateTime,
    /// Time only (no date component).
    Time,
    /// Type not declared.
    Unknown,
}

impl ColumnType {
    /// Returns true if form values for this type are coerced to booleans.
    pub fn is_boolean(&self) -> bool {
        matches!(self, ColumnType::Boolean)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ColumnType::DateTime | ColumnType::Date | ColumnType::Time
        )
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Unknown
    }
}
