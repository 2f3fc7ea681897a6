//! Column schema definition.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Schema for a single persisted column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name, also the attribute name.
    pub name: String,
    /// Declared storage type.
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
}

impl ColumnSchema {
    /// Create a column schema.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.column_type.is_boolean()
    }
}
