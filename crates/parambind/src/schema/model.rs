//! Model-level attribute schema.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::column::ColumnSchema;
use super::types::ColumnType;
use crate::error::{BindError, Result};

/// Read-only attribute metadata for a record type.
///
/// This is the collaborator the binder consults to decide whether a form key
/// names something the record can take, and whether its value needs boolean
/// coercion.
pub trait ModelSchema {
    /// Persisted columns, in declaration order.
    fn columns(&self) -> &[ColumnSchema];

    /// Whether the record exposes a setter for `name`.
    ///
    /// This covers virtual attributes that have no backing column.
    fn has_setter(&self, name: &str) -> bool;

    /// Get a column by name.
    fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns().iter().find(|c| c.name == name)
    }

    /// Whether `name` is a known column or has a setter.
    fn is_model_setter(&self, name: &str) -> bool {
        self.column(name).is_some() || self.has_setter(name)
    }

    /// Whether `name` is a boolean column.
    fn is_boolean(&self, name: &str) -> bool {
        self.column(name).is_some_and(ColumnSchema::is_boolean)
    }

    /// Column type for `name`, if it is a column.
    fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.column(name).map(|c| c.column_type)
    }
}

/// Attribute schema loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    /// Persisted columns.
    pub columns: Vec<ColumnSchema>,
    /// Names of virtual attributes with a setter but no column.
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub setters: IndexSet<String>,
}

impl AttributeSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column.
    pub fn column_of(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.columns.push(ColumnSchema::new(name, column_type));
        self
    }

    /// Add a virtual setter.
    pub fn setter(mut self, name: impl Into<String>) -> Self {
        self.setters.insert(name.into());
        self
    }

    /// Check that column names are non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = IndexSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(BindError::Schema("column with empty name".to_string()));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(BindError::Schema(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a schema from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: AttributeSchema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load and validate a schema from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BindError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let schema: AttributeSchema = serde_json::from_reader(BufReader::new(file))?;
        schema.validate()?;
        Ok(schema)
    }
}

impl ModelSchema for AttributeSchema {
    fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    fn has_setter(&self, name: &str) -> bool {
        self.setters.contains(name) || self.columns.iter().any(|c| c.name == name)
    }
}
