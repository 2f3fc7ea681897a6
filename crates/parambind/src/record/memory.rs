//! In-memory record for tests, demos and the CLI.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::multipart;
use super::Record;
use crate::bind::BoundValue;
use crate::error::{BindError, Result};
use crate::schema::{AttributeSchema, ColumnType, ModelSchema};
use crate::validation::ErrorLog;

/// A schema-checked record kept in memory.
///
/// Saving validates required attributes and any multi-part values that
/// failed to assemble, records problems in the record's own error log, and
/// assigns an id on first successful save.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryRecord {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    attributes: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "ErrorLog::is_empty")]
    errors: ErrorLog,
    #[serde(skip)]
    schema: Arc<AttributeSchema>,
    #[serde(skip)]
    required: Vec<String>,
    #[serde(skip)]
    invalid: IndexMap<String, String>,
}

impl MemoryRecord {
    pub fn new(model: impl Into<String>, schema: Arc<AttributeSchema>) -> Self {
        Self {
            model: model.into(),
            id: None,
            attributes: IndexMap::new(),
            errors: ErrorLog::new(),
            schema,
            required: Vec::new(),
            invalid: IndexMap::new(),
        }
    }

    /// Require these attributes to be present and non-blank on save.
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set an attribute without schema checks, e.g. to model an existing row.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// Errors from the last save attempt.
    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    fn check_setter(&self, name: &str) -> Result<()> {
        if self.schema.is_model_setter(name) {
            Ok(())
        } else {
            Err(BindError::UnknownAttribute {
                model: self.model.clone(),
                attribute: name.to_string(),
            })
        }
    }

    fn validate(&self) -> ErrorLog {
        let mut errors = ErrorLog::new();
        for attribute in self.invalid.keys() {
            errors.add(attribute.as_str(), "is invalid");
        }
        for name in &self.required {
            let blank = match self.attributes.get(name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if blank {
                errors.add(name.as_str(), "can't be blank");
            }
        }
        errors
    }
}

impl Record for MemoryRecord {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn assign(&mut self, name: &str, value: &BoundValue) -> Result<()> {
        self.check_setter(name)?;
        self.invalid.shift_remove(name);
        self.attributes.insert(name.to_string(), value.to_json());
        Ok(())
    }

    fn assign_multiparameter(&mut self, base: &str, parts: &IndexMap<String, String>) -> Result<()> {
        self.check_setter(base)?;
        let column_type = self.schema.column_type(base).unwrap_or(ColumnType::Unknown);

        match multipart::assemble(column_type, parts) {
            Ok(value) => {
                self.invalid.shift_remove(base);
                self.attributes.insert(base.to_string(), value);
            }
            Err(e) => {
                debug!(attribute = base, error = %e, "multi-part value rejected");
                self.invalid.insert(base.to_string(), e.to_string());
                self.attributes.insert(base.to_string(), Value::Null);
            }
        }
        Ok(())
    }

    fn save(&mut self) -> Result<bool> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            info!(model = %self.model, errors = self.errors.len(), "record failed validation");
            return Ok(false);
        }

        if self.id.is_none() {
            self.id = Some(next_id());
        }
        info!(model = %self.model, id = ?self.id, "record saved");
        Ok(true)
    }
}

fn next_id() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}
