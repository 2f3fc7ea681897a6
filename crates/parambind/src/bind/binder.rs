//! The binding pipeline: classify, assemble, bind, resolve destroys.

use serde::Serialize;
use tracing::debug;

use super::composite::CompositeAssembler;
use super::destroy::DestroyResolver;
use super::hooks::FormHooks;
use super::value::BoundAttributes;
use super::whole::WholeParamBinder;
use crate::error::Result;
use crate::params::{ParamBuckets, RawParams};
use crate::schema::ModelSchema;
use crate::validation::ErrorLog;

/// Result of binding one parameter set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BindOutcome {
    attributes: BoundAttributes,
    errors: ErrorLog,
}

impl BindOutcome {
    /// Values to merge onto the record.
    pub fn attributes(&self) -> &BoundAttributes {
        &self.attributes
    }

    /// Validation errors reported by hooks.
    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (BoundAttributes, ErrorLog) {
        (self.attributes, self.errors)
    }
}

/// Binds a model's raw form parameters against its schema and hooks.
pub struct FormBinder<'a, S: ModelSchema + ?Sized> {
    schema: &'a S,
    hooks: &'a FormHooks,
}

impl<'a, S: ModelSchema + ?Sized> FormBinder<'a, S> {
    pub fn new(schema: &'a S, hooks: &'a FormHooks) -> Self {
        Self { schema, hooks }
    }

    /// Bind `raw` into a fresh attribute map and error log.
    ///
    /// Hook failures abort binding; validation problems never do.
    pub fn bind(&self, raw: &RawParams) -> Result<BindOutcome> {
        let buckets = ParamBuckets::classify(raw);
        debug!(
            composite = buckets.composite().len(),
            destroy = buckets.destroy().len(),
            whole = buckets.whole().len(),
            "classified form parameters"
        );

        let mut attributes = BoundAttributes::new();
        let mut errors = ErrorLog::new();

        CompositeAssembler::new(self.schema, self.hooks).assemble(&buckets, &mut attributes)?;
        WholeParamBinder::new(self.schema, self.hooks).bind(&buckets, &mut attributes, &mut errors)?;
        DestroyResolver::new(self.hooks).resolve(&buckets, &mut attributes)?;

        Ok(BindOutcome { attributes, errors })
    }
}
