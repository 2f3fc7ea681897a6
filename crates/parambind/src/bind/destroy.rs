//! Applying `name(destroy)` flags to bound attributes.

use tracing::debug;

use super::hooks::{destroy_hook_name, FormHooks};
use super::value::{BoundAttributes, BoundValue};
use crate::error::{BindError, Result};
use crate::params::ParamBuckets;

/// Clears destroy-flagged attributes whose whole value is blank.
///
/// Runs after the composite and whole binders, so it sees and may override
/// their entries. A flagged attribute with a non-blank whole value is left
/// to ordinary binding.
pub struct DestroyResolver<'a> {
    hooks: &'a FormHooks,
}

impl<'a> DestroyResolver<'a> {
    pub fn new(hooks: &'a FormHooks) -> Self {
        Self { hooks }
    }

    pub fn resolve(&self, buckets: &ParamBuckets<'_>, attributes: &mut BoundAttributes) -> Result<()> {
        for &name in buckets.destroy().keys() {
            if !buckets.whole_is_blank(name) {
                continue;
            }

            debug!(attribute = name, "clearing destroyed attribute");
            attributes.insert(name.to_string(), BoundValue::Null);

            if let Some(hook) = self.hooks.destroy_hook(name) {
                hook(&mut *attributes).map_err(|e| BindError::hook(destroy_hook_name(name), e))?;
            }
        }
        Ok(())
    }
}
