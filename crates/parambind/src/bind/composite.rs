//! Reassembly of multi-part (composite) parameters.

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::hooks::{from_form_hook_name, FormHooks};
use super::value::{BoundAttributes, BoundValue};
use crate::error::{BindError, Result};
use crate::params::{ParamBuckets, ParamKey};
use crate::schema::ModelSchema;

/// Groups composite keys by base name and binds each group.
pub struct CompositeAssembler<'a, S: ModelSchema + ?Sized> {
    schema: &'a S,
    hooks: &'a FormHooks,
}

impl<'a, S: ModelSchema + ?Sized> CompositeAssembler<'a, S> {
    pub fn new(schema: &'a S, hooks: &'a FormHooks) -> Self {
        Self { schema, hooks }
    }

    /// Bind every composite group in `buckets` into `attributes`.
    ///
    /// A group goes to its `from_form` parts hook if one is registered; else
    /// its keys pass through unchanged when the base is a model setter; else
    /// it is dropped.
    pub fn assemble(&self, buckets: &ParamBuckets<'_>, attributes: &mut BoundAttributes) -> Result<()> {
        for (base, parts) in group_by_base(buckets.composite()) {
            if let Some(hook) = self.hooks.parts_hook(base) {
                trace!(base, parts = parts.len(), "running parts hook");
                let value = hook(&parts).map_err(|e| BindError::hook(from_form_hook_name(base), e))?;
                attributes.insert(base.to_string(), value);
            } else if self.schema.is_model_setter(base) {
                attributes.extend(
                    parts
                        .into_iter()
                        .map(|(key, value)| (key, BoundValue::Text(value))),
                );
            } else {
                debug!(base, "dropping multi-part parameter with no hook or setter");
            }
        }
        Ok(())
    }
}

/// Group composite keys into per-base sub-maps.
///
/// Bases keep first-seen order. A key joins the group whose base equals its
/// own base text exactly, so a base that is a suffix or pattern-like
/// fragment of another base never steals its keys.
pub fn group_by_base<'a>(
    composite: &IndexMap<&'a str, &'a str>,
) -> IndexMap<&'a str, IndexMap<String, String>> {
    let mut groups: IndexMap<&'a str, IndexMap<String, String>> = IndexMap::new();
    for (&key, &value) in composite {
        let base = ParamKey::parse(key).name();
        groups
            .entry(base)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }
    groups
}
