//! The record being edited.
//!
//! Persistence lives behind the [`Record`] trait. The binder never touches a
//! record directly; callers merge a bound attribute map with
//! [`assign_attributes`] and then save through the
//! [`SaveOrchestrator`](crate::save::SaveOrchestrator).

mod memory;
pub mod multipart;

use indexmap::IndexMap;

use crate::bind::{BoundAttributes, BoundValue};
use crate::error::{BindError, Result};
use crate::params::ParamKey;

pub use memory::MemoryRecord;

/// A mutable, persistable record.
pub trait Record {
    /// Name used in error messages, e.g. `"User"`.
    fn model_name(&self) -> &str;

    /// Assign one attribute.
    fn assign(&mut self, name: &str, value: &BoundValue) -> Result<()>;

    /// Assign a multi-part value from its `base(Ni)` parts.
    ///
    /// Records that do not understand multi-part values reject them.
    fn assign_multiparameter(&mut self, base: &str, _parts: &IndexMap<String, String>) -> Result<()> {
        Err(BindError::Multiparameter {
            attribute: base.to_string(),
            message: format!("{} does not accept multi-part values", self.model_name()),
        })
    }

    /// Persist the record.
    ///
    /// `Ok(false)` means the record refused to save; details are in the
    /// record's own error store. `Err` is reserved for failures that make
    /// the request itself fail.
    fn save(&mut self) -> Result<bool>;
}

/// Merge a bound attribute map onto `record`.
///
/// Pass-through multi-part keys (`birth_date(1i)`, ...) are grouped by base
/// and handed to [`Record::assign_multiparameter`] once per base, after all
/// plain attributes.
pub fn assign_attributes<R: Record + ?Sized>(record: &mut R, attributes: &BoundAttributes) -> Result<()> {
    let mut multiparameters: IndexMap<&str, IndexMap<String, String>> = IndexMap::new();

    for (name, value) in attributes {
        match (ParamKey::parse(name), value) {
            (ParamKey::Composite { base, .. }, BoundValue::Text(text)) => {
                multiparameters
                    .entry(base)
                    .or_default()
                    .insert(name.clone(), text.clone());
            }
            _ => record.assign(name, value)?,
        }
    }

    for (base, parts) in &multiparameters {
        record.assign_multiparameter(base, parts)?;
    }
    Ok(())
}
