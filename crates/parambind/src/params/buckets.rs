//! Splitting a raw parameter set into composite, destroy and whole views.

use indexmap::IndexMap;

use super::key::ParamKey;

/// Flat attribute parameters for one model, as submitted by a form.
pub type RawParams = IndexMap<String, String>;

/// A raw parameter set partitioned by key shape.
///
/// Every raw key lands in exactly one view. All views borrow from the raw
/// set and keep its order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamBuckets<'a> {
    composite: IndexMap<&'a str, &'a str>,
    destroy: IndexMap<&'a str, &'a str>,
    whole: IndexMap<&'a str, &'a str>,
}

impl<'a> ParamBuckets<'a> {
    /// Partition `raw` by key shape.
    pub fn classify(raw: &'a RawParams) -> Self {
        let mut buckets = ParamBuckets::default();
        for (key, value) in raw {
            match ParamKey::parse(key) {
                ParamKey::Composite { .. } => {
                    buckets.composite.insert(key.as_str(), value.as_str());
                }
                ParamKey::Destroy(name) => {
                    buckets.destroy.insert(name, value.as_str());
                }
                ParamKey::Whole(name) => {
                    buckets.whole.insert(name, value.as_str());
                }
            }
        }
        buckets
    }

    /// Composite keys (full `base(Ni)` text) and their values.
    pub fn composite(&self) -> &IndexMap<&'a str, &'a str> {
        &self.composite
    }

    /// Destroy-flagged attribute names and their flag values.
    pub fn destroy(&self) -> &IndexMap<&'a str, &'a str> {
        &self.destroy
    }

    /// Plain attribute keys and their values.
    pub fn whole(&self) -> &IndexMap<&'a str, &'a str> {
        &self.whole
    }

    pub fn is_destroy_flagged(&self, name: &str) -> bool {
        self.destroy.contains_key(name)
    }

    /// Whether the whole value for `name` is missing or blank.
    pub fn whole_is_blank(&self, name: &str) -> bool {
        self.whole.get(name).is_none_or(|value| is_blank(value))
    }

    /// Total number of classified keys.
    pub fn len(&self) -> usize {
        self.composite.len() + self.destroy.len() + self.whole.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
