//! Host-supplied binding hooks.
//!
//! Hooks are registered per attribute name up front. Binding never probes
//! for them by convention; a name either has a registered hook or it does
//! not. The conventional names (`<name>_from_form`,
//! `destroy_<name>_in_attributes`) are only used to label hook failures.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use super::value::{BoundAttributes, BoundValue};
use crate::validation::ErrorLog;

/// Error type hooks may return.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for hooks.
pub type HookResult<T> = std::result::Result<T, HookError>;

/// Multi-part parser signature.
pub type PartsFn = dyn Fn(&IndexMap<String, String>) -> HookResult<BoundValue> + Send + Sync;
/// Whole-value parser signature.
pub type ValueFn = dyn Fn(&str) -> HookResult<BoundValue> + Send + Sync;
/// Whole-value parser signature with error reporting.
pub type ValueWithErrorsFn = dyn Fn(&str, &mut ErrorLog) -> HookResult<BoundValue> + Send + Sync;
/// Destroy hook signature.
pub type DestroyFn = dyn Fn(&mut BoundAttributes) -> HookResult<()> + Send + Sync;

/// A custom parser for one attribute's form input.
pub enum FromForm {
    /// Receives the multi-part sub-map (`base(1i)` → value, ...).
    Parts(Box<PartsFn>),
    /// Receives the whole value.
    Value(Box<ValueFn>),
    /// Receives the whole value and may report validation errors.
    ValueWithErrors(Box<ValueWithErrorsFn>),
}

impl FromForm {
    fn shape(&self) -> &'static str {
        match self {
            FromForm::Parts(_) => "parts",
            FromForm::Value(_) => "value",
            FromForm::ValueWithErrors(_) => "value_with_errors",
        }
    }
}

impl fmt::Debug for FromForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromForm::{}", self.shape())
    }
}

/// Registry of binding hooks keyed by attribute name.
#[derive(Default)]
pub struct FormHooks {
    from_form: HashMap<String, FromForm>,
    destroy: HashMap<String, Box<DestroyFn>>,
}

impl FormHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a multi-part attribute from its sub-map.
    ///
    /// Replaces any `from_form` hook already registered for `name`.
    pub fn from_form_parts<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&IndexMap<String, String>) -> HookResult<BoundValue> + Send + Sync + 'static,
    {
        self.from_form
            .insert(name.into(), FromForm::Parts(Box::new(hook)));
        self
    }

    /// Parse a whole attribute value.
    pub fn from_form<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&str) -> HookResult<BoundValue> + Send + Sync + 'static,
    {
        self.from_form
            .insert(name.into(), FromForm::Value(Box::new(hook)));
        self
    }

    /// Parse a whole attribute value, reporting problems to the error log.
    pub fn from_form_with_errors<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&str, &mut ErrorLog) -> HookResult<BoundValue> + Send + Sync + 'static,
    {
        self.from_form
            .insert(name.into(), FromForm::ValueWithErrors(Box::new(hook)));
        self
    }

    /// Run after `name` has been cleared by a destroy flag.
    pub fn on_destroy<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut BoundAttributes) -> HookResult<()> + Send + Sync + 'static,
    {
        self.destroy.insert(name.into(), Box::new(hook));
        self
    }

    /// The sub-map parser for `base`, if one is registered.
    pub fn parts_hook(&self, base: &str) -> Option<&PartsFn> {
        match self.from_form.get(base) {
            Some(FromForm::Parts(hook)) => Some(&**hook),
            _ => None,
        }
    }

    /// The whole-value parser for `key`, if one is registered.
    pub fn value_hook(&self, key: &str) -> Option<&FromForm> {
        self.from_form
            .get(key)
            .filter(|hook| !matches!(hook, FromForm::Parts(_)))
    }

    pub fn destroy_hook(&self, name: &str) -> Option<&DestroyFn> {
        self.destroy.get(name).map(|hook| &**hook)
    }

    pub fn is_empty(&self) -> bool {
        self.from_form.is_empty() && self.destroy.is_empty()
    }
}

impl fmt::Debug for FormHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut from_form: Vec<_> = self
            .from_form
            .iter()
            .map(|(name, hook)| format!("{}:{}", from_form_hook_name(name), hook.shape()))
            .collect();
        from_form.sort();
        let mut destroy: Vec<_> = self.destroy.keys().map(|n| destroy_hook_name(n)).collect();
        destroy.sort();

        f.debug_struct("FormHooks")
            .field("from_form", &from_form)
            .field("destroy", &destroy)
            .finish()
    }
}

/// Conventional name of a form parsing hook, e.g. `birth_date_from_form`.
pub fn from_form_hook_name(name: &str) -> String {
    format!("{name}_from_form")
}

/// Conventional name of a destroy hook, e.g. `destroy_avatar_in_attributes`.
pub fn destroy_hook_name(name: &str) -> String {
    format!("destroy_{name}_in_attributes")
}
