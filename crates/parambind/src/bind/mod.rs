//! Binding form parameters to record attributes.
//!
//! # Overview
//!
//! ```text
//! raw params ──classify──► composite ──► CompositeAssembler ─┐
//!                      ├──► whole ─────► WholeParamBinder ───┼──► BoundAttributes
//!                      └──► destroy ───► DestroyResolver ────┘      + ErrorLog
//! ```
//!
//! Each stage can be overridden per attribute through [`FormHooks`].

mod binder;
mod composite;
mod destroy;
mod hooks;
mod value;
mod whole;

pub use binder::{BindOutcome, FormBinder};
pub use composite::{group_by_base, CompositeAssembler};
pub use destroy::DestroyResolver;
pub use hooks::{
    destroy_hook_name, from_form_hook_name, DestroyFn, FormHooks, FromForm, HookError, HookResult,
    PartsFn, ValueFn, ValueWithErrorsFn,
};
pub use value::{coerce_boolean, BoundAttributes, BoundValue};
pub use whole::WholeParamBinder;
