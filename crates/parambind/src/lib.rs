//! parambind: bind submitted form parameters onto record attributes.
//!
//! A form posts a flat map of strings. Some keys are whole attributes
//! (`name`), some are parts of one value (`birth_date(1i)`), and some ask
//! for an attribute to be cleared (`avatar(destroy)`). parambind sorts the
//! keys, runs per-attribute hooks, coerces booleans, and produces an
//! attribute map plus a log of validation errors. The caller merges that
//! map onto a [`Record`] and saves it through a [`SaveOrchestrator`].
//!
//! # Example
//!
//! ```
//! use parambind::{AttributeSchema, ColumnType, FormBinder, FormHooks, RawParams};
//!
//! let schema = AttributeSchema::new()
//!     .column_of("name", ColumnType::String)
//!     .column_of("active", ColumnType::Boolean);
//! let hooks = FormHooks::new();
//!
//! let mut params = RawParams::new();
//! params.insert("name".to_string(), "Ada".to_string());
//! params.insert("active".to_string(), "1".to_string());
//!
//! let outcome = FormBinder::new(&schema, &hooks).bind(&params).unwrap();
//! assert_eq!(outcome.attributes()["active"].as_bool(), Some(true));
//! ```

pub mod bind;
pub mod config;
pub mod error;
pub mod params;
pub mod record;
pub mod response;
pub mod schema;
pub mod validation;

mod editor;
mod save;

pub use bind::{BindOutcome, BoundAttributes, BoundValue, FormBinder, FormHooks, HookError, HookResult};
pub use config::ResourceConfig;
pub use editor::{RecordEditor, SubmitOutcome};
pub use error::{BindError, Result};
pub use params::{ParamBuckets, ParamKey, ParamValue, RawParams, RequestParams};
pub use record::{assign_attributes, MemoryRecord, Record};
pub use response::{Destination, PageComposer, RedirectResolver, StaticFileRenderer, TemplateRenderer, ViewConfig};
pub use save::SaveOrchestrator;
pub use schema::{AttributeSchema, ColumnSchema, ColumnType, ModelSchema};
pub use validation::{ErrorLog, ErrorRecord};
