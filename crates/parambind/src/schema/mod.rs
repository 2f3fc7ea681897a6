//! Attribute schema of the record being edited.

mod column;
mod model;
mod types;

pub use column::ColumnSchema;
pub use model::{AttributeSchema, ModelSchema};
pub use types::ColumnType;
