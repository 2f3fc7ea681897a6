//! Validation errors reported while binding form values.

mod error_log;

pub use error_log::{ErrorLog, ErrorOptions, ErrorRecord};
