//! Error types for the parambind library.
//!
//! Validation problems are never reported through these types. They are
//! collected in an [`ErrorLog`](crate::validation::ErrorLog) instead; a
//! `BindError` always means the request cannot be processed at all.

use std::path::PathBuf;
use thiserror::Error;

use crate::bind::HookError;

/// Main error type for parambind operations.
#[derive(Debug, Error)]
pub enum BindError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request carried no parameter map for the edited model.
    #[error("No parameters submitted for model '{model}'")]
    MissingParams { model: String },

    /// The request parameters could not be read as a flat attribute map.
    #[error("Malformed parameters for '{key}': {message}")]
    MalformedParams { key: String, message: String },

    /// The attribute schema is unusable.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A record was asked to take an attribute it has no setter for.
    #[error("Unknown attribute '{attribute}' for {model}")]
    UnknownAttribute { model: String, attribute: String },

    /// A record cannot accept multi-part values for an attribute.
    #[error("Cannot assign multi-part value to '{attribute}': {message}")]
    Multiparameter { attribute: String, message: String },

    /// A host hook returned an error.
    #[error("Hook '{hook}' failed: {source}")]
    Hook {
        hook: String,
        #[source]
        source: HookError,
    },

    /// Template could not be rendered.
    #[error("Template error for '{template}': {message}")]
    Template { template: PathBuf, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BindError {
    /// Wrap a hook failure with the conventional hook name.
    pub fn hook(hook: impl Into<String>, source: HookError) -> Self {
        BindError::Hook {
            hook: hook.into(),
            source,
        }
    }
}

/// Result type alias for parambind operations.
pub type Result<T> = std::result::Result<T, BindError>;
