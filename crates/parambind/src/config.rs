//! Per-resource configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BindError, Result};
use crate::response::{Destination, ViewConfig};
use crate::schema::AttributeSchema;

/// Everything needed to edit one resource: its model name, attribute
/// schema, views and where to go after saving.
///
/// ```json
/// {
///   "model": "BlogPost",
///   "schema": {
///     "columns": [{"name": "title", "type": "string"}],
///     "setters": ["tag_list"]
///   },
///   "views": {"controller_path": "admin/blog_posts"},
///   "default_destination": {"kind": "action", "target": "index"}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Model name, e.g. `BlogPost` or `Admin::User`.
    pub model: String,
    pub schema: AttributeSchema,
    #[serde(default)]
    pub views: ViewConfig,
    #[serde(default)]
    pub default_destination: Destination,
}

impl ResourceConfig {
    pub fn new(model: impl Into<String>, schema: AttributeSchema) -> Self {
        Self {
            model: model.into(),
            schema,
            views: ViewConfig::default(),
            default_destination: Destination::default(),
        }
    }

    pub fn with_views(mut self, views: ViewConfig) -> Self {
        self.views = views;
        self
    }

    pub fn with_default_destination(mut self, destination: Destination) -> Self {
        self.default_destination = destination;
        self
    }

    /// The request parameter holding this model's attributes.
    ///
    /// `BlogPost` becomes `blog_post`, `Admin::User` becomes `admin/user`.
    pub fn model_key(&self) -> String {
        underscore(&self.model)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(BindError::Config("model name is empty".to_string()));
        }
        self.schema.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ResourceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| BindError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| BindError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn underscore(name: &str) -> String {
    let name = name.replace("::", "/");
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_uppercase() {
            let after_lower = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            // Acronym boundary: "HTMLPage" -> "html_page"
            let acronym_end = prev.is_some_and(|p| p.is_ascii_uppercase())
                && chars.peek().is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || acronym_end {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}
