//! Page composition from optional before/after partials.
//!
//! A page named `form` renders as
//!
//! ```text
//! <views_root>/<controller_path>/_before_form.<ext>   (if present)
//! <templates_root>/form.<ext>
//! <views_root>/<controller_path>/_after_form.<ext>    (if present)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{BindError, Result};

/// Locals passed through to every template of a page.
pub type RenderOptions = IndexMap<String, Value>;

/// Where templates live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Root of the host application's views.
    pub views_root: PathBuf,
    /// Controller directory under `views_root`, e.g. `admin/users`.
    pub controller_path: String,
    /// Directory holding the shared page templates.
    pub templates_root: PathBuf,
    pub extension: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            views_root: PathBuf::from("views"),
            controller_path: String::new(),
            templates_root: PathBuf::from("templates"),
            extension: "html".to_string(),
        }
    }
}

impl ViewConfig {
    pub fn with_views_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.views_root = root.into();
        self
    }

    pub fn with_controller_path(mut self, path: impl Into<String>) -> Self {
        self.controller_path = path.into();
        self
    }

    pub fn with_templates_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.templates_root = root.into();
        self
    }

    pub fn before_template(&self, name: &str) -> PathBuf {
        self.partial(&format!("_before_{name}"))
    }

    pub fn after_template(&self, name: &str) -> PathBuf {
        self.partial(&format!("_after_{name}"))
    }

    pub fn main_template(&self, name: &str) -> PathBuf {
        self.templates_root.join(format!("{name}.{}", self.extension))
    }

    fn partial(&self, file_stem: &str) -> PathBuf {
        self.views_root
            .join(&self.controller_path)
            .join(format!("{file_stem}.{}", self.extension))
    }
}

/// Renders a single template file.
pub trait TemplateRenderer {
    fn render(&self, template: &Path, options: &RenderOptions) -> Result<String>;

    fn exists(&self, template: &Path) -> bool {
        template.exists()
    }
}

/// Reads templates verbatim and substitutes `{{name}}` with string locals.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFileRenderer;

impl TemplateRenderer for StaticFileRenderer {
    fn render(&self, template: &Path, options: &RenderOptions) -> Result<String> {
        let mut body = fs::read_to_string(template).map_err(|e| BindError::Template {
            template: template.to_path_buf(),
            message: e.to_string(),
        })?;
        for (name, value) in options {
            let replacement = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            body = body.replace(&format!("{{{{{name}}}}}"), &replacement);
        }
        Ok(body)
    }
}

/// Joins the before partial, main template and after partial into one page.
#[derive(Debug, Clone)]
pub struct PageComposer<T: TemplateRenderer> {
    config: ViewConfig,
    renderer: T,
}

impl<T: TemplateRenderer> PageComposer<T> {
    pub fn new(config: ViewConfig, renderer: T) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Render page `name`. The main template must exist; partials are optional.
    pub fn compose(&self, name: &str, options: &RenderOptions) -> Result<String> {
        let mut page = String::new();

        let before = self.config.before_template(name);
        if self.renderer.exists(&before) {
            debug!(template = %before.display(), "rendering before partial");
            page.push_str(&self.renderer.render(&before, options)?);
        }

        page.push_str(&self.renderer.render(&self.config.main_template(name), options)?);

        let after = self.config.after_template(name);
        if self.renderer.exists(&after) {
            debug!(template = %after.display(), "rendering after partial");
            page.push_str(&self.renderer.render(&after, options)?);
        }

        Ok(page)
    }
}

impl PageComposer<StaticFileRenderer> {
    pub fn with_static_files(config: ViewConfig) -> Self {
        Self::new(config, StaticFileRenderer)
    }
}
