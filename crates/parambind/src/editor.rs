//! The per-resource editing façade.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bind::{BindOutcome, BoundAttributes, BoundValue, FormBinder, FormHooks, HookResult};
use crate::config::ResourceConfig;
use crate::error::Result;
use crate::params::{ParamBuckets, RequestParams};
use crate::record::{assign_attributes, Record};
use crate::response::{Destination, PageComposer, RedirectResolver, StaticFileRenderer};
use crate::save::SaveOrchestrator;
use crate::schema::{AttributeSchema, ModelSchema};
use crate::validation::ErrorLog;

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    /// Values merged onto the record.
    pub attributes: BoundAttributes,
    /// Errors reported while binding. Record-level errors stay on the record.
    pub errors: ErrorLog,
    /// Whether the record was saved.
    pub saved: bool,
    /// Where to redirect; only set when saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
}

/// Binds, saves and redirects for one resource type.
pub struct RecordEditor<R: Record> {
    config: ResourceConfig,
    schema: Arc<AttributeSchema>,
    hooks: FormHooks,
    saver: SaveOrchestrator<R>,
    redirect: RedirectResolver<R>,
}

impl<R: Record> RecordEditor<R> {
    pub fn new(config: ResourceConfig) -> Self {
        let schema = Arc::new(config.schema.clone());
        let redirect = RedirectResolver::new(config.default_destination.clone());
        Self {
            config,
            schema,
            hooks: FormHooks::new(),
            saver: SaveOrchestrator::new(),
            redirect,
        }
    }

    /// Register the form hooks used while binding.
    pub fn with_hooks(mut self, hooks: FormHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_before_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut R) -> HookResult<()> + Send + Sync + 'static,
    {
        self.saver = self.saver.with_before_save(hook);
        self
    }

    pub fn with_after_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut R) -> HookResult<()> + Send + Sync + 'static,
    {
        self.saver = self.saver.with_after_save(hook);
        self
    }

    pub fn with_destination_after_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&R, &RequestParams) -> Option<Destination> + Send + Sync + 'static,
    {
        self.redirect = self.redirect.with_destination_after_save(hook);
        self
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Shared handle to the attribute schema, for building records.
    pub fn schema(&self) -> Arc<AttributeSchema> {
        Arc::clone(&self.schema)
    }

    /// Bind this resource's parameters from `params` without touching a record.
    pub fn params_for_save(&self, params: &RequestParams) -> Result<BindOutcome> {
        let model_key = self.config.model_key();
        let raw = params.model_params(&model_key)?;
        debug!(model = %self.config.model, params = raw.len(), "binding form parameters");
        FormBinder::new(self.schema.as_ref(), &self.hooks).bind(raw)
    }

    /// Bind `params`, merge them onto `record` and save it.
    ///
    /// Bound values are always assigned, so a form with errors can be
    /// re-rendered from the record. Binding errors skip the save and come
    /// back in the outcome. The destination is resolved only after a
    /// successful save.
    pub fn submit(&self, record: &mut R, params: &RequestParams) -> Result<SubmitOutcome> {
        let (mut attributes, errors) = self.params_for_save(params)?.into_parts();
        self.discard_unknown_destroys(params, &mut attributes)?;
        assign_attributes(record, &attributes)?;

        if !errors.is_empty() {
            warn!(
                model = %self.config.model,
                errors = errors.len(),
                "form has errors, not saving"
            );
            return Ok(SubmitOutcome {
                attributes,
                errors,
                saved: false,
                destination: None,
            });
        }

        let saved = self.saver.save(record)?;
        let destination = saved.then(|| self.redirect.resolve(record, params));
        if let Some(destination) = &destination {
            info!(model = %self.config.model, %destination, "redirecting after save");
        }

        Ok(SubmitOutcome {
            attributes,
            errors,
            saved,
            destination,
        })
    }

    /// Drop nulls left by destroy flags for names the record has no setter
    /// for, so a stale checkbox does not fail the whole request.
    fn discard_unknown_destroys(
        &self,
        params: &RequestParams,
        attributes: &mut BoundAttributes,
    ) -> Result<()> {
        let raw = params.model_params(&self.config.model_key())?;
        for &name in ParamBuckets::classify(raw).destroy().keys() {
            if !self.schema.is_model_setter(name)
                && attributes.get(name).is_some_and(BoundValue::is_null)
            {
                debug!(attribute = name, "ignoring destroy flag for unknown attribute");
                attributes.shift_remove(name);
            }
        }
        Ok(())
    }

    /// Page composer over this resource's views.
    pub fn pages(&self) -> PageComposer<StaticFileRenderer> {
        PageComposer::with_static_files(self.config.views.clone())
    }
}

impl<R: Record> std::fmt::Debug for RecordEditor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordEditor")
            .field("model", &self.config.model)
            .field("hooks", &self.hooks)
            .field("saver", &self.saver)
            .field("redirect", &self.redirect)
            .finish()
    }
}
