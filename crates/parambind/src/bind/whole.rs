//! Binding of plain (whole) parameters.

use tracing::{debug, trace};

use super::hooks::{from_form_hook_name, FormHooks, FromForm};
use super::value::{coerce_boolean, BoundAttributes, BoundValue};
use crate::error::{BindError, Result};
use crate::params::{is_blank, ParamBuckets};
use crate::schema::ModelSchema;
use crate::validation::ErrorLog;

/// Binds whole parameters through hooks or schema-driven coercion.
pub struct WholeParamBinder<'a, S: ModelSchema + ?Sized> {
    schema: &'a S,
    hooks: &'a FormHooks,
}

impl<'a, S: ModelSchema + ?Sized> WholeParamBinder<'a, S> {
    pub fn new(schema: &'a S, hooks: &'a FormHooks) -> Self {
        Self { schema, hooks }
    }

    /// Bind every whole parameter in `buckets` into `attributes`.
    ///
    /// Hooks that take an error log may append validation errors to `errors`.
    pub fn bind(
        &self,
        buckets: &ParamBuckets<'_>,
        attributes: &mut BoundAttributes,
        errors: &mut ErrorLog,
    ) -> Result<()> {
        for (&key, &value) in buckets.whole() {
            if let Some(hook) = self.hooks.value_hook(key) {
                trace!(key, "running value hook");
                let bound = match hook {
                    FromForm::Value(hook) => hook(value),
                    FromForm::ValueWithErrors(hook) => hook(value, &mut *errors),
                    FromForm::Parts(_) => continue,
                }
                .map_err(|e| BindError::hook(from_form_hook_name(key), e))?;
                attributes.insert(key.to_string(), bound);
            } else if self.schema.is_model_setter(key) {
                // A blank value with a destroy flag is cleared later by the
                // destroy resolver.
                if buckets.is_destroy_flagged(key) && is_blank(value) {
                    continue;
                }
                attributes.insert(key.to_string(), self.coerce(key, value));
            } else {
                debug!(key, "dropping parameter with no hook or setter");
            }
        }
        Ok(())
    }

    fn coerce(&self, key: &str, value: &str) -> BoundValue {
        if self.schema.is_boolean(key) {
            coerce_boolean(value)
        } else {
            BoundValue::Text(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RawParams;
    use crate::schema::{AttributeSchema, ColumnType};

    fn raw(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn schema() -> AttributeSchema {
        AttributeSchema::new()
            .column_of("name", ColumnType::String)
            .column_of("active", ColumnType::Boolean)
            .column_of("child_id", ColumnType::Integer)
            .setter("password")
    }

    fn bind(hooks: &FormHooks, pairs: &[(&str, &str)]) -> (BoundAttributes, ErrorLog) {
        let schema = schema();
        let params = raw(pairs);
        let buckets = ParamBuckets::classify(&params);
        let mut attributes = BoundAttributes::new();
        let mut errors = ErrorLog::new();
        WholeParamBinder::new(&schema, hooks)
            .bind(&buckets, &mut attributes, &mut errors)
            .unwrap();
        (attributes, errors)
    }

    #[test]
    fn test_boolean_coercion() {
        let hooks = FormHooks::new();
        let (attrs, _) = bind(&hooks, &[("active", "1")]);
        assert_eq!(attrs["active"], BoundValue::Bool(true));

        let (attrs, _) = bind(&hooks, &[("active", "0")]);
        assert_eq!(attrs["active"], BoundValue::Bool(false));

        let (attrs, _) = bind(&hooks, &[("active", "yes")]);
        assert_eq!(attrs["active"], BoundValue::Null);
    }

    #[test]
    fn test_text_and_virtual_setter() {
        let hooks = FormHooks::new();
        let (attrs, _) = bind(&hooks, &[("name", "Ada"), ("password", "s3cret")]);

        assert_eq!(attrs["name"], BoundValue::from("Ada"));
        assert_eq!(attrs["password"], BoundValue::from("s3cret"));
    }

    #[test]
    fn test_unknown_key_dropped() {
        let hooks = FormHooks::new();
        let (attrs, errors) = bind(&hooks, &[("admin", "1")]);

        assert!(attrs.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_value_hook_overrides_setter() {
        let hooks = FormHooks::new().from_form("name", |v| Ok(v.to_uppercase().into()));
        let (attrs, _) = bind(&hooks, &[("name", "ada")]);

        assert_eq!(attrs["name"], BoundValue::from("ADA"));
    }

    #[test]
    fn test_hook_for_non_attribute_key() {
        let hooks = FormHooks::new().from_form("tags", |v| {
            Ok(serde_json::json!(v.split(',').collect::<Vec<_>>()).into())
        });
        let (attrs, _) = bind(&hooks, &[("tags", "a,b")]);

        assert_eq!(attrs["tags"], BoundValue::Json(serde_json::json!(["a", "b"])));
    }

    #[test]
    fn test_hook_reports_errors() {
        let hooks = FormHooks::new().from_form_with_errors("name", |v, errors| {
            if v.len() < 3 {
                errors.add("name", "too short");
            }
            Ok(v.into())
        });
        let (attrs, errors) = bind(&hooks, &[("name", "Al")]);

        assert_eq!(attrs["name"], BoundValue::from("Al"));
        assert_eq!(errors.get("name")[0].message(), Some("too short"));
    }

    #[test]
    fn test_blank_destroy_flagged_value_skipped() {
        let hooks = FormHooks::new();
        let (attrs, _) = bind(&hooks, &[("child_id(destroy)", "1"), ("child_id", "")]);
        assert!(!attrs.contains_key("child_id"));

        let (attrs, _) = bind(&hooks, &[("child_id(destroy)", "1"), ("child_id", "7")]);
        assert_eq!(attrs["child_id"], BoundValue::from("7"));
    }

    #[test]
    fn test_blank_value_without_flag_is_bound() {
        let hooks = FormHooks::new();
        let (attrs, _) = bind(&hooks, &[("name", "")]);
        assert_eq!(attrs["name"], BoundValue::from(""));
    }
}
