//! Request-level parameters and extraction of a model's attribute map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::buckets::RawParams;
use crate::error::{BindError, Result};

/// A single request parameter: plain text or a nested attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Nested(RawParams),
}

/// All parameters of one request, e.g. `{"user": {...}, "referer": "/users"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    params: IndexMap<String, ParamValue>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a plain text parameter.
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), ParamValue::Text(value.into()));
        self
    }

    /// Set a nested attribute map.
    pub fn with_nested(mut self, key: impl Into<String>, attributes: RawParams) -> Self {
        self.params.insert(key.into(), ParamValue::Nested(attributes));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// A plain text parameter, if present.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.params.get(key) {
            Some(ParamValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// The flat attribute map submitted for `model_key`.
    ///
    /// Fails when the model's parameters are absent or are not a map; both
    /// mean the form and the editor disagree about the model being edited.
    pub fn model_params(&self, model_key: &str) -> Result<&RawParams> {
        match self.params.get(model_key) {
            Some(ParamValue::Nested(attributes)) => Ok(attributes),
            Some(ParamValue::Text(_)) => Err(BindError::MalformedParams {
                key: model_key.to_string(),
                message: "expected a map of attributes, found text".to_string(),
            }),
            None => Err(BindError::MissingParams {
                model: model_key.to_string(),
            }),
        }
    }

    /// Insert one form-encoded pair such as `user[birth_date(1i)]=1990`.
    ///
    /// Keys without brackets are stored as text. Only one level of nesting
    /// is supported.
    pub fn insert_form_pair(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let Some(open) = key.find('[') else {
            self.params.insert(key.to_string(), ParamValue::Text(value));
            return Ok(());
        };

        let outer = &key[..open];
        let inner = key[open + 1..]
            .strip_suffix(']')
            .filter(|inner| !inner.contains(['[', ']']))
            .ok_or_else(|| BindError::MalformedParams {
                key: key.to_string(),
                message: "expected 'model[attribute]'".to_string(),
            })?;

        if outer.is_empty() {
            return Err(BindError::MalformedParams {
                key: key.to_string(),
                message: "missing model name before '['".to_string(),
            });
        }

        let entry = self
            .params
            .entry(outer.to_string())
            .or_insert_with(|| ParamValue::Nested(RawParams::new()));
        match entry {
            ParamValue::Nested(attributes) => {
                attributes.insert(inner.to_string(), value);
                Ok(())
            }
            ParamValue::Text(_) => Err(BindError::MalformedParams {
                key: key.to_string(),
                message: format!("'{outer}' is already a text parameter"),
            }),
        }
    }

    /// Build from form-encoded pairs.
    pub fn from_form_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = RequestParams::new();
        for (key, value) in pairs {
            params.insert_form_pair(key.as_ref(), value)?;
        }
        Ok(params)
    }
}
