//! Per-attribute validation error collection.
//!
//! An [`ErrorLog`] is created fresh for each bind attempt. Hooks append to it
//! while form values are parsed; once handed back to the caller it is only
//! read, typically to render messages next to form fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extra data attached to an error record.
pub type ErrorOptions = IndexMap<String, Value>;

/// Legacy option key accepted in place of `message`.
const LEGACY_MESSAGE_KEY: &str = "default";
const MESSAGE_KEY: &str = "message";

/// A single validation error for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    options: ErrorOptions,
}

impl ErrorRecord {
    /// Create an error record.
    ///
    /// A `default` entry in `options` is renamed to `message`.
    pub fn new(
        attribute: impl Into<String>,
        message: Option<String>,
        mut options: ErrorOptions,
    ) -> Self {
        rename_legacy_message(&mut options);
        Self {
            attribute: attribute.into(),
            message,
            options,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The message given explicitly, else the `message` option.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or_else(|| self.options.get(MESSAGE_KEY).and_then(Value::as_str))
    }

    pub fn options(&self) -> &ErrorOptions {
        &self.options
    }
}

fn rename_legacy_message(options: &mut ErrorOptions) {
    if let Some(value) = options.shift_remove(LEGACY_MESSAGE_KEY) {
        options.insert(MESSAGE_KEY.to_string(), value);
    }
}

/// Ordered collection of validation errors keyed by attribute.
///
/// Attributes iterate in the order their first error was added; errors for
/// one attribute iterate in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLog {
    errors: IndexMap<String, Vec<ErrorRecord>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for an attribute.
    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.add_with_options(attribute, Some(message.into()), ErrorOptions::new());
    }

    /// Add an error with an optional message and extra options.
    ///
    /// `options` may carry the message under the legacy key `default`; it is
    /// stored as `message` and surfaces through [`ErrorRecord::message`] when
    /// no explicit message is given.
    pub fn add_with_options(
        &mut self,
        attribute: impl Into<String>,
        message: Option<String>,
        options: ErrorOptions,
    ) {
        self.push(ErrorRecord::new(attribute, message, options));
    }

    /// Add an existing error record as-is, under its own attribute.
    pub fn add_record(&mut self, record: ErrorRecord) {
        self.push(record);
    }

    fn push(&mut self, record: ErrorRecord) {
        self.errors
            .entry(record.attribute.clone())
            .or_default()
            .push(record);
    }

    /// Iterate `(attribute, message)` pairs, grouped by attribute.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.errors.iter().flat_map(|(attribute, records)| {
            records
                .iter()
                .map(move |record| (attribute.as_str(), record.message()))
        })
    }

    /// Iterate distinct attribute names in first-insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Records for one attribute.
    pub fn get(&self, attribute: &str) -> &[ErrorRecord] {
        self.errors.get(attribute).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Messages formatted with a humanized attribute name, e.g. "Birth date is invalid".
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .map(|(attribute, message)| match message {
                Some(message) => format!("{} {}", humanize(attribute), message),
                None => format!("{} is invalid", humanize(attribute)),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Total number of records across all attributes.
    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }
}

fn humanize(attribute: &str) -> String {
    let trimmed = attribute.strip_suffix("_id").unwrap_or(attribute);
    let spaced = trimmed.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
