//! Where to send the client after a successful save.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::{is_blank, RequestParams};

/// Request parameter holding the page the form was opened from.
pub const REFERER_PARAM: &str = "referer";

/// A redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Destination {
    /// A literal URL or path.
    Url(String),
    /// An action of the current controller, e.g. `index`.
    Action(String),
}

impl Default for Destination {
    fn default() -> Self {
        Destination::Action("index".to_string())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Url(url) => write!(f, "{url}"),
            Destination::Action(action) => write!(f, "action:{action}"),
        }
    }
}

type DestinationHook<R> = Box<dyn Fn(&R, &RequestParams) -> Option<Destination> + Send + Sync>;

/// Picks the post-save destination.
///
/// Precedence: the host's `destination_after_save` hook, then a non-blank
/// `referer` parameter, then the configured default.
pub struct RedirectResolver<R: ?Sized> {
    destination_after_save: Option<DestinationHook<R>>,
    default: Destination,
}

impl<R: ?Sized> RedirectResolver<R> {
    pub fn new(default: Destination) -> Self {
        Self {
            destination_after_save: None,
            default,
        }
    }

    pub fn with_destination_after_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&R, &RequestParams) -> Option<Destination> + Send + Sync + 'static,
    {
        self.destination_after_save = Some(Box::new(hook));
        self
    }

    pub fn resolve(&self, record: &R, params: &RequestParams) -> Destination {
        self.destination_after_save
            .as_ref()
            .and_then(|hook| hook(record, params))
            .or_else(|| {
                params
                    .text(REFERER_PARAM)
                    .filter(|referer| !is_blank(referer))
                    .map(|referer| Destination::Url(referer.to_string()))
            })
            .unwrap_or_else(|| self.default.clone())
    }
}

impl<R: ?Sized> Default for RedirectResolver<R> {
    fn default() -> Self {
        Self::new(Destination::default())
    }
}

impl<R: ?Sized> fmt::Debug for RedirectResolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectResolver")
            .field("destination_after_save", &self.destination_after_save.is_some())
            .field("default", &self.default)
            .finish()
    }
}
