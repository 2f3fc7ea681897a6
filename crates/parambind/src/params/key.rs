//! Classification of individual form parameter keys.

use once_cell::sync::Lazy;
use regex::Regex;

/// Positional suffix of a multi-part key, e.g. `(3i)` in `birth_date(3i)`.
static COMPOSITE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([0-9]+)i\)$").unwrap());

const DESTROY_SUFFIX: &str = "(destroy)";

/// The three shapes a form key can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey<'a> {
    /// A bare attribute name.
    Whole(&'a str),
    /// One positional part of a multi-part value, `base(Ni)`.
    Composite { base: &'a str, position: &'a str },
    /// A request to clear an attribute, `name(destroy)`.
    Destroy(&'a str),
}

impl<'a> ParamKey<'a> {
    /// Classify a raw key.
    ///
    /// Only the trailing suffix is inspected; the base is kept as literal
    /// text, so names containing parentheses or other punctuation are never
    /// interpreted.
    pub fn parse(key: &'a str) -> Self {
        if let Some(captures) = COMPOSITE_SUFFIX.captures(key) {
            if let (Some(suffix), Some(digits)) = (captures.get(0), captures.get(1)) {
                return ParamKey::Composite {
                    base: &key[..suffix.start()],
                    position: digits.as_str(),
                };
            }
        }

        match key.strip_suffix(DESTROY_SUFFIX) {
            Some(name) => ParamKey::Destroy(name),
            None => ParamKey::Whole(key),
        }
    }

    /// The attribute name this key refers to.
    pub fn name(&self) -> &'a str {
        match self {
            ParamKey::Whole(name) | ParamKey::Destroy(name) => name,
            ParamKey::Composite { base, .. } => base,
        }
    }

    /// Numeric position of a composite key.
    ///
    /// `None` for other key shapes or positions that do not fit a `u32`.
    pub fn position(&self) -> Option<u32> {
        match self {
            ParamKey::Composite { position, .. } => position.parse().ok(),
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ParamKey::Composite { .. })
    }
}

/// Build the composite key for `base` at `position`, e.g. `birth_date(1i)`.
pub fn composite_key(base: &str, position: u32) -> String {
    format!("{base}({position}i)")
}
