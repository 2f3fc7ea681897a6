//! Form parameter parsing.
//!
//! Form builders encode multi-part fields (date selects and similar) as one
//! key per part, `birth_date(1i)`, `birth_date(2i)`, ..., and removal
//! checkboxes as `avatar(destroy)`. This module recognises those shapes and
//! splits a model's parameters accordingly.

mod buckets;
mod key;
mod request;

pub use buckets::{is_blank, ParamBuckets, RawParams};
pub use key::{composite_key, ParamKey};
pub use request::{ParamValue, RequestParams};
