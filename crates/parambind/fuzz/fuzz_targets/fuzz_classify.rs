//! Fuzz target for form key classification.
//!
//! Classification must never panic, and every submitted key must land in
//! exactly one bucket.

#![no_main]

use libfuzzer_sys::fuzz_target;
use parambind::{ParamBuckets, RawParams};

fuzz_target!(|pairs: Vec<(String, String)>| {
    if pairs.len() > 1_000 {
        return;
    }

    let params: RawParams = pairs.into_iter().collect();
    let buckets = ParamBuckets::classify(&params);
    assert_eq!(buckets.len(), params.len());
});
