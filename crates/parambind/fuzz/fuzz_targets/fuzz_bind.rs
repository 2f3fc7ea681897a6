//! Fuzz target for the binding pipeline.
//!
//! Binds arbitrary forms against a fixed schema with every hook shape
//! registered. Binding must never panic and never fail without a hook error.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use parambind::{
    assign_attributes, AttributeSchema, BoundValue, ColumnType, FormBinder, FormHooks,
    MemoryRecord, RawParams,
};
use std::sync::Arc;

#[derive(Debug, Arbitrary)]
struct Form {
    pairs: Vec<(String, String)>,
    assign: bool,
}

fuzz_target!(|form: Form| {
    if form.pairs.len() > 500 {
        return;
    }

    let schema = Arc::new(
        AttributeSchema::new()
            .column_of("name", ColumnType::String)
            .column_of("active", ColumnType::Boolean)
            .column_of("born_on", ColumnType::Date)
            .column_of("starts_at", ColumnType::DateTime)
            .column_of("alarm", ColumnType::Time)
            .setter("avatar"),
    );
    let hooks = FormHooks::new()
        .from_form_parts("range", |parts| Ok(BoundValue::from(parts.len().to_string())))
        .from_form_with_errors("email", |value, errors| {
            if !value.contains('@') {
                errors.add("email", "is invalid");
            }
            Ok(value.into())
        })
        .on_destroy("avatar", |attributes| {
            attributes.shift_remove("name");
            Ok(())
        });

    let params: RawParams = form.pairs.into_iter().collect();
    let outcome = FormBinder::new(schema.as_ref(), &hooks)
        .bind(&params)
        .expect("no hook in this target fails");

    if form.assign {
        let mut record = MemoryRecord::new("Fuzz", Arc::clone(&schema));
        // Unknown attributes from hooks are expected; panics are not.
        let _ = assign_attributes(&mut record, outcome.attributes());
    }
});
