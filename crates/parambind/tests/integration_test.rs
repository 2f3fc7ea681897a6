//! Integration tests for parambind.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use parambind::validation::ErrorOptions;
use parambind::{
    assign_attributes, AttributeSchema, BindError, BoundValue, ColumnType, ErrorLog, FormBinder,
    FormHooks, MemoryRecord, RawParams, Record, RequestParams, SaveOrchestrator,
};
use serde_json::json;

/// Build raw params from key/value pairs, keeping order.
fn raw(pairs: &[(&str, &str)]) -> RawParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn user_schema() -> AttributeSchema {
    AttributeSchema::new()
        .column_of("name", ColumnType::String)
        .column_of("active", ColumnType::Boolean)
        .column_of("birth_date", ColumnType::Date)
        .column_of("child_id", ColumnType::Integer)
        .setter("password")
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_composite_pass_through_without_hook() {
    let schema = user_schema();
    let hooks = FormHooks::new();
    let params = raw(&[
        ("birth_date(1i)", "1990"),
        ("birth_date(2i)", "5"),
        ("birth_date(3i)", "10"),
    ]);

    let outcome = FormBinder::new(&schema, &hooks).bind(&params).unwrap();

    let expected: Vec<(&str, BoundValue)> = vec![
        ("birth_date(1i)", "1990".into()),
        ("birth_date(2i)", "5".into()),
        ("birth_date(3i)", "10".into()),
    ];
    let actual: Vec<(&str, BoundValue)> = outcome
        .attributes()
        .iter()
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_boolean_column_coerced() {
    let schema = user_schema();
    let hooks = FormHooks::new();

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("active", "1")]))
        .unwrap();

    assert_eq!(outcome.attributes().len(), 1);
    assert_eq!(outcome.attributes()["active"], BoundValue::Bool(true));
}

#[test]
fn test_destroy_flag_clears_blank_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(None));
    let schema = user_schema();
    let hooks = {
        let calls = Arc::clone(&calls);
        let seen = Arc::clone(&seen);
        FormHooks::new().on_destroy("child_id", move |attributes| {
            calls.fetch_add(1, Ordering::SeqCst);
            *seen.lock().unwrap() = attributes.get("child_id").cloned();
            Ok(())
        })
    };

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("child_id(destroy)", "1"), ("child_id", "")]))
        .unwrap();

    assert_eq!(outcome.attributes().len(), 1);
    assert_eq!(outcome.attributes()["child_id"], BoundValue::Null);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*seen.lock().unwrap(), Some(BoundValue::Null));
}

#[test]
fn test_hook_reports_validation_error() {
    let schema = user_schema();
    let hooks = FormHooks::new().from_form_with_errors("name", |value, errors| {
        if value.chars().count() < 3 {
            errors.add("name", "too short");
        }
        Ok(value.into())
    });

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("name", "Al")]))
        .unwrap();

    assert!(!outcome.errors().is_empty());
    assert_eq!(outcome.errors().get("name").len(), 1);
    assert_eq!(outcome.errors().get("name")[0].message(), Some("too short"));
}

#[test]
fn test_failed_save_skips_after_save() {
    let after_calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = {
        let after_calls = Arc::clone(&after_calls);
        SaveOrchestrator::new().with_after_save(move |_: &mut MemoryRecord| {
            after_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    };
    let mut record =
        MemoryRecord::new("User", Arc::new(user_schema())).with_required(["name"]);

    assert!(!orchestrator.save(&mut record).unwrap());
    assert_eq!(after_calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Whole Parameter Binding
// =============================================================================

#[test]
fn test_boolean_values_other_than_one_and_zero_are_null() {
    let schema = user_schema();
    let hooks = FormHooks::new();

    for (input, expected) in [
        ("1", BoundValue::Bool(true)),
        ("0", BoundValue::Bool(false)),
        ("", BoundValue::Null),
        ("true", BoundValue::Null),
        (" 1", BoundValue::Null),
    ] {
        let outcome = FormBinder::new(&schema, &hooks)
            .bind(&raw(&[("active", input)]))
            .unwrap();
        assert_eq!(outcome.attributes()["active"], expected, "input {input:?}");
    }
}

#[test]
fn test_unknown_keys_are_dropped() {
    let schema = user_schema();
    let hooks = FormHooks::new();

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("name", "Ada"), ("is_admin", "1"), ("password", "s3cret")]))
        .unwrap();

    let keys: Vec<&String> = outcome.attributes().keys().collect();
    assert_eq!(keys, vec!["name", "password"]);
}

#[test]
fn test_value_hook_binds_key_without_setter() {
    let schema = user_schema();
    let hooks = FormHooks::new().from_form("tags", |value| {
        Ok(json!(value.split(',').map(str::trim).collect::<Vec<_>>()).into())
    });

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("tags", "a, b")]))
        .unwrap();

    assert_eq!(outcome.attributes()["tags"], BoundValue::Json(json!(["a", "b"])));
}

#[test]
fn test_hook_failure_aborts_bind() {
    let schema = user_schema();
    let hooks = FormHooks::new().from_form("name", |_| Err("lookup failed".into()));

    let err = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("name", "Ada")]))
        .unwrap_err();

    assert!(matches!(err, BindError::Hook { ref hook, .. } if hook == "name_from_form"));
    assert_eq!(err.to_string(), "Hook 'name_from_form' failed: lookup failed");
}

// =============================================================================
// Composite Parameter Binding
// =============================================================================

#[test]
fn test_parts_hook_receives_sub_map() {
    let schema = user_schema();
    let hooks = FormHooks::new().from_form_parts("birth_date", |parts| {
        let year = parts.get("birth_date(1i)").cloned().unwrap_or_default();
        Ok(BoundValue::Text(format!("year {year}")))
    });

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("birth_date(1i)", "1990"), ("birth_date(2i)", "5")]))
        .unwrap();

    assert_eq!(outcome.attributes().len(), 1);
    assert_eq!(outcome.attributes()["birth_date"], BoundValue::from("year 1990"));
}

#[test]
fn test_composite_without_setter_or_hook_dropped() {
    let schema = user_schema();
    let hooks = FormHooks::new();

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("expires_at(1i)", "2030")]))
        .unwrap();

    assert!(outcome.attributes().is_empty());
}

#[test]
fn test_bases_compared_literally() {
    let schema = AttributeSchema::new()
        .column_of("date", ColumnType::Date)
        .column_of("start_date", ColumnType::Date);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let hooks = {
        let seen = Arc::clone(&seen);
        FormHooks::new().from_form_parts("date", move |parts| {
            seen.lock().unwrap().extend(parts.keys().cloned());
            Ok(BoundValue::Null)
        })
    };

    FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("start_date(1i)", "2020"), ("date(1i)", "2021")]))
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["date(1i)".to_string()]);
}

// =============================================================================
// Destroy Flags
// =============================================================================

#[test]
fn test_destroy_flag_with_value_is_ignored() {
    let calls = Arc::new(AtomicUsize::new(0));
    let schema = user_schema();
    let hooks = {
        let calls = Arc::clone(&calls);
        FormHooks::new().on_destroy("name", move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    };

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("name(destroy)", "1"), ("name", "Ada")]))
        .unwrap();

    assert_eq!(outcome.attributes()["name"], BoundValue::from("Ada"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_destroy_flag_without_whole_value() {
    let schema = user_schema();
    let hooks = FormHooks::new();

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("child_id(destroy)", "1")]))
        .unwrap();

    assert_eq!(outcome.attributes()["child_id"], BoundValue::Null);
}

#[test]
fn test_destroy_hook_may_edit_other_attributes() {
    let schema = user_schema();
    let hooks = FormHooks::new().on_destroy("child_id", |attributes| {
        attributes.insert("name".to_string(), BoundValue::from("orphan"));
        Ok(())
    });

    let outcome = FormBinder::new(&schema, &hooks)
        .bind(&raw(&[("name", "Ada"), ("child_id(destroy)", "1"), ("child_id", " ")]))
        .unwrap();

    assert_eq!(outcome.attributes()["name"], BoundValue::from("orphan"));
    assert_eq!(outcome.attributes()["child_id"], BoundValue::Null);
}

// =============================================================================
// Error Log
// =============================================================================

#[test]
fn test_default_option_becomes_message() {
    let mut errors = ErrorLog::new();
    let mut options = ErrorOptions::new();
    options.insert("default".to_string(), json!("too young"));
    errors.add_with_options("age", None, options);

    let record = &errors.get("age")[0];
    assert_eq!(record.message(), Some("too young"));
    assert!(record.options().get("default").is_none());
    assert_eq!(record.options()["message"], json!("too young"));
}

#[test]
fn test_attributes_listed_once_in_first_insertion_order() {
    let mut errors = ErrorLog::new();
    errors.add("email", "is taken");
    errors.add("name", "is too short");
    errors.add("email", "is invalid");

    let attributes: Vec<&str> = errors.attributes().collect();
    assert_eq!(attributes, vec!["email", "name"]);
    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors.iter().collect::<Vec<_>>(),
        vec![
            ("email", Some("is taken")),
            ("email", Some("is invalid")),
            ("name", Some("is too short")),
        ]
    );
}

// =============================================================================
// Save Lifecycle
// =============================================================================

#[test]
fn test_before_save_runs_first_and_after_save_on_success() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let orchestrator = {
        let before = Arc::clone(&log);
        let after = Arc::clone(&log);
        SaveOrchestrator::new()
            .with_before_save(move |record: &mut MemoryRecord| {
                before
                    .lock()
                    .unwrap()
                    .push(format!("before persisted={}", record.is_persisted()));
                Ok(())
            })
            .with_after_save(move |record: &mut MemoryRecord| {
                after
                    .lock()
                    .unwrap()
                    .push(format!("after persisted={}", record.is_persisted()));
                Ok(())
            })
    };
    let mut record = MemoryRecord::new("User", Arc::new(user_schema()));

    assert!(orchestrator.save(&mut record).unwrap());
    assert_eq!(
        *log.lock().unwrap(),
        vec!["before persisted=false", "after persisted=true"]
    );
}

#[test]
fn test_bind_assign_save_round() {
    let schema = Arc::new(user_schema());
    let hooks = FormHooks::new();
    let outcome = FormBinder::new(schema.as_ref(), &hooks)
        .bind(&raw(&[
            ("name", "Ada"),
            ("active", "1"),
            ("birth_date(1i)", "1815"),
            ("birth_date(2i)", "12"),
            ("birth_date(3i)", "10"),
        ]))
        .unwrap();

    let mut record = MemoryRecord::new("User", Arc::clone(&schema)).with_required(["name"]);
    assign_attributes(&mut record, outcome.attributes()).unwrap();

    assert!(SaveOrchestrator::new().save(&mut record).unwrap());
    assert_eq!(record.get("name"), Some(&json!("Ada")));
    assert_eq!(record.get("active"), Some(&json!(true)));
    assert_eq!(record.get("birth_date"), Some(&json!("1815-12-10")));
}

#[test]
fn test_all_blank_date_parts_assign_null() {
    let schema = Arc::new(user_schema());
    let hooks = FormHooks::new();
    let outcome = FormBinder::new(schema.as_ref(), &hooks)
        .bind(&raw(&[
            ("birth_date(1i)", ""),
            ("birth_date(2i)", ""),
            ("birth_date(3i)", ""),
        ]))
        .unwrap();

    let mut record = MemoryRecord::new("User", schema).with_attribute("birth_date", "2000-01-01");
    assign_attributes(&mut record, outcome.attributes()).unwrap();

    assert_eq!(record.get("birth_date"), Some(&serde_json::Value::Null));
    assert!(record.save().unwrap());
}

// =============================================================================
// Request Parameters
// =============================================================================

#[test]
fn test_request_params_from_form_pairs() {
    let params = RequestParams::from_form_pairs([
        ("user[name]", "Ada"),
        ("user[birth_date(1i)]", "1990"),
        ("referer", "/users"),
    ])
    .unwrap();

    let user = params.model_params("user").unwrap();
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["birth_date(1i)"], "1990");
    assert_eq!(params.text("referer"), Some("/users"));
}

#[test]
fn test_missing_model_params() {
    let params = RequestParams::new().with_text("referer", "/users");
    let err = params.model_params("user").unwrap_err();
    assert!(matches!(err, BindError::MissingParams { ref model } if model == "user"));
}

#[test]
fn test_request_params_json() {
    let params: RequestParams = serde_json::from_value(json!({
        "user": {"name": "Ada", "active": "0"},
        "commit": "Save"
    }))
    .unwrap();

    assert_eq!(params.model_params("user").unwrap().len(), 2);
    assert_eq!(params.text("commit"), Some("Save"));
}
