//! Example: Bind and save a user form submission.
//!
//! Usage:
//!   cargo run --example edit_user

use parambind::{
    AttributeSchema, BoundValue, ColumnType, Destination, FormHooks, MemoryRecord, RecordEditor,
    RequestParams, ResourceConfig,
};

fn main() -> parambind::Result<()> {
    let schema = AttributeSchema::new()
        .column_of("name", ColumnType::String)
        .column_of("email", ColumnType::String)
        .column_of("active", ColumnType::Boolean)
        .column_of("birth_date", ColumnType::Date)
        .column_of("avatar", ColumnType::String)
        .setter("password");
    let config = ResourceConfig::new("User", schema);

    let editor: RecordEditor<MemoryRecord> = RecordEditor::new(config)
        .with_hooks(FormHooks::new().from_form_with_errors("email", |value, errors| {
            if !value.contains('@') {
                errors.add("email", "is not an email address");
            }
            Ok(BoundValue::from(value.trim().to_lowercase()))
        }))
        .with_destination_after_save(|record: &MemoryRecord, _| {
            record.id().map(|id| Destination::Url(format!("/users/{id}")))
        });

    let params = RequestParams::from_form_pairs([
        ("user[name]", "Ada Lovelace"),
        ("user[email]", " Ada@Example.org "),
        ("user[active]", "1"),
        ("user[birth_date(1i)]", "1815"),
        ("user[birth_date(2i)]", "12"),
        ("user[birth_date(3i)]", "10"),
        ("user[avatar(destroy)]", "1"),
        ("user[avatar]", ""),
        ("user[is_admin]", "1"),
        ("referer", "/users"),
    ])?;

    let mut record = MemoryRecord::new("User", editor.schema()).with_required(["name"]);
    let outcome = editor.submit(&mut record, &params)?;

    println!("Bound attributes:");
    for (name, value) in &outcome.attributes {
        println!("  {} = {}", name, value.to_json());
    }
    println!();

    if outcome.saved {
        println!("Saved user #{}", record.id().unwrap_or_default());
        for (name, value) in record.attributes() {
            println!("  {} = {}", name, value);
        }
    } else {
        println!("Not saved:");
        for message in outcome.errors.full_messages() {
            println!("  - {}", message);
        }
        for message in record.errors().full_messages() {
            println!("  - {}", message);
        }
    }

    if let Some(destination) = outcome.destination {
        println!();
        println!("Redirect to {}", destination);
    }

    Ok(())
}
