//! Save command - bind onto an in-memory record and save it.

use colored::Colorize;
use indexmap::IndexMap;
use parambind::{MemoryRecord, RecordEditor};

use super::{load_input, print_errors};
use crate::cli::InputArgs;

pub fn run(
    input: InputArgs,
    require: Vec<String>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, params) = load_input(&input)?;
    let model = config.model.clone();

    let editor: RecordEditor<MemoryRecord> = RecordEditor::new(config);
    let mut record = MemoryRecord::new(model.clone(), editor.schema()).with_required(require);
    let outcome = editor.submit(&mut record, &params)?;

    if input.json {
        let output = serde_json::json!({
            "outcome": outcome,
            "record": record,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let status = if outcome.saved {
        "saved".green().bold()
    } else {
        "not saved".red().bold()
    };
    println!("{} {}: {}", model.white().bold(), "record".cyan(), status);
    if let Some(id) = record.id() {
        println!("  id: {}", id);
    }
    println!();

    println!("{}", "Attributes:".yellow().bold());
    let attributes: &IndexMap<String, serde_json::Value> = record.attributes();
    if attributes.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (name, value) in attributes {
        println!("  {} = {}", name, value);
    }
    println!();

    print_errors(&outcome.errors);
    print_errors(record.errors());

    if let Some(destination) = &outcome.destination {
        println!("{} {}", "Redirect to".cyan(), destination.to_string().white());
    }
    Ok(())
}
