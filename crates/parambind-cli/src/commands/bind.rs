//! Bind command - print the attributes a submission binds to.

use colored::Colorize;
use parambind::{FormBinder, FormHooks};

use super::{format_value, load_input, print_errors};
use crate::cli::InputArgs;

pub fn run(input: InputArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, params) = load_input(&input)?;
    let raw = params.model_params(&config.model_key())?;

    let hooks = FormHooks::new();
    let outcome = FormBinder::new(&config.schema, &hooks).bind(raw)?;

    if input.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Bound attributes for".cyan().bold(),
        config.model.white()
    );
    if outcome.attributes().is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (name, value) in outcome.attributes() {
        println!("  {} = {}", name, format_value(value));
    }

    if verbose {
        let dropped: Vec<&String> = raw
            .keys()
            .filter(|key| !outcome.attributes().contains_key(key.as_str()))
            .filter(|key| !key.ends_with("(destroy)"))
            .collect();
        if !dropped.is_empty() {
            println!();
            println!("{}", "Dropped (no setter):".yellow().bold());
            for key in dropped {
                println!("  {}", key.dimmed());
            }
        }
    }

    println!();
    print_errors(outcome.errors());
    Ok(())
}
