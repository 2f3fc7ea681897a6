//! Classify command - show how form keys are bucketed.

use colored::Colorize;
use parambind::bind::group_by_base;
use parambind::ParamBuckets;

use super::load_input;
use crate::cli::InputArgs;

pub fn run(input: InputArgs, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (config, params) = load_input(&input)?;
    let model_key = config.model_key();
    let raw = params.model_params(&model_key)?;
    let buckets = ParamBuckets::classify(raw);

    if input.json {
        let output = serde_json::json!({
            "model": config.model,
            "model_key": model_key,
            "composite": buckets.composite(),
            "destroy": buckets.destroy(),
            "whole": buckets.whole(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({} keys)",
        "Parameters for".cyan().bold(),
        config.model.white(),
        buckets.len()
    );
    println!();

    let groups = group_by_base(buckets.composite());
    println!("{}", "Composite:".yellow().bold());
    if groups.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (base, parts) in &groups {
        println!("  {}", base.white().bold());
        for (key, value) in parts {
            println!("    {} = {:?}", key, value);
        }
    }
    println!();

    println!("{}", "Destroy:".yellow().bold());
    if buckets.destroy().is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for name in buckets.destroy().keys() {
        let state = if buckets.whole_is_blank(name) {
            "clears".red()
        } else {
            "ignored, value submitted".dimmed()
        };
        println!("  {} ({})", name, state);
    }
    println!();

    println!("{}", "Whole:".yellow().bold());
    if buckets.whole().is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (key, value) in buckets.whole() {
        println!("  {} = {:?}", key, value);
    }

    Ok(())
}
