//! CLI command implementations.

pub mod bind;
pub mod classify;
pub mod save;

use std::fs;

use colored::Colorize;
use parambind::{BoundValue, ErrorLog, RequestParams, ResourceConfig};
use tracing::debug;

use crate::cli::InputArgs;

/// Load the resource file and merge request parameters from `--params`
/// and `--param` pairs, in that order.
pub fn load_input(
    input: &InputArgs,
) -> Result<(ResourceConfig, RequestParams), Box<dyn std::error::Error>> {
    let config = ResourceConfig::load(&input.resource)?;

    let mut params = match &input.params {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
            serde_json::from_str::<RequestParams>(&json)?
        }
        None => RequestParams::new(),
    };

    for pair in &input.pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid --param '{}': expected KEY=VALUE", pair))?;
        params.insert_form_pair(key, value)?;
    }

    debug!(
        resource = %input.resource.display(),
        model = %config.model,
        pairs = input.pairs.len(),
        "loaded request input"
    );

    Ok((config, params))
}

pub fn format_value(value: &BoundValue) -> String {
    match value {
        BoundValue::Null => "null".dimmed().to_string(),
        BoundValue::Bool(b) => b.to_string().cyan().to_string(),
        BoundValue::Text(s) => format!("{:?}", s).green().to_string(),
        other => other.to_json().to_string().blue().to_string(),
    }
}

pub fn print_errors(errors: &ErrorLog) {
    if errors.is_empty() {
        return;
    }
    println!("{}", "Errors:".red().bold());
    for message in errors.full_messages() {
        println!("  {} {}", "✗".red(), message);
    }
}
