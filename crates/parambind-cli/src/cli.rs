//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// parambind: bind form parameters against a resource schema
#[derive(Parser)]
#[command(name = "parambind")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where the resource definition and submitted parameters come from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Path to the resource file (JSON: model, schema, views)
    #[arg(value_name = "RESOURCE")]
    pub resource: PathBuf,

    /// JSON file with request parameters, e.g. {"user": {"name": "Ada"}}
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Form pair such as 'user[birth_date(1i)]=1990' (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how submitted keys are sorted into composite, destroy and whole buckets
    Classify {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Bind parameters and print the resulting attributes and errors
    Bind {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Bind, assign and save onto an in-memory record
    Save {
        #[command(flatten)]
        input: InputArgs,

        /// Attribute that must be present and non-blank (repeatable)
        #[arg(long, value_name = "ATTRIBUTE")]
        require: Vec<String>,
    },
}
