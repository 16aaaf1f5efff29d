//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Physical-functional and geriatric assessments from the terminal
#[derive(Parser, Debug)]
#[command(name = "gerifit")]
#[command(version)]
#[command(about = "Record, classify, and export geriatric physical-functional assessments", long_about = None)]
pub struct Args {
    /// Configuration file path (platform config directory by default)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill in an assessment, show live classifications, and save it
    Intake {
        /// Start from an assessment stored as JSON
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,

        /// Start from a saved assessment; the result is saved as a new record
        #[arg(long, value_name = "ID", conflicts_with = "from")]
        from_record: Option<String>,

        /// Set a field, e.g. --set weight_kg=85 (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        edits: Vec<String>,

        /// Print feedback without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// List saved assessments, newest first
    List,

    /// Show one saved assessment with its classifications
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Write the printable report of a saved assessment
    Export {
        #[arg(value_name = "ID")]
        id: String,

        /// Output directory (current directory by default)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Print the report as Markdown instead of writing a DOCX file
        #[arg(long)]
        markdown: bool,
    },

    /// Ask the language model for a narrative summary
    Analyze {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Classify a single value with one rule
    Classify {
        /// Rule id: bmi, tug, handgrip, sit_to_stand, katz, lawton, two_min_step
        #[arg(value_name = "RULE")]
        rule: String,

        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        value: f64,

        /// male or female (handgrip, two_min_step)
        #[arg(long)]
        gender: Option<String>,

        /// Age in whole years (two_min_step)
        #[arg(long, default_value_t = 0)]
        age: u32,
    },

    /// Display or change the configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Display the effective configuration with secrets redacted (default)
    Show,

    /// Write a configuration file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Change one setting and save the file
    Set {
        /// data_file, logo_path, clinic_name, clinic_subtitle, model, api_key_env, or base_url
        #[arg(value_name = "KEY")]
        key: String,

        #[arg(value_name = "VALUE")]
        value: String,
    },
}
