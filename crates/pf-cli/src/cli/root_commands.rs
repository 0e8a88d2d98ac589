use clap::{Args, Subcommand};

use crate::cli::subcommands::{HistoryCommands, SchemaCommands, TemplateCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate a prompt document for a domain.
    Generate(GenerateArgs),
    /// Validate a JSON document against a domain schema.
    Validate(ValidateArgs),
    /// Schema registry.
    Schema {
        #[command(subcommand)]
        action: SchemaCommands,
    },
    /// Render templates and inspect their variables.
    Template {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Generation history.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
    /// List registered domains.
    Domains,
}

/// Arguments for `pforge generate`.
#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Domain name (chat, code, image, analysis or a plugin).
    #[arg(required_unless_present = "resume")]
    pub domain: Option<String>,
    /// What the prompt should accomplish.
    #[arg(required_unless_present = "resume")]
    pub task: Option<String>,
    /// Constraint to include; repeatable.
    #[arg(short = 'c', long = "constraint")]
    pub constraints: Vec<String>,
    /// Template variable as key=value; values that parse as JSON are used as JSON.
    #[arg(long = "var")]
    pub vars: Vec<String>,
    /// Schema version (defaults to the latest registered).
    #[arg(long)]
    pub schema_version: Option<String>,
    /// Skip repair of an invalid rendered document.
    #[arg(long)]
    pub no_repair: bool,
    /// Ask the configured LLM provider instead of rendering the template.
    #[arg(long)]
    pub ai: bool,
    /// Re-run the last autosaved input.
    #[arg(long, conflicts_with_all = ["domain", "task"])]
    pub resume: bool,
}

/// Arguments for `pforge validate`.
#[derive(Clone, Debug, Args)]
pub struct ValidateArgs {
    pub domain: String,
    /// JSON document path, or `-` for stdin.
    pub document: String,
    #[arg(long)]
    pub schema_version: Option<String>,
}
