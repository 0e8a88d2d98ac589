use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `pforge` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pforge",
    version,
    about = "Promptforge - schema-validated prompt generation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for history, autosave and the schema registry
    /// (defaults to `storage.data_dir` from config)
    #[arg(short, long, global = true)]
    pub data_dir: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            data_dir: self.data_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{HistoryCommands, SchemaCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["pforge", "--format", "raw", "--verbose", "domains"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Domains));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["pforge", "history", "list", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::History {
                action: HistoryCommands::List { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["pforge", "--format", "table", "domains"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn generate_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "pforge",
            "generate",
            "code",
            "Write a parser",
            "-c",
            "No unsafe",
            "-c",
            "Document public items",
            "--var",
            "language=rust",
            "--var",
            "include_tests=true",
            "--no-repair",
        ])
        .expect("cli should parse");

        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.domain.as_deref(), Some("code"));
        assert_eq!(args.constraints, vec!["No unsafe", "Document public items"]);
        assert_eq!(args.vars, vec!["language=rust", "include_tests=true"]);
        assert!(args.no_repair);
        assert!(!args.ai);
    }

    #[test]
    fn generate_requires_domain_unless_resuming() {
        assert!(Cli::try_parse_from(["pforge", "generate"]).is_err());
        let cli = Cli::try_parse_from(["pforge", "generate", "--resume"])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Generate(ref args) if args.resume));
    }

    #[test]
    fn schema_show_accepts_version() {
        let cli = Cli::try_parse_from(["pforge", "schema", "show", "chat", "--schema-version", "v1"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Schema {
                action: SchemaCommands::Show { ref name, schema_version: Some(ref v) }
            } if name == "chat" && v == "v1"
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["pforge", "--data-dir", "/tmp/forge", "domains"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.data_dir.as_deref(), Some("/tmp/forge"));
    }
}
