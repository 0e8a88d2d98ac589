use clap::Subcommand;

/// Schema registry management.
#[derive(Clone, Debug, Subcommand)]
pub enum SchemaCommands {
    /// List schema names and their versions.
    List,
    /// Show one schema entry.
    Show {
        name: String,
        /// Version to show (defaults to the latest).
        #[arg(long)]
        schema_version: Option<String>,
    },
    /// Export the whole registry as a snapshot.
    Export {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Replace the registry with a snapshot file.
    Import { file: String },
    /// Check a user schema file against the safety allow-list.
    Check { file: String },
    /// Register a new schema version for an existing domain.
    Register {
        domain: String,
        version: String,
        /// JSON schema file.
        #[arg(long)]
        schema: String,
        /// Template file.
        #[arg(long)]
        template: String,
    },
}
