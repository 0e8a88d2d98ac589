use clap::Subcommand;

/// Generation history.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// List recent generations, newest first.
    List {
        /// Max records to show.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Remove all history records.
    Clear,
}
