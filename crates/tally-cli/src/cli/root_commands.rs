use clap::Subcommand;

use crate::cli::subcommands::HistoryCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Summarize the document: record counts, timeline size, reversible events.
    Status,
    /// Inspect and operate on the audit timeline.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
}
