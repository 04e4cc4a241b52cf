use std::path::PathBuf;

use clap::Subcommand;

/// Audit timeline commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// List events, newest first.
    List {
        /// added, modified, deleted, undone or redone
        #[arg(long)]
        kind: Option<String>,
        /// Entity type tag or label, e.g. `purchase_order` or "Purchase Order"
        #[arg(long = "type")]
        entity_type: Option<String>,
        #[arg(long)]
        entity_id: Option<String>,
        /// Case-insensitive text in the description, name or ID
        #[arg(long)]
        search: Option<String>,
        /// RFC 3339 timestamp or YYYY-MM-DD (inclusive)
        #[arg(long)]
        since: Option<String>,
        /// RFC 3339 timestamp or YYYY-MM-DD (inclusive)
        #[arg(long)]
        until: Option<String>,
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Entity types that appear in the timeline.
    Types,
    /// Show one event in full.
    Show { id: String },
    /// Selectively undo one event and save the document.
    Undo { id: String },
    /// Selectively redo one undone event and save the document.
    Redo { id: String },
    /// Write the timeline to a JSON Lines file.
    Export { path: PathBuf },
}
