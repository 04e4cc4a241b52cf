#[path = "history/export.rs"]
mod export;
#[path = "history/list.rs"]
mod list;
#[path = "history/show.rs"]
mod show;
#[path = "history/types.rs"]
mod types;
#[path = "history/undo.rs"]
mod undo;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HistoryCommands;
use crate::context::AppContext;

/// Handle `tally history`.
pub fn handle(
    action: &HistoryCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HistoryCommands::List {
            kind,
            entity_type,
            entity_id,
            search,
            since,
            until,
            limit,
        } => {
            let args = list::ListArgs {
                kind: kind.as_deref(),
                entity_type: entity_type.as_deref(),
                entity_id: entity_id.as_deref(),
                search: search.as_deref(),
                since: since.as_deref(),
                until: until.as_deref(),
                limit: *limit,
            };
            list::run(&args, ctx, flags)
        }
        HistoryCommands::Types => types::run(ctx, flags),
        HistoryCommands::Show { id } => show::run(id, ctx, flags),
        HistoryCommands::Undo { id } => undo::run(id, undo::Direction::Undo, ctx, flags),
        HistoryCommands::Redo { id } => undo::run(id, undo::Direction::Redo, ctx, flags),
        HistoryCommands::Export { path } => export::run(path, ctx, flags),
    }
}
