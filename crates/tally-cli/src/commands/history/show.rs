use serde::Serialize;
use tally_core::entities::AuditEvent;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct EventDetail<'a> {
    #[serde(flatten)]
    event: &'a AuditEvent,
    can_undo: bool,
    can_redo: bool,
}

pub fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let event = ctx
        .journal
        .audit()
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("event '{id}' is not in the timeline"))?;
    let detail = EventDetail {
        event,
        can_undo: ctx.journal.can_undo_event(id),
        can_redo: ctx.journal.can_redo_event(id),
    };
    output(&detail, flags.format)
}
