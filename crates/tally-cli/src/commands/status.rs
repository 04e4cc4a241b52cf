use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusResponse {
    name: String,
    path: String,
    saved_at: Option<DateTime<Utc>>,
    records: usize,
    events: usize,
    max_events: usize,
    /// Events with an action this session.
    reversible: usize,
    undone: usize,
}

/// Handle `tally status`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let audit = ctx.journal.audit();
    let response = StatusResponse {
        name: ctx.document.name.clone(),
        path: ctx.store.path().display().to_string(),
        saved_at: ctx.document.saved_at,
        records: ctx.document.record_count(),
        events: audit.len(),
        max_events: audit.max_events(),
        reversible: audit.events().filter(|e| audit.has_action(&e.id)).count(),
        undone: audit.events().filter(|e| e.is_undone).count(),
    };
    output(&response, flags.format)
}
