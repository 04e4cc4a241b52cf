use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tally_core::entities::AuditEvent;
use tally_history::export_trail;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportResponse {
    path: String,
    events: usize,
}

pub fn run(path: &Path, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let events = ctx.journal.audit().events().cloned().collect::<Vec<AuditEvent>>();
    let written = export_trail(path, &events)
        .with_context(|| format!("failed to export timeline to '{}'", path.display()))?;
    tracing::info!(path = %path.display(), events = written, "exported timeline");

    output(
        &ExportResponse {
            path: path.display().to_string(),
            events: written,
        },
        flags.format,
    )
}
