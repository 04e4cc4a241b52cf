use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_core::entities::AuditEvent;
use tally_core::enums::AuditEventKind;
use tally_history::AuditFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{DayBound, parse_kind, parse_timestamp};
use crate::context::AppContext;
use crate::output::{TableRow, output_rows};

/// Borrowed `history list` arguments.
#[derive(Debug, Default)]
pub struct ListArgs<'a> {
    pub kind: Option<&'a str>,
    pub entity_type: Option<&'a str>,
    pub entity_id: Option<&'a str>,
    pub search: Option<&'a str>,
    pub since: Option<&'a str>,
    pub until: Option<&'a str>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EventRow {
    id: String,
    timestamp: DateTime<Utc>,
    kind: AuditEventKind,
    entity_type: String,
    entity_id: String,
    entity_name: String,
    description: String,
    is_undone: bool,
    /// Selective undo or redo is possible this session.
    reversible: bool,
}

impl EventRow {
    fn new(event: &AuditEvent, reversible: bool) -> Self {
        Self {
            id: event.id.clone(),
            timestamp: event.timestamp,
            kind: event.kind,
            entity_type: event.entity_type.clone(),
            entity_id: event.entity_id.clone(),
            entity_name: event.entity_name.clone(),
            description: event.description.clone(),
            is_undone: event.is_undone,
            reversible,
        }
    }
}

impl TableRow for EventRow {
    const HEADERS: &'static [&'static str] =
        &["id", "when", "kind", "type", "name", "undone", "reversible", "description"];

    fn cells(&self) -> Vec<String> {
        let flag = |value: bool| String::from(if value { "yes" } else { "no" });
        vec![
            self.id.clone(),
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.kind.to_string(),
            self.entity_type.clone(),
            self.entity_name.clone(),
            flag(self.is_undone),
            flag(self.reversible),
            self.description.clone(),
        ]
    }
}

pub fn run(args: &ListArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args, ctx.config.general.default_limit)?;
    let audit = ctx.journal.audit();
    let rows = audit
        .filter(&filter)
        .into_iter()
        .map(|event| EventRow::new(event, audit.has_action(&event.id)))
        .collect::<Vec<_>>();
    output_rows(&rows, flags.format)
}

fn build_filter(args: &ListArgs<'_>, default_limit: u32) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        kind: args.kind.map(parse_kind).transpose()?,
        entity_type: args.entity_type.map(str::to_string),
        entity_id: args.entity_id.map(str::to_string),
        text: args.search.map(str::to_string),
        since: args
            .since
            .map(|raw| parse_timestamp(raw, DayBound::Start, "since"))
            .transpose()?,
        until: args
            .until
            .map(|raw| parse_timestamp(raw, DayBound::End, "until"))
            .transpose()?,
        limit: Some(effective_limit(args.limit, default_limit)),
    })
}
