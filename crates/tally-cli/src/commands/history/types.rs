use serde::Serialize;
use tally_history::AuditFilter;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{TableRow, output_rows};

#[derive(Debug, Serialize)]
struct TypeRow {
    entity_type: String,
    events: usize,
    /// Events of this type can be rebuilt into actions.
    supported: bool,
}

impl TableRow for TypeRow {
    const HEADERS: &'static [&'static str] = &["type", "events", "supported"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.entity_type.clone(),
            self.events.to_string(),
            String::from(if self.supported { "yes" } else { "no" }),
        ]
    }
}

pub fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let audit = ctx.journal.audit();
    let rows = audit
        .entity_types()
        .into_iter()
        .map(|entity_type| {
            let filter = AuditFilter {
                entity_type: Some(entity_type.clone()),
                ..AuditFilter::default()
            };
            TypeRow {
                events: audit.filter(&filter).len(),
                supported: ctx.journal.locator().supports(&entity_type),
                entity_type,
            }
        })
        .collect::<Vec<_>>();
    output_rows(&rows, flags.format)
}
