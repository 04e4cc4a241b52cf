use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Undo,
    Redo,
}

#[derive(Debug, Serialize)]
struct SelectiveResponse {
    event_id: String,
    meta_event_id: String,
    description: String,
    saved_to: String,
}

/// Selectively undo or redo one event, then save the document.
pub fn run(
    id: &str,
    direction: Direction,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = apply(id, direction, ctx)?;
    output(&response, flags.format)
}

fn apply(id: &str, direction: Direction, ctx: &mut AppContext) -> anyhow::Result<SelectiveResponse> {
    let meta = match direction {
        Direction::Undo => ctx
            .journal
            .undo_event(&mut ctx.document, id)
            .with_context(|| format!("cannot undo event '{id}'"))?,
        Direction::Redo => ctx
            .journal
            .redo_event(&mut ctx.document, id)
            .with_context(|| format!("cannot redo event '{id}'"))?,
    };
    ctx.save()?;
    tracing::info!(event = id, meta = %meta.id, "applied {}", meta.description);

    Ok(SelectiveResponse {
        event_id: id.to_string(),
        meta_event_id: meta.id,
        description: meta.description,
        saved_to: ctx.store.path().display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tally_config::TallyConfig;
    use tally_core::document::CompanyDocument;
    use tally_core::entities::Department;
    use tally_core::enums::AuditEventKind;
    use tally_history::{DocumentStore, EntityLocator, Journal};

    use super::{Direction, apply};
    use crate::cli::{GlobalFlags, OutputFormat};
    use crate::context::AppContext;

    fn flags(document: &Path) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            document: Some(document.to_path_buf()),
        }
    }

    /// Save a document whose timeline adds two departments.
    fn seed(path: &Path) -> Vec<String> {
        let mut doc = CompanyDocument::new("Acme Books");
        let mut journal = Journal::new(EntityLocator::for_company(), &TallyConfig::default());
        for (id, name) in [("dep-00000001", "Sales"), ("dep-00000002", "Ops")] {
            let department = Department {
                id: id.to_string(),
                name: name.to_string(),
                description: None,
            };
            journal.add_record(&mut doc, department).unwrap();
        }
        journal.sync_to_document(&mut doc);
        DocumentStore::new(path).save(&mut doc).unwrap();
        doc.audit_events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn undo_then_redo_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        let ids = seed(&path);
        let config = TallyConfig::default();

        let mut ctx = AppContext::open(&config, &flags(&path)).unwrap();
        let response = apply(&ids[0], Direction::Undo, &mut ctx).unwrap();
        assert_eq!(response.description, "Undid: Add Department 'Sales'");
        assert!(!ctx.journal.has_unsaved_changes());

        let saved = DocumentStore::new(&path).load().unwrap();
        let names: Vec<_> = saved.departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Ops"]);
        assert_eq!(saved.audit_events.len(), 3);
        assert!(saved.audit_events[0].is_undone);
        assert_eq!(saved.audit_events[2].kind, AuditEventKind::Undone);

        let mut ctx = AppContext::open(&config, &flags(&path)).unwrap();
        apply(&ids[0], Direction::Redo, &mut ctx).unwrap();
        let saved = DocumentStore::new(&path).load().unwrap();
        assert_eq!(saved.departments.len(), 2);
        assert!(!saved.audit_events[0].is_undone);
    }

    #[test]
    fn unknown_event_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        seed(&path);
        let before = std::fs::read_to_string(&path).unwrap();

        let mut ctx = AppContext::open(&TallyConfig::default(), &flags(&path)).unwrap();
        let err = apply("evt-missing", Direction::Undo, &mut ctx).expect_err("should fail");

        assert!(format!("{err:#}").contains("cannot undo event 'evt-missing'"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn missing_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = AppContext::open(&TallyConfig::default(), &flags(&path))
            .err()
            .expect("open should fail");
        assert!(err.to_string().contains("does not exist"));
    }
}
