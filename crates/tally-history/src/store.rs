//! Document files on disk and JSON Lines export of the audit timeline.
//!
//! A document is one pretty-printed JSON file. Saves go to a sibling temp
//! file first and are then renamed over the target, so a crash mid-write
//! leaves the previous version intact.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tally_core::document::CompanyDocument;
use tally_core::entities::AuditEvent;

use crate::error::HistoryError;

/// Loads and saves one [`CompanyDocument`] file.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and parse the document file.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] if the file cannot be read and
    /// [`HistoryError::Format`] if it is not a valid document.
    pub fn load(&self) -> Result<CompanyDocument, HistoryError> {
        let raw = std::fs::read_to_string(&self.path)?;
        let document: CompanyDocument = serde_json::from_str(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            events = document.audit_events.len(),
            "loaded document"
        );
        Ok(document)
    }

    /// Stamp `saved_at` and write the document.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Io`] if the parent directory, the temp file
    /// or the rename fails.
    pub fn save(&self, document: &mut CompanyDocument) -> Result<(), HistoryError> {
        document.saved_at = Some(Utc::now());
        let raw = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, raw)?;
        if let Err(error) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(error.into());
        }

        tracing::debug!(path = %self.path.display(), "saved document");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "document".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

/// Write the timeline to `path` as JSON Lines, oldest first. Overwrites.
///
/// # Errors
///
/// Returns [`HistoryError::Io`] if the file cannot be written.
pub fn export_trail(path: &Path, events: &[AuditEvent]) -> Result<usize, HistoryError> {
    serde_jsonlines::write_json_lines(path, events)?;
    Ok(events.len())
}

/// Read a timeline previously written by [`export_trail`].
///
/// # Errors
///
/// Returns [`HistoryError::Io`] if the file cannot be read or a line does
/// not parse as an event.
pub fn read_trail(path: &Path) -> Result<Vec<AuditEvent>, HistoryError> {
    let events = serde_jsonlines::json_lines(path)?.collect::<Result<Vec<AuditEvent>, _>>()?;
    Ok(events)
}
