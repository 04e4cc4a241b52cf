use anyhow::Context;
use tally_config::TallyConfig;
use tally_core::document::CompanyDocument;
use tally_history::{DocumentStore, EntityLocator, Journal};

use crate::cli::GlobalFlags;
use crate::context::resolve_document_path;

/// One opened document with its history engine.
pub struct AppContext {
    pub config: TallyConfig,
    pub store: DocumentStore,
    pub document: CompanyDocument,
    pub journal: Journal<CompanyDocument>,
}

impl AppContext {
    /// Load the document and rebuild whatever actions its timeline allows.
    pub fn open(config: &TallyConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let path = resolve_document_path(flags.document.as_deref(), config)?;
        let store = DocumentStore::new(path);
        if !store.exists() {
            anyhow::bail!("document '{}' does not exist", store.path().display());
        }

        let document = store
            .load()
            .with_context(|| format!("failed to load document '{}'", store.path().display()))?;
        let journal = Journal::open(&document, EntityLocator::for_company(), config);
        tracing::debug!(
            path = %store.path().display(),
            events = journal.audit().len(),
            "opened document"
        );

        Ok(Self {
            config: config.clone(),
            store,
            document,
            journal,
        })
    }

    /// Write the timeline back into the document and save it to disk.
    pub fn save(&mut self) -> anyhow::Result<()> {
        self.journal.sync_to_document(&mut self.document);
        self.store
            .save(&mut self.document)
            .with_context(|| format!("failed to save document '{}'", self.store.path().display()))?;
        self.journal.mark_saved();
        Ok(())
    }
}
