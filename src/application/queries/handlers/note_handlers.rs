//! Note Query Handlers

use std::sync::Arc;

use crate::application::ports::NoteLedgerPort;
use crate::application::queries::ListNotes;
use crate::domain::notes::Note;

/// ListNotes Handler
pub struct ListNotesHandler {
    ledger: Arc<dyn NoteLedgerPort>,
}

impl ListNotesHandler {
    pub fn new(ledger: Arc<dyn NoteLedgerPort>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, query: ListNotes) -> Vec<Note> {
        let reference = query
            .verse_reference
            .as_deref()
            .filter(|r| !r.trim().is_empty());
        self.ledger.list(reference).await
    }
}
