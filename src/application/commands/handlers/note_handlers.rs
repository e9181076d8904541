//! Note Command Handlers

use std::sync::Arc;

use crate::application::commands::{AddNote, DeleteNote};
use crate::application::error::ApplicationError;
use crate::application::ports::{Clock, NoteLedgerPort};
use crate::domain::notes::Note;

/// AddNote Handler
pub struct AddNoteHandler {
    ledger: Arc<dyn NoteLedgerPort>,
    clock: Arc<dyn Clock>,
}

impl AddNoteHandler {
    pub fn new(ledger: Arc<dyn NoteLedgerPort>, clock: Arc<dyn Clock>) -> Self {
        Self { ledger, clock }
    }

    pub async fn handle(&self, cmd: AddNote) -> Result<Note, ApplicationError> {
        let note = Note::new(cmd.verse_reference, cmd.content, self.clock.now())?;
        let note = self.ledger.add(note).await?;

        tracing::info!(
            note_id = %note.id,
            verse_reference = %note.verse_reference,
            "Note added"
        );
        Ok(note)
    }
}

/// DeleteNote Handler
pub struct DeleteNoteHandler {
    ledger: Arc<dyn NoteLedgerPort>,
}

impl DeleteNoteHandler {
    pub fn new(ledger: Arc<dyn NoteLedgerPort>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, cmd: DeleteNote) -> Result<Note, ApplicationError> {
        let note = self.ledger.delete(&cmd.id).await?;
        tracing::info!(note_id = %note.id, "Note deleted");
        Ok(note)
    }
}
