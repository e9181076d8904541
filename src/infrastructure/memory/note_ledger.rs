//! In-Memory Note Ledger Implementation
//!
//! 启动时从存储读入一次；每次增删后把完整列表写回存储。
//! 写回失败时内存状态回滚，保证两边一致。

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::ports::{NoteLedgerPort, NoteStorePort, StoreError};
use crate::domain::notes::{Note, NoteCollection};

/// 内存笔记本
pub struct InMemoryNoteLedger {
    notes: Mutex<NoteCollection>,
    store: Arc<dyn NoteStorePort>,
}

impl InMemoryNoteLedger {
    /// 从存储加载全部笔记
    pub async fn load(store: Arc<dyn NoteStorePort>) -> Result<Self, StoreError> {
        let notes = store.load().await?;
        tracing::info!(count = notes.len(), "Notes loaded");
        Ok(Self {
            notes: Mutex::new(NoteCollection::new(notes)),
            store,
        })
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl NoteLedgerPort for InMemoryNoteLedger {
    async fn list(&self, verse_reference: Option<&str>) -> Vec<Note> {
        self.notes.lock().await.for_reference(verse_reference)
    }

    async fn add(&self, note: Note) -> Result<Note, StoreError> {
        let mut notes = self.notes.lock().await;
        let mut updated = notes.clone();
        updated.add(note.clone());

        self.store.save(updated.as_slice()).await?;
        *notes = updated;

        tracing::debug!(count = notes.len(), "Note ledger persisted after add");
        Ok(note)
    }

    async fn delete(&self, id: &str) -> Result<Note, StoreError> {
        let mut notes = self.notes.lock().await;
        let mut updated = notes.clone();
        let removed = updated.delete(id)?;

        self.store.save(updated.as_slice()).await?;
        *notes = updated;

        tracing::debug!(count = notes.len(), "Note ledger persisted after delete");
        Ok(removed)
    }
}
