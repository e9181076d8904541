//! Sled-based Note Store Implementation
//!
//! 全部笔记以一个 JSON 数组存放在固定 key 下，每次整体覆盖

use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{NoteStorePort, StoreError};
use crate::domain::notes::Note;

/// 笔记存储 key
pub const NOTES_KEY: &str = "bibleNotes";

/// Sled 笔记存储配置
#[derive(Debug, Clone)]
pub struct SledNoteStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledNoteStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/notes.sled".to_string(),
        }
    }
}

/// Sled 笔记存储
pub struct SledNoteStore {
    db: Db,
}

impl SledNoteStore {
    /// 创建新的存储实例
    pub fn new(config: &SledNoteStoreConfig) -> Result<Self, StoreError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledNoteStore initialized");
        Ok(Self { db })
    }

    /// 打开现有存储
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::new(&SledNoteStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        })
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl NoteStorePort for SledNoteStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        let value = self
            .db
            .get(NOTES_KEY)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        match value {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::SerializationError(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(notes)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;

        self.db
            .insert(NOTES_KEY, bytes)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        self.db
            .flush_async()
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::debug!(count = notes.len(), "Notes saved");
        Ok(())
    }
}
