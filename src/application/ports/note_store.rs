//! Note Store Ports - 笔记持久化
//!
//! - NoteStorePort: 单个固定 key 下的整体 JSON 读写
//! - NoteLedgerPort: 启动时读入一次，增删时整体回写的内存笔记本

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notes::{Note, NoteError};

/// 笔记存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Note(#[from] NoteError),
}

/// 底层键值存储
#[async_trait]
pub trait NoteStorePort: Send + Sync {
    /// 读取全部笔记；从未写入过时返回空列表
    async fn load(&self) -> Result<Vec<Note>, StoreError>;

    /// 整体覆盖写入
    async fn save(&self, notes: &[Note]) -> Result<(), StoreError>;
}

/// 笔记本
#[async_trait]
pub trait NoteLedgerPort: Send + Sync {
    /// 按插入顺序列出；`verse_reference` 为 `None` 时返回全部
    async fn list(&self, verse_reference: Option<&str>) -> Vec<Note>;

    async fn add(&self, note: Note) -> Result<Note, StoreError>;

    async fn delete(&self, id: &str) -> Result<Note, StoreError>;
}
