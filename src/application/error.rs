//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{FetchError, PlaybackSessionError, StoreError};
use crate::domain::notes::NoteError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 外部服务错误（经文 API）
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

impl From<FetchError> for ApplicationError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Provider { status: 404 } => {
                Self::ExternalServiceError("Scripture resource not found upstream".to_string())
            }
            other => Self::ExternalServiceError(other.to_string()),
        }
    }
}

impl From<NoteError> for ApplicationError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound(id) => Self::not_found("Note", id),
            other => Self::ValidationError(other.to_string()),
        }
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Note(note_err) => note_err.into(),
            other => Self::StorageError(other.to_string()),
        }
    }
}

impl From<PlaybackSessionError> for ApplicationError {
    fn from(err: PlaybackSessionError) -> Self {
        match err {
            PlaybackSessionError::NotFound(id) => Self::not_found("Playback session", id),
            PlaybackSessionError::Playback(e) => Self::invalid_state(e.to_string()),
        }
    }
}
