//! Notes Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NoteError {
    #[error("笔记内容不能为空")]
    EmptyContent,

    #[error("经文引用不能为空")]
    EmptyReference,

    #[error("笔记不存在: {0}")]
    NotFound(String),
}
