//! Notes Context - 经文笔记上下文

mod collection;
mod errors;

pub use collection::{Note, NoteCollection};
pub use errors::NoteError;
