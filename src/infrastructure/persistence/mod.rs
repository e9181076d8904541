//! Persistence Layer - 数据持久化
//!
//! Sled 笔记存储实现

pub mod sled;

pub use self::sled::{SledNoteStore, SledNoteStoreConfig};
