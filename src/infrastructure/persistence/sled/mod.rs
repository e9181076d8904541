//! Sled 存储实现

mod note_store;

pub use note_store::{SledNoteStore, SledNoteStoreConfig, NOTES_KEY};
