//! Scripture Context - 经文浏览上下文
//!
//! 译本、书卷、章节与章节音频的领域模型

mod audio;
mod entities;
mod value_objects;

pub use audio::{AudioSection, ChapterAudio};
pub use entities::{Bible, BibleLanguage, Book, Chapter, ChapterContent, ChapterLink, VerseSummary};
pub use value_objects::{ChapterId, ChapterIdError};
