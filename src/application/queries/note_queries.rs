//! Note Queries - 笔记查询

/// 列出笔记；`verse_reference` 为 `None` 时列出全部
#[derive(Debug, Clone, Default)]
pub struct ListNotes {
    pub verse_reference: Option<String>,
}
