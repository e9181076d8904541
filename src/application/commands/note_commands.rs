//! Note Commands - 笔记写操作

/// 为经文引用添加笔记
#[derive(Debug, Clone)]
pub struct AddNote {
    pub verse_reference: String,
    pub content: String,
}

/// 删除笔记
#[derive(Debug, Clone)]
pub struct DeleteNote {
    pub id: String,
}
