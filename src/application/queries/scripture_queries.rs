//! Scripture Queries - 经文浏览查询

/// 列出译本
#[derive(Debug, Clone)]
pub struct ListBibles;

/// 列出书卷
#[derive(Debug, Clone)]
pub struct ListBooks {
    pub bible_id: String,
}

/// 列出书卷的章节
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub bible_id: String,
    pub book_id: String,
}

/// 获取章节正文
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub bible_id: String,
    pub chapter_id: String,
    /// 书卷章数；用于在上游未给出相邻链接时推算下一章
    pub chapter_count: Option<u32>,
}

/// 列出章节经节
#[derive(Debug, Clone)]
pub struct ListVerses {
    pub bible_id: String,
    pub chapter_id: String,
}

/// 获取章节音频
#[derive(Debug, Clone)]
pub struct GetChapterAudio {
    pub bible_id: String,
    pub chapter_id: String,
}
