//! Notes Context - 笔记集合
//!
//! 笔记按插入顺序保存；持久化时整体写出

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NoteError;

/// 附加在经文引用上的个人笔记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub verse_reference: String,
    pub content: String,
    /// RFC 3339 时间戳
    pub created_at: String,
}

impl Note {
    /// 创建新笔记，拒绝空白内容或空白引用
    pub fn new(
        verse_reference: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, NoteError> {
        let verse_reference = verse_reference.into();
        let content = content.into();
        if verse_reference.trim().is_empty() {
            return Err(NoteError::EmptyReference);
        }
        if content.trim().is_empty() {
            return Err(NoteError::EmptyContent);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            verse_reference,
            content,
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// 有序笔记集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn add(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// 删除指定 id，其余笔记保持原有顺序
    pub fn delete(&mut self, id: &str) -> Result<Note, NoteError> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
        Ok(self.notes.remove(index))
    }

    /// 指定引用下的笔记；`None` 返回全部
    pub fn for_reference(&self, verse_reference: Option<&str>) -> Vec<Note> {
        match verse_reference {
            Some(reference) => self
                .notes
                .iter()
                .filter(|n| n.verse_reference == reference)
                .cloned()
                .collect(),
            None => self.notes.clone(),
        }
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(reference: &str, content: &str) -> Note {
        Note::new(reference, content, Utc::now()).unwrap()
    }

    #[test]
    fn test_new_note_rejects_blank_input() {
        assert_eq!(
            Note::new("John 1", "   ", Utc::now()).unwrap_err(),
            NoteError::EmptyContent
        );
        assert_eq!(
            Note::new("", "grace", Utc::now()).unwrap_err(),
            NoteError::EmptyReference
        );
    }

    #[test]
    fn test_delete_keeps_order_of_others() {
        let a = note("John 1", "a");
        let b = note("John 1", "b");
        let c = note("John 2", "c");
        let mut notes = NoteCollection::new(vec![a.clone(), b.clone(), c.clone()]);

        let removed = notes.delete(&b.id).unwrap();
        assert_eq!(removed.id, b.id);
        assert_eq!(notes.as_slice(), &[a, c]);
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut notes = NoteCollection::new(vec![note("John 1", "a")]);
        assert_eq!(
            notes.delete("missing").unwrap_err(),
            NoteError::NotFound("missing".to_string())
        );
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_filter_by_reference() {
        let mut notes = NoteCollection::default();
        notes.add(note("John 1", "a"));
        notes.add(note("John 2", "b"));
        notes.add(note("John 1", "c"));

        let john1: Vec<String> = notes
            .for_reference(Some("John 1"))
            .into_iter()
            .map(|n| n.content)
            .collect();
        assert_eq!(john1, vec!["a", "c"]);
        assert_eq!(notes.for_reference(None).len(), 3);
    }
}
