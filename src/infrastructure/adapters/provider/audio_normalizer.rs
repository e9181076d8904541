//! Audio Normalizer - 异构音频负载归一化
//!
//! 上游各部署返回的音频字段名不一致。每个目标字段按下表顺序尝试源字段，
//! 取第一个非空值；负载为数组时取第一个对象元素。

use serde_json::{Map, Value};

use crate::domain::scripture::{AudioSection, ChapterAudio};

/// 目标字段 → 源字段（按优先级）
const ID_FIELDS: &[&str] = &["id", "audioId", "chapterId"];
const URL_FIELDS: &[&str] = &["streamUrl", "resourceUrl", "audioUrl", "url"];
const DURATION_FIELDS: &[&str] = &["duration", "durationSeconds", "length"];
const NARRATOR_FIELDS: &[&str] = &["narrator", "narratorName", "reader"];
const REFERENCE_FIELDS: &[&str] = &["reference", "title"];
const CHAPTER_FIELDS: &[&str] = &["chapterId"];
const SECTION_FIELDS: &[&str] = &["sections", "timestamps"];

const SECTION_ID_FIELDS: &[&str] = &["id"];
const SECTION_START_FIELDS: &[&str] = &["start", "startTime"];
const SECTION_END_FIELDS: &[&str] = &["end", "endTime"];
const SECTION_VERSE_START_FIELDS: &[&str] = &["verseStart", "startVerse"];
const SECTION_VERSE_END_FIELDS: &[&str] = &["verseEnd", "endVerse"];
const SECTION_TEXT_FIELDS: &[&str] = &["text"];

/// 把上游负载归一化为 ChapterAudio
///
/// 没有非空流地址时返回 `None`
pub fn normalize_chapter_audio(payload: &Value, requested_chapter_id: &str) -> Option<ChapterAudio> {
    let object = match payload {
        Value::Object(map) => map,
        Value::Array(items) => items.iter().find_map(Value::as_object)?,
        _ => return None,
    };

    let url = first_string(object, URL_FIELDS)?;
    let chapter_id =
        first_string(object, CHAPTER_FIELDS).unwrap_or_else(|| requested_chapter_id.to_string());

    Some(ChapterAudio {
        id: first_string(object, ID_FIELDS).unwrap_or_else(|| chapter_id.clone()),
        reference: first_string(object, REFERENCE_FIELDS).unwrap_or_default(),
        url,
        duration: first_number(object, DURATION_FIELDS)
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(0.0),
        narrator: first_string(object, NARRATOR_FIELDS),
        sections: sections(object),
        chapter_id,
    })
}

fn sections(object: &Map<String, Value>) -> Vec<AudioSection> {
    let Some(items) = SECTION_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_array))
    else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let item = item.as_object()?;
            let start = first_number(item, SECTION_START_FIELDS)?;
            let end = first_number(item, SECTION_END_FIELDS)?;
            let verse_start = first_number(item, SECTION_VERSE_START_FIELDS).unwrap_or(0.0);
            let verse_end = first_number(item, SECTION_VERSE_END_FIELDS).unwrap_or(verse_start);
            Some(AudioSection {
                id: first_string(item, SECTION_ID_FIELDS).unwrap_or_else(|| index.to_string()),
                start,
                end,
                verse_start: verse_start.max(0.0) as u32,
                verse_end: verse_end.max(0.0) as u32,
                text: first_string(item, SECTION_TEXT_FIELDS).unwrap_or_default(),
            })
        })
        .collect()
}

/// 第一个非空字符串字段；数字 ID 也接受
fn first_string(object: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match object.get(*field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// 第一个数值字段；数字字符串也接受
fn first_number(object: &Map<String, Value>, fields: &[&str]) -> Option<f64> {
    fields.iter().find_map(|field| match object.get(*field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_field_names() {
        let audio = normalize_chapter_audio(
            &json!({
                "id": "a1",
                "chapterId": "JHN.1",
                "reference": "John 1",
                "streamUrl": "https://cdn/jhn1.mp3",
                "duration": 265,
                "narrator": "David Heath"
            }),
            "JHN.1",
        )
        .unwrap();

        assert_eq!(audio.id, "a1");
        assert_eq!(audio.url, "https://cdn/jhn1.mp3");
        assert_eq!(audio.duration, 265.0);
        assert_eq!(audio.narrator.as_deref(), Some("David Heath"));
        assert!(audio.sections.is_empty());
    }

    #[test]
    fn test_alternate_field_names() {
        let audio = normalize_chapter_audio(
            &json!({
                "audioId": 42,
                "resourceUrl": "https://cdn/x.mp3",
                "durationSeconds": "120.5",
                "narratorName": "Reader"
            }),
            "JHN.3",
        )
        .unwrap();

        assert_eq!(audio.id, "42");
        assert_eq!(audio.chapter_id, "JHN.3");
        assert_eq!(audio.url, "https://cdn/x.mp3");
        assert_eq!(audio.duration, 120.5);
        assert_eq!(audio.narrator.as_deref(), Some("Reader"));
    }

    #[test]
    fn test_field_priority_order() {
        let audio = normalize_chapter_audio(
            &json!({"url": "second", "streamUrl": "first"}),
            "JHN.1",
        )
        .unwrap();
        assert_eq!(audio.url, "first");
    }

    #[test]
    fn test_empty_url_is_absent() {
        assert!(normalize_chapter_audio(&json!({"streamUrl": "", "duration": 10}), "JHN.1").is_none());
        assert!(normalize_chapter_audio(&json!({"duration": 10}), "JHN.1").is_none());
        assert!(normalize_chapter_audio(&json!("https://cdn/x.mp3"), "JHN.1").is_none());
    }

    #[test]
    fn test_array_payload_uses_first_object() {
        let audio = normalize_chapter_audio(
            &json!([{"audioUrl": "https://cdn/a.mp3"}, {"audioUrl": "https://cdn/b.mp3"}]),
            "JHN.1",
        )
        .unwrap();
        assert_eq!(audio.url, "https://cdn/a.mp3");
        assert_eq!(audio.id, "JHN.1");
        assert_eq!(audio.duration, 0.0);
    }

    #[test]
    fn test_sections_skip_malformed_items() {
        let audio = normalize_chapter_audio(
            &json!({
                "streamUrl": "https://cdn/x.mp3",
                "timestamps": [
                    {"startTime": 0, "endTime": 12.5, "startVerse": 1, "endVerse": 2, "text": "In the beginning"},
                    {"start": 12.5},
                    "garbage"
                ]
            }),
            "JHN.1",
        )
        .unwrap();

        assert_eq!(audio.sections.len(), 1);
        let section = &audio.sections[0];
        assert_eq!(section.id, "0");
        assert_eq!(section.end, 12.5);
        assert_eq!((section.verse_start, section.verse_end), (1, 2));
    }
}
