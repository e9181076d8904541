//! Scripture Context - 章节音频

use serde::{Deserialize, Serialize};

/// 音频分段（某段时间覆盖的经节范围）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSection {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub verse_start: u32,
    pub verse_end: u32,
    #[serde(default)]
    pub text: String,
}

/// 章节朗读音频
///
/// 只有拿到非空的流地址时才会构造
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAudio {
    pub id: String,
    pub chapter_id: String,
    pub reference: String,
    pub url: String,
    /// 时长（秒），上游未提供时为 0
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,
    #[serde(default)]
    pub sections: Vec<AudioSection>,
}

impl ChapterAudio {
    /// 上游给出的时长提示；0 视为未知
    pub fn duration_hint(&self) -> Option<f64> {
        (self.duration.is_finite() && self.duration > 0.0).then_some(self.duration)
    }
}
