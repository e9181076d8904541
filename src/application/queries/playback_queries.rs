//! Playback Queries - 播放状态查询

/// 获取播放会话快照
#[derive(Debug, Clone)]
pub struct GetPlayback {
    pub session_id: String,
}
