//! Fetch Cache Port - 上游响应的短期缓存
//!
//! 以逻辑资源标识为 key，缓存 `data` 信封内的负载；
//! 条目仅在 `now - fetched_at < TTL` 时有效，过期条目视为不存在，
//! 不做主动淘汰，只会被覆盖或忽略

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// Fetch Cache Port
pub trait FetchCachePort: Send + Sync {
    /// 获取未过期的负载；同时计入命中/未命中统计
    fn get_fresh(&self, key: &str) -> Option<Arc<Value>>;

    /// 是否存在未过期的条目（不计入统计）
    fn contains_fresh(&self, key: &str) -> bool;

    /// 写入负载，覆盖同 key 的旧条目，时间戳取当前时间
    fn put(&self, key: &str, value: Value) -> Arc<Value>;

    /// 条目总数（含已过期）
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}

/// 生成音频候选端点的缓存 key
///
/// 同一章节的多个候选 URL 各自缓存：`audio:{bible}:{chapter}:{md5(url)}`
pub fn generate_audio_cache_key(bible_id: &str, chapter_id: &str, url: &str) -> String {
    let digest = md5::compute(url.as_bytes());
    format!("audio:{}:{}:{:x}", bible_id, chapter_id, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_cache_key_is_stable_per_url() {
        let a = generate_audio_cache_key("b1", "JHN.1", "https://x/audio");
        let b = generate_audio_cache_key("b1", "JHN.1", "https://x/audio");
        let c = generate_audio_cache_key("b1", "JHN.1", "https://x/other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("audio:b1:JHN.1:"));
    }
}
