//! 播放位置到经节号的映射

/// 按比例把播放位置映射到经节号
///
/// `floor(position / max(1, duration) * total_verses) + 1`，结果落在 `[1, total_verses]`
pub fn verse_for_position(position: f64, duration: f64, total_verses: u32) -> u32 {
    let total = total_verses.max(1);
    let duration = if duration.is_finite() { duration.max(1.0) } else { 1.0 };
    let position = if position.is_finite() { position.max(0.0) } else { 0.0 };

    let raw = (position / duration * f64::from(total)).floor() + 1.0;
    // 先在浮点域夹紧，避免越界转换
    raw.clamp(1.0, f64::from(total)) as u32
}

/// 以 `m:ss` 形式格式化秒数
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0).floor() as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}
