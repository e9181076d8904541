//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::playback::PlaybackSettings;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 上游经文 API 配置
    #[serde(default)]
    pub provider: ProviderConfig,

    /// 播放同步配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置（浏览器端阅读器）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 上游经文 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// API Base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API Key（`api-key` 请求头）
    #[serde(default)]
    pub api_key: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 请求未指定译本时使用的译本
    #[serde(default = "default_bible_id")]
    pub default_bible_id: String,

    /// 阅读器初始章节
    #[serde(default = "default_chapter_id")]
    pub default_chapter_id: String,

    /// Fetch Cache 新鲜期（秒）
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_base_url() -> String {
    "https://api.scripture.api.bible/v1/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_bible_id() -> String {
    "de4e12af7f28f599-02".to_string()
}

fn default_chapter_id() -> String {
    "JHN.1".to_string()
}

fn default_cache_ttl() -> u64 {
    300 // 5 分钟
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            default_bible_id: default_bible_id(),
            default_chapter_id: default_chapter_id(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// 播放同步配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    /// 未知经节数时的默认值
    #[serde(default = "default_verse_count")]
    pub default_verse_count: u32,

    /// 无音频时的模拟时长（秒）
    #[serde(default = "default_simulated_duration")]
    pub simulated_duration_secs: u64,

    /// 模拟模式经节上报间隔（秒）
    #[serde(default = "default_report_interval")]
    pub verse_report_interval_secs: u64,

    /// 快进/快退步长（秒）
    #[serde(default = "default_skip")]
    pub skip_secs: u64,
}

fn default_verse_count() -> u32 {
    18
}

fn default_simulated_duration() -> u64 {
    265 // 4:25
}

fn default_report_interval() -> u64 {
    15
}

fn default_skip() -> u64 {
    10
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_verse_count: default_verse_count(),
            simulated_duration_secs: default_simulated_duration(),
            verse_report_interval_secs: default_report_interval(),
            skip_secs: default_skip(),
        }
    }
}

impl PlaybackConfig {
    /// 转换为同步器参数
    pub fn settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            default_verse_count: self.default_verse_count,
            simulated_duration_secs: self.simulated_duration_secs as f64,
            verse_report_interval_secs: self.verse_report_interval_secs,
            skip_secs: self.skip_secs as f64,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 笔记数据库路径
    #[serde(default = "default_notes_db_path")]
    pub notes_db_path: String,
}

fn default_notes_db_path() -> String {
    "data/notes.sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            notes_db_path: default_notes_db_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.provider.default_bible_id, "de4e12af7f28f599-02");
        assert_eq!(config.provider.cache_ttl_secs, 300);
        assert_eq!(config.storage.notes_db_path, "data/notes.sled");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_playback_settings_match_defaults() {
        assert_eq!(PlaybackConfig::default().settings(), PlaybackSettings::default());
    }
}
