//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 旧版环境变量 `BIBLE_API` / `BIBLE_API_URL`
//! 2. 环境变量（`SCRIPTURA_` 前缀）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 旧版环境变量 → 配置 key
const LEGACY_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("BIBLE_API", "provider.api_key"),
    ("BIBLE_API_URL", "provider.base_url"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `SCRIPTURA_SERVER__PORT=8080`
/// - `SCRIPTURA_PROVIDER__API_KEY=...`
/// - `SCRIPTURA_PLAYBACK__SKIP_SECS=15`
/// - `BIBLE_API=...`（等同于 provider.api_key）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build_config(config_path, |name| std::env::var(name).ok())
}

fn build_config(
    config_path: Option<&Path>,
    legacy_env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = with_defaults(Config::builder())?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: SCRIPTURA_PROVIDER__BASE_URL=https://api.example/v1/
    builder = builder.add_source(
        Environment::with_prefix("SCRIPTURA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    for (var, key) in LEGACY_ENV_OVERRIDES {
        let value = legacy_env(var).filter(|v| !v.trim().is_empty());
        builder = builder.set_override_option(*key, value)?;
    }

    let app_config: AppConfig = builder.build()?.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("provider.base_url", "https://api.scripture.api.bible/v1/")?
        .set_default("provider.api_key", "")?
        .set_default("provider.timeout_secs", 30)?
        .set_default("provider.default_bible_id", "de4e12af7f28f599-02")?
        .set_default("provider.default_chapter_id", "JHN.1")?
        .set_default("provider.cache_ttl_secs", 300)?
        .set_default("playback.default_verse_count", 18)?
        .set_default("playback.simulated_duration_secs", 265)?
        .set_default("playback.verse_report_interval_secs", 15)?
        .set_default("playback.skip_secs", 10)?
        .set_default("storage.notes_db_path", "data/notes.sled")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.provider.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Provider base URL cannot be empty".to_string(),
        ));
    }

    if config.provider.cache_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Cache TTL cannot be 0".to_string(),
        ));
    }

    if config.playback.default_verse_count == 0 {
        return Err(ConfigError::ValidationError(
            "Default verse count cannot be 0".to_string(),
        ));
    }

    if config.playback.simulated_duration_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Simulated duration cannot be 0".to_string(),
        ));
    }

    if config.playback.verse_report_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Verse report interval cannot be 0".to_string(),
        ));
    }

    if config.provider.api_key.is_empty() {
        tracing::warn!("Provider API key is not set; upstream requests will be rejected");
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Provider: {}", config.provider.base_url);
    tracing::info!("Provider API Key: {}", if config.provider.api_key.is_empty() { "<unset>" } else { "<set>" });
    tracing::info!("Provider Timeout: {}s", config.provider.timeout_secs);
    tracing::info!("Default Bible: {}", config.provider.default_bible_id);
    tracing::info!("Cache TTL: {}s", config.provider.cache_ttl_secs);
    tracing::info!("Simulated Duration: {}s", config.playback.simulated_duration_secs);
    tracing::info!("Notes Database: {}", config.storage.notes_db_path);
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
