//! Scriptura - 圣经阅读器核心
//!
//! - Domain: scripture/, playback/, notes/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, worker, persistence, adapters, events

use std::sync::Arc;

use scriptura::application::SystemClock;
use scriptura::config::{load_config, print_config, AppConfig};
use scriptura::infrastructure::adapters::{
    ApiBibleClient, ApiBibleClientConfig, HttpTransport, HttpTransportConfig,
};
use scriptura::infrastructure::events::EventPublisher;
use scriptura::infrastructure::http::{AppState, HttpServer, ServerConfig};
use scriptura::infrastructure::memory::{
    InMemoryFetchCache, InMemoryNoteLedger, InMemoryPlaybackSessions,
};
use scriptura::infrastructure::persistence::sled::{SledNoteStore, SledNoteStoreConfig};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},scriptura={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：BIBLE_API* > 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Scriptura - 圣经阅读器");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.storage.notes_db_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 进程内唯一的 Fetch Cache
    let fetch_cache = InMemoryFetchCache::new(chrono::Duration::seconds(
        config.provider.cache_ttl_secs as i64,
    ))
    .arc();
    tracing::info!(ttl_secs = fetch_cache.ttl().num_seconds(), "Fetch cache ready");

    // 创建经文 API 客户端
    let transport = HttpTransport::new(
        HttpTransportConfig::new(&config.provider.api_key)
            .with_timeout(config.provider.timeout_secs),
    )?;
    let provider = Arc::new(ApiBibleClient::new(
        ApiBibleClientConfig::new(&config.provider.base_url),
        Arc::new(transport),
        fetch_cache.clone(),
    ));

    // 笔记存储
    let note_store = SledNoteStore::new(&SledNoteStoreConfig {
        db_path: config.storage.notes_db_path.clone(),
    })?
    .arc();
    let note_ledger = InMemoryNoteLedger::load(note_store).await?.arc();

    // 播放会话
    let event_publisher = EventPublisher::new().arc();
    let playback_sessions =
        InMemoryPlaybackSessions::new(config.playback.settings(), event_publisher.clone()).arc();

    // 创建 HTTP 服务器
    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        server_config = server_config.with_static_files(
            config.server.static_files.dir.clone(),
            config.server.static_files.path.clone(),
        );
    }
    let state = AppState::new(
        config.provider.default_bible_id.clone(),
        provider,
        fetch_cache,
        note_ledger,
        playback_sessions,
        event_publisher,
        Arc::new(SystemClock),
    );

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
