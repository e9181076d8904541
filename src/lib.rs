//! Scriptura - 圣经阅读器核心
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Scripture Context: 译本、书卷、章节、章节音频
//! - Playback Context: 播放位置与经节同步状态机
//! - Notes Context: 经文笔记
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ScriptureProvider, FetchCache, NoteStore, PlaybackSessions, Clock）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: Fetch Cache、笔记本、播放会话内存实现
//! - Worker: 模拟播放计时器
//! - Persistence: Sled 笔记存储
//! - Adapters: 经文 API 客户端、音频候选端点探测
//! - Events: 播放事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
