//! Event Publisher Implementation
//!
//! 每个播放会话一个 broadcast 通道，WebSocket 连接订阅后转发给浏览器

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::playback::PlaybackEvent;

/// 单个会话通道容量
const CHANNEL_CAPACITY: usize = 100;

/// 事件发布器
pub struct EventPublisher {
    /// session_id -> broadcast sender
    session_channels: DashMap<String, broadcast::Sender<PlaybackEvent>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            session_channels: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 注册会话的事件通道；已注册时返回新的订阅者
    pub fn register_session(&self, session_id: &str) -> broadcast::Receiver<PlaybackEvent> {
        if let Some(sender) = self.session_channels.get(session_id) {
            return sender.subscribe();
        }

        let (tx, rx) = broadcast::channel(CHANNEL_CAPACITY);
        self.session_channels.insert(session_id.to_string(), tx);
        rx
    }

    /// 取消注册会话
    pub fn unregister_session(&self, session_id: &str) {
        self.session_channels.remove(session_id);
    }

    /// 获取会话的事件接收器
    pub fn subscribe(&self, session_id: &str) -> Option<broadcast::Receiver<PlaybackEvent>> {
        self.session_channels.get(session_id).map(|s| s.subscribe())
    }

    /// 按顺序发布一批事件
    pub fn publish_all(&self, session_id: &str, events: Vec<PlaybackEvent>) {
        for event in events {
            self.publish(session_id, event);
        }
    }

    /// 发布会话关闭事件
    pub fn publish_closed(&self, session_id: &str, reason: &str) {
        self.publish(
            session_id,
            PlaybackEvent::Closed {
                reason: reason.to_string(),
            },
        );
    }

    /// 发布事件到指定会话
    pub fn publish(&self, session_id: &str, event: PlaybackEvent) {
        if let Some(sender) = self.session_channels.get(session_id) {
            if let Err(e) = sender.send(event) {
                tracing::trace!(
                    session_id = %session_id,
                    error = %e,
                    "Playback event dropped (no receivers)"
                );
            }
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
