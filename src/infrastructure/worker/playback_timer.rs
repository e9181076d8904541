//! Playback Timer - 模拟播放计时器
//!
//! 每个正在模拟播放的会话一个 tokio 任务，按 `1s / speed` 周期推进同步器。
//! 暂停、关闭、换章或倍速变化时由会话中止并按需重建。

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::domain::playback::PlaybackSynchronizer;
use crate::infrastructure::events::EventPublisher;

/// 会话与计时器共享的同步器
pub type SharedSynchronizer = Arc<Mutex<PlaybackSynchronizer>>;

/// 运行中的模拟计时器；drop 时中止任务
pub struct PlaybackTimer {
    period: Duration,
    handle: JoinHandle<()>,
}

impl PlaybackTimer {
    /// 启动计时器，首次滴答在一个周期之后
    pub fn start(
        session_id: String,
        synchronizer: SharedSynchronizer,
        event_publisher: Arc<EventPublisher>,
        period: Duration,
    ) -> Self {
        tracing::debug!(
            session_id = %session_id,
            period_ms = period.as_millis() as u64,
            "Playback timer started"
        );

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                // 持锁发布，与会话输入的事件保持同一顺序
                let running = {
                    let mut sync = synchronizer.lock().await;
                    sync.tick();
                    event_publisher.publish_all(&session_id, sync.drain_events());
                    sync.needs_timer()
                };

                if !running {
                    tracing::debug!(session_id = %session_id, "Playback timer finished");
                    break;
                }
            }
        });

        Self { period, handle }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PlaybackTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
