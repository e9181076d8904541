//! In-Memory Playback Sessions Implementation
//!
//! 会话持有同步器与可选的模拟计时器。每次输入处理完后：
//! 1. 取出同步器 outbox 并发布
//! 2. 按同步器状态启动、保留、重建或停止计时器

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::{PlaybackChapter, PlaybackSessionError, PlaybackSessionPort};
use crate::domain::playback::{
    PlaybackEvent, PlaybackInput, PlaybackSettings, PlaybackSnapshot, PlaybackSynchronizer,
};
use crate::infrastructure::events::EventPublisher;
use crate::infrastructure::worker::{PlaybackTimer, SharedSynchronizer};

/// 单个播放会话
struct PlaybackSession {
    chapter_id: Mutex<String>,
    synchronizer: SharedSynchronizer,
    timer: Mutex<Option<PlaybackTimer>>,
}

/// 内存播放会话管理器
pub struct InMemoryPlaybackSessions {
    sessions: DashMap<String, Arc<PlaybackSession>>,
    settings: PlaybackSettings,
    event_publisher: Arc<EventPublisher>,
}

impl InMemoryPlaybackSessions {
    pub fn new(settings: PlaybackSettings, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            sessions: DashMap::new(),
            settings,
            event_publisher,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 活跃会话数
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn get(&self, session_id: &str) -> Result<Arc<PlaybackSession>, PlaybackSessionError> {
        self.sessions
            .get(session_id)
            .map(|s| s.value().clone())
            .ok_or_else(|| PlaybackSessionError::NotFound(session_id.to_string()))
    }

    fn synchronizer_for(&self, chapter: &PlaybackChapter) -> PlaybackSynchronizer {
        PlaybackSynchronizer::new(
            self.settings.clone(),
            chapter.verse_count,
            chapter.audio.as_ref(),
        )
    }

    /// 让计时器与同步器状态一致
    ///
    /// 调用方必须持有同步器锁；已关闭的会话不再启动计时器
    async fn reconcile_timer(
        &self,
        session_id: &str,
        session: &PlaybackSession,
        sync: &PlaybackSynchronizer,
    ) {
        let mut timer = session.timer.lock().await;

        if !sync.needs_timer() || !self.is_valid(session_id) {
            if timer.take().is_some() {
                tracing::debug!(session_id = %session_id, "Playback timer stopped");
            }
            return;
        }

        let period = sync.tick_period();
        let keep = timer
            .as_ref()
            .map(|t| t.is_running() && t.period() == period)
            .unwrap_or(false);
        if !keep {
            *timer = Some(PlaybackTimer::start(
                session_id.to_string(),
                session.synchronizer.clone(),
                self.event_publisher.clone(),
                period,
            ));
        }
    }
}

#[async_trait]
impl PlaybackSessionPort for InMemoryPlaybackSessions {
    async fn open(&self, chapter: PlaybackChapter) -> (String, PlaybackSnapshot) {
        let session_id = Uuid::new_v4().to_string();
        let sync = self.synchronizer_for(&chapter);
        let snapshot = sync.snapshot();

        self.event_publisher.register_session(&session_id);
        self.sessions.insert(
            session_id.clone(),
            Arc::new(PlaybackSession {
                chapter_id: Mutex::new(chapter.chapter_id.clone()),
                synchronizer: Arc::new(Mutex::new(sync)),
                timer: Mutex::new(None),
            }),
        );

        tracing::info!(
            session_id = %session_id,
            bible_id = %chapter.bible_id,
            chapter_id = %chapter.chapter_id,
            mode = snapshot.mode,
            total_verses = snapshot.total_verses,
            "Playback session opened"
        );
        (session_id, snapshot)
    }

    async fn change_chapter(
        &self,
        session_id: &str,
        chapter: PlaybackChapter,
    ) -> Result<PlaybackSnapshot, PlaybackSessionError> {
        let session = self.get(session_id)?;
        let mut sync = session.synchronizer.lock().await;

        // 旧章节的计时器先停，避免向新章节写入滴答
        session.timer.lock().await.take();
        *sync = self.synchronizer_for(&chapter);

        let mut current = session.chapter_id.lock().await;
        tracing::info!(
            session_id = %session_id,
            from = %current,
            to = %chapter.chapter_id,
            mode = sync.snapshot().mode,
            "Playback chapter changed"
        );
        *current = chapter.chapter_id;

        let snapshot = sync.snapshot();
        self.event_publisher.publish(
            session_id,
            PlaybackEvent::StateChanged {
                is_playing: snapshot.is_playing,
                position: snapshot.position,
                duration: snapshot.duration,
                speed: snapshot.speed,
            },
        );
        Ok(snapshot)
    }

    async fn apply(
        &self,
        session_id: &str,
        input: PlaybackInput,
    ) -> Result<PlaybackSnapshot, PlaybackSessionError> {
        let session = self.get(session_id)?;
        let mut sync = session.synchronizer.lock().await;

        let result = sync.apply(input);
        // 失败的输入不会产生事件，但仍然清空 outbox
        let events = sync.drain_events();
        self.event_publisher.publish_all(session_id, events);
        result?;

        self.reconcile_timer(session_id, &session, &sync).await;
        Ok(sync.snapshot())
    }

    async fn snapshot(&self, session_id: &str) -> Result<PlaybackSnapshot, PlaybackSessionError> {
        let session = self.get(session_id)?;
        let sync = session.synchronizer.lock().await;
        Ok(sync.snapshot())
    }

    async fn close(&self, session_id: &str) -> Result<(), PlaybackSessionError> {
        let (_, session) = self
            .sessions
            .remove(session_id)
            .ok_or_else(|| PlaybackSessionError::NotFound(session_id.to_string()))?;

        // 等待进行中的输入处理完，再停计时器
        let _sync = session.synchronizer.lock().await;
        session.timer.lock().await.take();
        self.event_publisher.publish_closed(session_id, "closed");
        self.event_publisher.unregister_session(session_id);

        tracing::info!(session_id = %session_id, "Playback session closed");
        Ok(())
    }

    fn is_valid(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::playback::{MediaCommand, PlaybackError};
    use crate::domain::scripture::ChapterAudio;
    use std::time::Duration;

    fn sessions() -> (InMemoryPlaybackSessions, Arc<EventPublisher>) {
        let publisher = EventPublisher::new().arc();
        (
            InMemoryPlaybackSessions::new(PlaybackSettings::default(), publisher.clone()),
            publisher,
        )
    }

    fn chapter(audio: Option<ChapterAudio>) -> PlaybackChapter {
        PlaybackChapter {
            bible_id: "b1".to_string(),
            chapter_id: "JHN.1".to_string(),
            reference: "John 1".to_string(),
            verse_count: Some(18),
            audio,
        }
    }

    fn audio() -> ChapterAudio {
        ChapterAudio {
            id: "a1".to_string(),
            chapter_id: "JHN.1".to_string(),
            reference: "John 1".to_string(),
            url: "https://cdn/jhn1.mp3".to_string(),
            duration: 200.0,
            narrator: None,
            sections: Vec::new(),
        }
    }

    async fn next_verse(rx: &mut tokio::sync::broadcast::Receiver<PlaybackEvent>) -> u32 {
        loop {
            if let PlaybackEvent::VerseChanged { verse, .. } = rx.recv().await.unwrap() {
                return verse;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_playback_reports_verse_after_fifteen_seconds() {
        let (sessions, publisher) = sessions();
        let (id, snapshot) = sessions.open(chapter(None)).await;
        assert_eq!(snapshot.mode, "simulated");
        let mut rx = publisher.subscribe(&id).unwrap();

        sessions.apply(&id, PlaybackInput::TogglePlay).await.unwrap();
        let verse = tokio::time::timeout(Duration::from_secs(20), next_verse(&mut rx))
            .await
            .unwrap();
        assert_eq!(verse, 2);

        let snapshot = sessions.snapshot(&id).await.unwrap();
        assert_eq!(snapshot.current_verse, 2);
        assert!(snapshot.position >= 15.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_simulated_clock() {
        let (sessions, _) = sessions();
        let (id, _) = sessions.open(chapter(None)).await;

        sessions.apply(&id, PlaybackInput::TogglePlay).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3500)).await;
        let paused = sessions.apply(&id, PlaybackInput::TogglePlay).await.unwrap();
        assert!(!paused.is_playing);
        assert_eq!(paused.position, 3.0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(sessions.snapshot(&id).await.unwrap().position, 3.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change_retimes_running_clock() {
        let (sessions, _) = sessions();
        let (id, _) = sessions.open(chapter(None)).await;

        for _ in 0..4 {
            sessions.apply(&id, PlaybackInput::CycleSpeed).await.unwrap();
        }
        let snapshot = sessions.apply(&id, PlaybackInput::TogglePlay).await.unwrap();
        assert_eq!(snapshot.speed, 2.0);

        tokio::time::sleep(Duration::from_millis(2250)).await;
        assert_eq!(sessions.snapshot(&id).await.unwrap().position, 4.0);
    }

    #[tokio::test]
    async fn test_real_audio_emits_media_commands() {
        let (sessions, publisher) = sessions();
        let (id, snapshot) = sessions.open(chapter(Some(audio()))).await;
        assert_eq!(snapshot.mode, "real_audio");
        assert_eq!(snapshot.audio_url.as_deref(), Some("https://cdn/jhn1.mp3"));
        let mut rx = publisher.subscribe(&id).unwrap();

        sessions.apply(&id, PlaybackInput::TogglePlay).await.unwrap();
        assert_eq!(
            rx.recv().await.unwrap(),
            PlaybackEvent::Media(MediaCommand::Play)
        );

        let snapshot = sessions
            .apply(&id, PlaybackInput::TimeUpdate { current_time: 100.0 })
            .await
            .unwrap();
        assert_eq!(snapshot.current_verse, 10);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let (sessions, _) = sessions();
        let (id, _) = sessions.open(chapter(None)).await;

        let err = sessions
            .apply(&id, PlaybackInput::Seek { fraction: 1.5 })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlaybackSessionError::Playback(PlaybackError::InvalidFraction(_))
        ));

        let err = sessions.apply(&id, PlaybackInput::Ended).await.unwrap_err();
        assert!(matches!(
            err,
            PlaybackSessionError::Playback(PlaybackError::NoRealAudio)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_chapter_resets_state_and_stops_clock() {
        let (sessions, _) = sessions();
        let (id, _) = sessions.open(chapter(None)).await;
        sessions.apply(&id, PlaybackInput::TogglePlay).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5500)).await;

        let mut next = chapter(Some(audio()));
        next.chapter_id = "JHN.2".to_string();
        next.verse_count = Some(25);
        let snapshot = sessions.change_chapter(&id, next).await.unwrap();
        assert_eq!(snapshot.mode, "real_audio");
        assert_eq!(snapshot.position, 0.0);
        assert_eq!(snapshot.total_verses, 25);
        assert!(!snapshot.is_playing);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sessions.snapshot(&id).await.unwrap().position, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_verse_events_follow_ticks_and_seeks_in_order() {
        let (sessions, publisher) = sessions();
        let (id, _) = sessions.open(chapter(None)).await;
        let mut rx = publisher.subscribe(&id).unwrap();
        sessions.apply(&id, PlaybackInput::TogglePlay).await.unwrap();

        let mut last_verse = None;
        for fraction in [0.5, 0.1, 0.9, 0.3] {
            tokio::time::sleep(Duration::from_millis(15_500)).await;
            let snapshot = sessions
                .apply(&id, PlaybackInput::Seek { fraction })
                .await
                .unwrap();

            while let Ok(event) = rx.try_recv() {
                if let PlaybackEvent::VerseChanged { verse, .. } = event {
                    last_verse = Some(verse);
                }
            }
            assert_eq!(last_verse, Some(snapshot.current_verse));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_during_pending_input_leaves_no_clock() {
        let (sessions, _) = sessions();
        let sessions = Arc::new(sessions);
        let (id, _) = sessions.open(chapter(None)).await;
        let session = sessions.get(&id).unwrap();

        let guard = session.synchronizer.lock().await;
        let toggle = tokio::spawn({
            let sessions = sessions.clone();
            let id = id.clone();
            async move { sessions.apply(&id, PlaybackInput::TogglePlay).await }
        });
        tokio::task::yield_now().await;
        let close = tokio::spawn({
            let sessions = sessions.clone();
            let id = id.clone();
            async move { sessions.close(&id).await }
        });
        tokio::task::yield_now().await;
        drop(guard);

        toggle.await.unwrap().unwrap();
        close.await.unwrap().unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(session.timer.lock().await.is_none());
        assert_eq!(session.synchronizer.lock().await.state().position, 0.0);
    }

    #[tokio::test]
    async fn test_close_removes_session() {
        let (sessions, publisher) = sessions();
        let (id, _) = sessions.open(chapter(None)).await;
        let mut rx = publisher.subscribe(&id).unwrap();

        sessions.close(&id).await.unwrap();
        assert!(!sessions.is_valid(&id));
        assert!(sessions.is_empty());
        assert!(matches!(
            rx.recv().await.unwrap(),
            PlaybackEvent::Closed { .. }
        ));
        assert!(matches!(
            sessions.snapshot(&id).await,
            Err(PlaybackSessionError::NotFound(_))
        ));
        assert!(sessions.close(&id).await.is_err());
    }
}
