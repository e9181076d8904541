//! Playback Synchronizer - 播放位置与经节同步状态机
//!
//! 两种互斥模式，由当前章节是否解析到音频地址决定：
//! - RealAudio: 跟随浏览器媒体元素的原生时钟（TimeUpdate / Ended / MetadataLoaded）
//! - Simulated: 无音频时由固定周期计时器推进，每个整 15 秒边界上报一次经节
//!
//! 同步器本身不持有计时器，也不直接回调监听者；所有输出写入 outbox，
//! 由所属会话在本次操作结束后统一发布。

use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::events::{MediaCommand, PlaybackEvent, PlaybackInput};
use super::speed::PlaybackSpeed;
use super::verse_mapping::{format_time, verse_for_position};
use crate::domain::scripture::ChapterAudio;

#[derive(Debug, Error, PartialEq)]
pub enum PlaybackError {
    #[error("无效的进度比例: {0}")]
    InvalidFraction(f64),

    #[error("无效的播放时间: {0}")]
    InvalidTime(f64),

    #[error("当前章节没有真实音频，忽略媒体通知")]
    NoRealAudio,
}

/// 同步器参数
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    /// 调用方未提供经节数时的默认值（示例章节 John 1:1-18 的大小）
    pub default_verse_count: u32,
    /// 模拟模式的时长（秒）
    pub simulated_duration_secs: f64,
    /// 模拟模式下上报经节的间隔（秒）
    pub verse_report_interval_secs: u64,
    /// 快进/快退步长（秒）
    pub skip_secs: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_verse_count: 18,
            simulated_duration_secs: 265.0,
            verse_report_interval_secs: 15,
            skip_secs: 10.0,
        }
    }
}

/// 同步模式
#[derive(Debug, Clone, PartialEq)]
enum PlaybackMode {
    RealAudio {
        url: String,
        duration_hint: Option<f64>,
    },
    Simulated,
}

/// 播放状态（不持久化）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub position: f64,
    pub duration: f64,
    pub speed: PlaybackSpeed,
}

/// 对外展示的播放快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub is_playing: bool,
    pub position: f64,
    pub duration: f64,
    pub speed: f64,
    pub current_verse: u32,
    pub total_verses: u32,
    pub position_label: String,
    pub duration_label: String,
}

/// 播放与经节同步器
#[derive(Debug)]
pub struct PlaybackSynchronizer {
    settings: PlaybackSettings,
    mode: PlaybackMode,
    total_verses: u32,
    state: PlaybackState,
    current_verse: u32,
    outbox: VecDeque<PlaybackEvent>,
}

impl PlaybackSynchronizer {
    /// 为一个章节创建同步器
    ///
    /// `verse_count` 为 `None` 或 0 时使用默认经节数；
    /// `audio` 带非空地址时进入真实音频模式，否则进入模拟模式
    pub fn new(
        settings: PlaybackSettings,
        verse_count: Option<u32>,
        audio: Option<&ChapterAudio>,
    ) -> Self {
        let total_verses = verse_count
            .filter(|count| *count > 0)
            .unwrap_or(settings.default_verse_count)
            .max(1);

        let (mode, duration) = match audio.filter(|a| !a.url.is_empty()) {
            Some(audio) => {
                let hint = audio.duration_hint();
                (
                    PlaybackMode::RealAudio {
                        url: audio.url.clone(),
                        duration_hint: hint,
                    },
                    hint.unwrap_or(0.0),
                )
            }
            None => (PlaybackMode::Simulated, settings.simulated_duration_secs),
        };

        Self {
            settings,
            mode,
            total_verses,
            state: PlaybackState {
                is_playing: false,
                position: 0.0,
                duration,
                speed: PlaybackSpeed::default(),
            },
            current_verse: 1,
            outbox: VecDeque::new(),
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.mode, PlaybackMode::Simulated)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_verse(&self) -> u32 {
        self.current_verse
    }

    pub fn total_verses(&self) -> u32 {
        self.total_verses
    }

    /// 模拟计时器是否应当运行
    pub fn needs_timer(&self) -> bool {
        self.is_simulated() && self.state.is_playing
    }

    /// 模拟计时器当前周期
    pub fn tick_period(&self) -> Duration {
        self.state.speed.tick_period()
    }

    /// 取出所有待发布事件
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.outbox.drain(..).collect()
    }

    /// 处理一次外部输入
    pub fn apply(&mut self, input: PlaybackInput) -> Result<(), PlaybackError> {
        match input {
            PlaybackInput::TogglePlay => {
                self.toggle_play();
                Ok(())
            }
            PlaybackInput::Seek { fraction } => self.seek(fraction),
            PlaybackInput::SkipBack => {
                self.skip(-self.settings.skip_secs);
                Ok(())
            }
            PlaybackInput::SkipForward => {
                self.skip(self.settings.skip_secs);
                Ok(())
            }
            PlaybackInput::CycleSpeed => {
                self.cycle_speed();
                Ok(())
            }
            PlaybackInput::TimeUpdate { current_time } => self.on_time_update(current_time),
            PlaybackInput::Ended => self.on_ended(),
            PlaybackInput::MetadataLoaded { duration } => self.on_metadata_loaded(duration),
        }
    }

    /// 播放/暂停
    pub fn toggle_play(&mut self) {
        self.state.is_playing = !self.state.is_playing;
        if !self.is_simulated() {
            let command = if self.state.is_playing {
                MediaCommand::Play
            } else {
                MediaCommand::Pause
            };
            self.outbox.push_back(PlaybackEvent::Media(command));
        }
        self.push_state();
    }

    /// 模拟计时器的一次滴答
    ///
    /// 仅在模拟模式且正在播放时生效；返回是否推进了位置
    pub fn tick(&mut self) -> bool {
        if !self.needs_timer() {
            return false;
        }

        let duration = self.state.duration;
        if self.state.position >= duration {
            self.state.position = duration;
            self.state.is_playing = false;
            self.push_state();
            return false;
        }

        self.state.position = (self.state.position + 1.0).min(duration);
        self.push_progress();

        if self.state.position >= duration {
            self.report_verse();
            self.state.is_playing = false;
            self.push_state();
        } else if self.on_report_boundary() {
            self.report_verse();
        }
        true
    }

    /// 进度条跳转
    pub fn seek(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(PlaybackError::InvalidFraction(fraction));
        }
        let target = fraction * self.state.duration;

        if self.is_simulated() {
            self.state.position = target.floor();
            self.push_progress();
            self.report_verse();
        } else {
            // 经节更新由随后的 TimeUpdate 驱动
            self.outbox
                .push_back(PlaybackEvent::Media(MediaCommand::SetCurrentTime {
                    seconds: target,
                }));
        }
        Ok(())
    }

    /// 快进/快退，结果夹在 `[0, duration]`
    ///
    /// 真实音频尚未拿到时长时只保证不小于 0，上限交给媒体元素
    pub fn skip(&mut self, delta_secs: f64) {
        let moved = (self.state.position + delta_secs).max(0.0);
        let target = if self.state.duration > 0.0 || self.is_simulated() {
            moved.min(self.state.duration.max(0.0))
        } else {
            moved
        };
        self.state.position = target;
        self.push_progress();

        if self.is_simulated() {
            self.report_verse();
        } else {
            self.outbox
                .push_back(PlaybackEvent::Media(MediaCommand::SetCurrentTime {
                    seconds: target,
                }));
        }
    }

    /// 切换倍速
    pub fn cycle_speed(&mut self) {
        self.state.speed = self.state.speed.next();
        if !self.is_simulated() {
            self.outbox
                .push_back(PlaybackEvent::Media(MediaCommand::SetPlaybackRate {
                    rate: self.state.speed.rate(),
                }));
        }
        self.push_state();
    }

    /// 媒体元素 timeupdate 通知
    pub fn on_time_update(&mut self, current_time: f64) -> Result<(), PlaybackError> {
        self.require_real_audio()?;
        if !current_time.is_finite() || current_time < 0.0 {
            return Err(PlaybackError::InvalidTime(current_time));
        }
        self.state.position = current_time;
        self.push_progress();
        self.report_verse();
        Ok(())
    }

    /// 媒体元素 ended 通知
    pub fn on_ended(&mut self) -> Result<(), PlaybackError> {
        self.require_real_audio()?;
        self.state.is_playing = false;
        self.push_state();
        Ok(())
    }

    /// 媒体元素 loadedmetadata 通知
    ///
    /// 时长优先取媒体元素报告值，其次取上游提示值，最后为 0
    pub fn on_metadata_loaded(&mut self, duration: Option<f64>) -> Result<(), PlaybackError> {
        let hint = match &self.mode {
            PlaybackMode::RealAudio { duration_hint, .. } => *duration_hint,
            PlaybackMode::Simulated => return Err(PlaybackError::NoRealAudio),
        };
        self.state.duration = duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .or(hint)
            .unwrap_or(0.0);
        self.push_state();
        Ok(())
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let audio_url = match &self.mode {
            PlaybackMode::RealAudio { url, .. } => Some(url.clone()),
            PlaybackMode::Simulated => None,
        };
        PlaybackSnapshot {
            mode: if audio_url.is_some() { "real_audio" } else { "simulated" },
            audio_url,
            is_playing: self.state.is_playing,
            position: self.state.position,
            duration: self.state.duration,
            speed: self.state.speed.rate(),
            current_verse: self.current_verse,
            total_verses: self.total_verses,
            position_label: format_time(self.state.position),
            duration_label: format_time(self.state.duration),
        }
    }

    fn require_real_audio(&self) -> Result<(), PlaybackError> {
        if self.is_simulated() {
            Err(PlaybackError::NoRealAudio)
        } else {
            Ok(())
        }
    }

    fn on_report_boundary(&self) -> bool {
        let interval = self.settings.verse_report_interval_secs.max(1);
        (self.state.position as u64) % interval == 0
    }

    /// 重新计算经节，变化时写入 outbox
    fn report_verse(&mut self) {
        let verse = verse_for_position(self.state.position, self.state.duration, self.total_verses);
        if verse != self.current_verse {
            self.current_verse = verse;
            self.outbox.push_back(PlaybackEvent::VerseChanged {
                verse,
                total_verses: self.total_verses,
            });
        }
    }

    fn push_progress(&mut self) {
        self.outbox.push_back(PlaybackEvent::Progress {
            position: self.state.position,
            duration: self.state.duration,
        });
    }

    fn push_state(&mut self) {
        self.outbox.push_back(PlaybackEvent::StateChanged {
            is_playing: self.state.is_playing,
            position: self.state.position,
            duration: self.state.duration,
            speed: self.state.speed.rate(),
        });
    }
}
