//! 倍速档位

use serde::{Serialize, Serializer};
use std::time::Duration;

const MIN_QUARTERS: u8 = 4;
const MAX_QUARTERS: u8 = 8;

/// 播放倍速，以 0.25 为步长，从 1.0 到 2.0 循环
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSpeed(u8);

impl PlaybackSpeed {
    pub const NORMAL: Self = Self(MIN_QUARTERS);

    /// 下一个档位；2.0 之后回到 1.0
    pub fn next(self) -> Self {
        if self.0 >= MAX_QUARTERS {
            Self::NORMAL
        } else {
            Self(self.0 + 1)
        }
    }

    pub fn rate(self) -> f64 {
        f64::from(self.0) / 4.0
    }

    /// 模拟计时器的周期：1 秒 ÷ 倍速
    pub fn tick_period(self) -> Duration {
        Duration::from_millis(4000 / u64::from(self.0))
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl Serialize for PlaybackSpeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.rate())
    }
}
