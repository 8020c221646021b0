use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

pub const MIN_DURATION_MS: u64 = 500;
pub const MAX_DURATION_MS: u64 = 5000;
pub const DEFAULT_DURATION_MS: u64 = 2000;

/// How long a spin takes, in milliseconds, kept within
/// [`MIN_DURATION_MS`]..=[`MAX_DURATION_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct SpinDuration(u64);

impl SpinDuration {
    pub fn from_millis(ms: u64) -> Self {
        let clamped = ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS);
        if clamped != ms {
            log::warn!("Spin duration {}ms out of range, using {}ms", ms, clamped);
        }
        Self(clamped)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    pub fn speed_label(&self) -> SpeedLabel {
        SpeedLabel::for_duration(*self)
    }
}

impl Default for SpinDuration {
    fn default() -> Self {
        Self(DEFAULT_DURATION_MS)
    }
}

impl From<u64> for SpinDuration {
    fn from(ms: u64) -> Self {
        Self::from_millis(ms)
    }
}

impl From<SpinDuration> for u64 {
    fn from(duration: SpinDuration) -> Self {
        duration.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumIter)]
pub enum SpeedLabel {
    Blazing,
    Fast,
    Standard,
    Steady,
}

impl SpeedLabel {
    fn upper_bound_ms(&self) -> Option<u64> {
        match self {
            Self::Blazing => Some(1000),
            Self::Fast => Some(2000),
            Self::Standard => Some(3500),
            Self::Steady => None,
        }
    }

    pub fn for_duration(duration: SpinDuration) -> Self {
        Self::iter()
            .find(|label| {
                label
                    .upper_bound_ms()
                    .is_none_or(|bound| duration.as_millis() <= bound)
            })
            .unwrap_or(Self::Steady)
    }
}
