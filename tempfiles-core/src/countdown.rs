use tracing::info;

use crate::EXPIRED_MESSAGE;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Absolute expiry instant, unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpiryTimestamp(pub i64);

impl ExpiryTimestamp {
    pub fn from_unix_ms(ms: i64) -> Self {
        Self(ms)
    }

    /// Accepts the host date parser's output, which is `NaN` for garbage.
    pub fn from_js_millis(ms: f64) -> Option<Self> {
        if !ms.is_finite() {
            return None;
        }
        Some(Self(ms as i64))
    }

    pub fn unix_ms(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Counting,
    Expired,
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    expiry: ExpiryTimestamp,
    state: CountdownState,
}

impl CountdownTimer {
    pub fn new(expiry: ExpiryTimestamp) -> Self {
        Self {
            expiry,
            state: CountdownState::Counting,
        }
    }

    pub fn expiry(&self) -> ExpiryTimestamp {
        self.expiry
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Recomputes the label for wall-clock time `now_unix_ms`.
    ///
    /// Expiry is sticky: a clock that later reads earlier keeps the expired label.
    pub fn tick(&mut self, now_unix_ms: i64) -> String {
        if self.state == CountdownState::Expired {
            return EXPIRED_MESSAGE.to_owned();
        }

        let remaining = self.expiry.0.saturating_sub(now_unix_ms);
        if remaining <= 0 {
            info!(expiry_ms = self.expiry.0, "file expired");
            self.state = CountdownState::Expired;
            return EXPIRED_MESSAGE.to_owned();
        }
        format_remaining(remaining)
    }
}

/// `{hours}h {minutes}m {seconds}s`, unpadded; hours are not folded into days.
pub fn format_remaining(ms: i64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    format!("{hours}h {minutes}m {seconds}s")
}
