//! Simulated typing latency.

use std::time::Duration;

/// Maps input length to a simulated "thinking" delay.
///
/// `base + min(chars * per_char, cap)`: the wait grows with message length
/// but is bounded, so long inputs never produce unbounded delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyModel {
    pub base: Duration,
    pub per_char: Duration,
    pub cap: Duration,
}

impl Default for LatencyModel {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(400),
            per_char: Duration::from_millis(15),
            cap: Duration::from_millis(1600),
        }
    }
}

impl LatencyModel {
    #[must_use]
    pub const fn new(base: Duration, per_char: Duration, cap: Duration) -> Self {
        Self {
            base,
            per_char,
            cap,
        }
    }

    /// Delay before the reply to `text` becomes visible.
    #[must_use]
    pub fn delay_for(&self, text: &str) -> Duration {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        self.base + (self.per_char * chars).min(self.cap)
    }
}
