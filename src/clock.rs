//! Frame timing.

use crate::constants::MAX_FRAME_DT;
use std::time::Instant;

/// Makes a raw frame delta safe to integrate: negative, NaN and infinite
/// values become 0, and anything above [`MAX_FRAME_DT`] is capped.
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(MAX_FRAME_DT)
}

/// Wall-clock delta between successive frame callbacks.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call (or since `start`).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}
