pub(crate) const LINES: [&str; 2] = ["left/right arrows to move", "spacebar to jump"];

const FULL_BRIGHTNESS: f32 = 200.0;
const HOLD_SECS: f32 = 1.0;
const FADE_SECS: f32 = 1.0;

/// Help text that fades out once the player starts moving.
#[derive(Clone, Debug)]
pub(crate) struct Instructions {
    /// Seconds since the fade was triggered.
    fading_for: Option<f32>,
    showing: bool,
}

impl Instructions {
    pub(crate) fn new(showing: bool) -> Self {
        Self {
            fading_for: None,
            showing,
        }
    }

    /// Advances the fade and returns the text brightness, or `None` once gone.
    pub(crate) fn advance(&mut self, dt: f32, triggered: bool) -> Option<u8> {
        if !self.showing {
            return None;
        }
        let elapsed = match self.fading_for {
            Some(t) => t + dt,
            None if triggered => 0.0,
            None => return Some(FULL_BRIGHTNESS as u8),
        };
        self.fading_for = Some(elapsed);
        if elapsed >= HOLD_SECS + FADE_SECS {
            self.showing = false;
            return None;
        }
        let level = if elapsed > HOLD_SECS {
            FULL_BRIGHTNESS * (1.0 - (elapsed - HOLD_SECS) / FADE_SECS)
        } else {
            FULL_BRIGHTNESS
        };
        Some(level.clamp(0.0, 255.0) as u8)
    }
}
