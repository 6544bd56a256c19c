use crate::constants::{BLINK_CYCLE_SECONDS, BLINK_ODDS_PER_FRAME};
use rand::Rng;

/// Seconds into the current blink, or inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlinkTimer {
    elapsed: Option<f32>,
}

impl BlinkTimer {
    pub fn elapsed(&self) -> Option<f32> {
        self.elapsed
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Starts a blink unless one is already running. Returns whether it started.
    pub fn trigger(&mut self) -> bool {
        if self.elapsed.is_some() {
            return false;
        }
        self.elapsed = Some(0.0);
        true
    }

    /// Rolls the per-frame chance of a spontaneous blink.
    pub fn roll<R: Rng>(&mut self, rng: &mut R) -> bool {
        rng.gen_bool(BLINK_ODDS_PER_FRAME) && self.trigger()
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(t) = self.elapsed {
            let t = t + dt;
            self.elapsed = if t >= BLINK_CYCLE_SECONDS { None } else { Some(t) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn inactive_timer_does_not_advance() {
        let mut b = BlinkTimer::default();
        b.advance(1.0);
        assert_eq!(b.elapsed(), None);
    }

    #[test]
    fn completes_one_cycle_then_deactivates() {
        let mut b = BlinkTimer::default();
        assert!(b.trigger());
        assert_eq!(b.elapsed(), Some(0.0));
        b.advance(0.1);
        assert_eq!(b.elapsed(), Some(0.1));
        b.advance(0.1);
        assert!(b.is_active());
        b.advance(0.1);
        assert!(!b.is_active());
    }

    #[test]
    fn retrigger_while_active_is_ignored() {
        let mut b = BlinkTimer::default();
        b.trigger();
        b.advance(0.1);
        assert!(!b.trigger());
        assert_eq!(b.elapsed(), Some(0.1));
    }

    #[test]
    fn roll_fires_occasionally() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut fired = 0;
        for _ in 0..10_000 {
            let mut b = BlinkTimer::default();
            if b.roll(&mut rng) {
                fired += 1;
            }
        }
        // expected ~40
        assert!(fired > 5 && fired < 120, "fired {fired}");
    }
}
