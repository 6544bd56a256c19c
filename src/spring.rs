//! Squash-and-stretch spring.
//!
//! A damped oscillator integrated with semi-implicit Euler. It only feeds the
//! drawn body shape and never touches position or velocity.

use crate::constants::{
    LANDING_SQUISH_DIVISOR, MAX_SQUISH_VEL, SQUISH_DAMPING, SQUISH_REST_THRESHOLD,
    SQUISH_STIFFNESS,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Squish {
    /// Vertical deformation in pixels. Positive stretches, negative squashes;
    /// the horizontal size gets the inverse.
    pub offset: f32,
    /// Pixels per second.
    pub velocity: f32,
}

impl Squish {
    pub fn is_at_rest(&self) -> bool {
        self.offset == 0.0 && self.velocity == 0.0
    }

    pub fn step(&mut self, dt: f32) {
        if (self.velocity + self.offset).abs() < SQUISH_REST_THRESHOLD {
            // snap, or it wobbles forever at sub-pixel scale
            self.offset = 0.0;
            self.velocity = 0.0;
            return;
        }
        let force = -SQUISH_STIFFNESS * self.offset - SQUISH_DAMPING * self.velocity;
        self.velocity = (self.velocity + force * dt).clamp(-MAX_SQUISH_VEL, MAX_SQUISH_VEL);
        self.offset += self.velocity * dt;
    }

    /// Stretch on jump departure.
    pub fn takeoff(&mut self) {
        self.velocity = MAX_SQUISH_VEL;
    }

    /// Compress proportionally to the downward speed at touchdown, within the
    /// velocity cap.
    pub fn land(&mut self, impact_speed: f32) {
        self.velocity =
            (-impact_speed / LANDING_SQUISH_DIVISOR).clamp(-MAX_SQUISH_VEL, MAX_SQUISH_VEL);
    }
}
