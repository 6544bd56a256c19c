//! Kinematics: accelerations, friction and position integration.
//!
//! Accelerations are velocity deltas already scaled by the caller's `dt`.
//! Friction is applied once per call, unscaled, so its decay rate depends on
//! the frame rate.

use crate::constants::{
    BEARING_FRICTION, FRICTION, JUMP_IMPULSE, JUMP_TERMINAL_VELOCITY, MAX_VEL, TERMINAL_VELOCITY,
};
use crate::jump::JumpState;
use crate::model::{Character, World};

/// Touchdown detected by [`Character::integrate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    /// Downward speed just before it was zeroed.
    pub impact_speed: f32,
    /// Landed without holding jump.
    pub hard: bool,
    /// A hard landing started a blink (false if one was already running).
    pub blinked: bool,
}

impl Character {
    pub fn accelerate_x(&mut self, a: f32) {
        self.velocity.x = (self.velocity.x + a).clamp(-MAX_VEL, MAX_VEL);
    }

    pub fn adjust_bearing(&mut self, a: f32) {
        self.bearing = (self.bearing + a).clamp(-MAX_VEL, MAX_VEL);
    }

    pub fn apply_friction(&mut self) {
        self.velocity.x *= FRICTION;
    }

    pub fn apply_bearing_friction(&mut self) {
        self.bearing *= BEARING_FRICTION;
    }

    /// Adds `a` to the vertical velocity, then caps the downward speed. The cap
    /// is lower while jump is held, which makes holding jump float.
    pub fn accelerate_y(&mut self, a: f32, jump_held: bool) {
        let terminal = if jump_held {
            JUMP_TERMINAL_VELOCITY
        } else {
            TERMINAL_VELOCITY
        };
        self.velocity.y = (self.velocity.y + a).min(terminal);
    }

    pub fn jump(&mut self) {
        self.velocity.y = JUMP_IMPULSE;
        self.squish.takeoff();
    }

    /// Moves by `velocity * dt`, wraps horizontally and resolves ground contact.
    pub fn integrate(&mut self, world: &World, jump_held: bool, dt: f32) -> Option<Landing> {
        self.position.x = wrap_x(self.position.x + self.velocity.x * dt, world.width());
        self.position.y += self.velocity.y * dt;

        if self.position.y < world.height() {
            return None;
        }

        if self.jump_state != JumpState::Jumping {
            // not reachable from a normal frame, but the floor is solid regardless
            self.position.y = world.height();
            self.velocity.y = self.velocity.y.min(0.0);
            return None;
        }

        let impact_speed = self.velocity.y;
        let hard = !jump_held;
        let blinked = hard && self.blink.trigger();
        self.squish.land(impact_speed);
        self.position.y = world.height();
        self.velocity.y = 0.0;
        self.jump_state = JumpState::Landed;
        Some(Landing {
            impact_speed,
            hard,
            blinked,
        })
    }
}

/// Wraps `x` into `[0, width)`.
pub fn wrap_x(x: f32, width: f32) -> f32 {
    let wrapped = x.rem_euclid(width);
    // rem_euclid rounds tiny negatives up to exactly `width`
    if wrapped >= width {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vec2;

    fn airborne(world: &World) -> Character {
        let mut c = Character::spawn(world);
        c.jump_state = JumpState::Jumping;
        c.position.y = world.height() - 50.0;
        c
    }

    #[test]
    fn horizontal_accel_clamps_both_ways() {
        let mut c = Character::spawn(&World::default());
        for _ in 0..100 {
            c.accelerate_x(50.0);
        }
        assert_eq!(c.velocity.x, MAX_VEL);
        for _ in 0..100 {
            c.accelerate_x(-50.0);
        }
        assert_eq!(c.velocity.x, -MAX_VEL);
    }

    #[test]
    fn bearing_is_bounded_by_max_vel() {
        let mut c = Character::spawn(&World::default());
        c.adjust_bearing(10_000.0);
        assert_eq!(c.bearing, MAX_VEL);
        c.apply_bearing_friction();
        assert_eq!(c.bearing, MAX_VEL * BEARING_FRICTION);
    }

    #[test]
    fn terminal_velocity_depends_on_jump_control() {
        let world = World::default();
        let mut c = airborne(&world);
        c.accelerate_y(10_000.0, true);
        assert_eq!(c.velocity.y, JUMP_TERMINAL_VELOCITY);
        c.accelerate_y(10_000.0, false);
        assert_eq!(c.velocity.y, TERMINAL_VELOCITY);
    }

    #[test]
    fn terminal_velocity_never_raises_upward_speed() {
        let world = World::default();
        let mut c = airborne(&world);
        c.velocity.y = -600.0;
        c.accelerate_y(10.0, true);
        assert_eq!(c.velocity.y, -590.0);
    }

    #[test]
    fn wrap_keeps_x_in_range() {
        assert_eq!(wrap_x(410.0, 400.0), 10.0);
        assert_eq!(wrap_x(-10.0, 400.0), 390.0);
        assert_eq!(wrap_x(400.0, 400.0), 0.0);
        assert_eq!(wrap_x(-1e-9, 400.0), 0.0);
        assert_eq!(wrap_x(123.0, 400.0), 123.0);
    }

    #[test]
    fn soft_landing_does_not_blink() {
        let world = World::default();
        let mut c = airborne(&world);
        c.velocity = Vec2::new(0.0, 250.0);
        let landing = c.integrate(&world, true, 1.0).expect("should land");
        assert!(!landing.hard);
        assert!(!landing.blinked);
        assert!(!c.blink.is_active());
        assert_eq!(c.squish.velocity, -50.0);
    }

    #[test]
    fn hard_landing_blinks() {
        let world = World::default();
        let mut c = airborne(&world);
        c.velocity.y = 500.0;
        let landing = c.integrate(&world, false, 1.0).expect("should land");
        assert!(landing.hard && landing.blinked);
        assert_eq!(c.blink.elapsed(), Some(0.0));
    }

    #[test]
    fn idle_character_never_sinks_below_ground() {
        let world = World::default();
        let mut c = Character::spawn(&world);
        c.velocity.y = 100.0;
        assert_eq!(c.integrate(&world, false, 0.1), None);
        assert_eq!(c.position.y, world.height());
        assert_eq!(c.velocity.y, 0.0);
        assert_eq!(c.jump_state, JumpState::Idle);
    }
}
