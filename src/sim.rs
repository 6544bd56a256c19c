//! Per-frame orchestration: input in, pose out.

use crate::clock::sanitize_dt;
use crate::constants::{ACCEL, AIR_BENDING, BEARING_ACCEL, GRAVITY};
use crate::events::{BlinkCause, FrameEvent};
use crate::input::InputSnapshot;
use crate::jump::{self, JumpState};
use crate::model::{Character, World};
use crate::pose::Pose;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, warn};

/// What one frame step produced.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub pose: Pose,
    pub events: Vec<FrameEvent>,
}

/// Owns the character and advances it one frame at a time.
pub struct Sim {
    world: World,
    character: Character,
    rng: StdRng,
    frames: u64,
}

impl Sim {
    /// A fresh character standing mid-floor. `seed` drives the random blinks.
    pub fn new(world: World, seed: u64) -> Self {
        let character = Character::spawn(&world);
        Self::with_character(world, character, seed)
    }

    pub fn with_character(world: World, character: Character, seed: u64) -> Self {
        Self {
            world,
            character,
            rng: StdRng::seed_from_u64(seed),
            frames: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pose(&self) -> Pose {
        Pose::of(&self.character)
    }

    /// Advances by `raw_dt` seconds under the given controls.
    ///
    /// Order matters: the squish spring steps before this frame's impulses, so a
    /// takeoff or landing kick is what the frame ends with. The jump machine runs before
    /// the jump impulse, and touchdown is resolved inside integration so the
    /// landing is seen in the same frame it happens.
    pub fn step(&mut self, input: InputSnapshot, raw_dt: f32) -> FrameReport {
        let dt = sanitize_dt(raw_dt);
        if dt != raw_dt && raw_dt != 0.0 {
            warn!(raw_dt, dt, "frame delta out of range, clamped");
        }

        let mut events = Vec::new();
        if dt == 0.0 {
            return FrameReport {
                pose: self.pose(),
                events,
            };
        }

        let world = self.world;
        let c = &mut self.character;

        if c.blink.roll(&mut self.rng) {
            events.push(FrameEvent::BlinkStarted {
                cause: BlinkCause::Random,
            });
        }
        c.blink.advance(dt);
        c.squish.step(dt);

        let grounded = c.is_grounded(&world);
        if let Some(next) = jump::advance(c.jump_state, input.jump, grounded) {
            debug!(from = ?c.jump_state, to = ?next, frame = self.frames, "jump state");
            match next {
                JumpState::Jumping => events.push(FrameEvent::Takeoff),
                JumpState::Idle => events.push(FrameEvent::Released),
                JumpState::Landed => {}
            }
            c.jump_state = next;
        }

        let accel = if grounded { ACCEL } else { AIR_BENDING };
        if input.is_steering() {
            let dir = input.steer();
            c.adjust_bearing(dir * BEARING_ACCEL * dt);
            c.accelerate_x(dir * accel * dt);
        } else {
            c.apply_bearing_friction();
        }

        if grounded {
            if c.jump_state == JumpState::Jumping {
                c.jump();
            }
            if !input.is_steering() {
                c.apply_friction();
            }
        } else {
            c.accelerate_y(GRAVITY * dt, input.jump);
        }

        if let Some(landing) = c.integrate(&world, input.jump, dt) {
            debug!(
                impact_speed = landing.impact_speed,
                hard = landing.hard,
                frame = self.frames,
                "landed"
            );
            events.push(FrameEvent::Landed {
                impact_speed: landing.impact_speed,
                hard: landing.hard,
            });
            if landing.blinked {
                events.push(FrameEvent::BlinkStarted {
                    cause: BlinkCause::HardLanding,
                });
            }
        }

        self.frames += 1;
        FrameReport {
            pose: self.pose(),
            events,
        }
    }
}
