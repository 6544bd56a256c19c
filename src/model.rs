//! Value types for the character and the world it lives in.

use crate::blink::BlinkTimer;
use crate::constants::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH, FILL_COLOR, SIDE_LENGTH};
use crate::error::SimError;
use crate::jump::JumpState;
use crate::spring::Squish;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Horizontal extent and ground level of the world, in pixels.
///
/// `y` grows downward; the ground sits at `y == height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct World {
    width: f32,
    height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SimError::InvalidWorldBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

/// The one simulated entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    /// Bottom-centre anchor.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Signed lean; drives the eye offset when drawn.
    pub bearing: f32,
    pub squish: Squish,
    pub blink: BlinkTimer,
    pub jump_state: JumpState,
    pub side_length: f32,
    pub fill_color: Rgb,
}

impl Character {
    /// Standing still at the middle of the floor.
    pub fn spawn(world: &World) -> Self {
        let (r, g, b) = FILL_COLOR;
        Self {
            position: Vec2::new(world.width() / 2.0, world.height()),
            velocity: Vec2::ZERO,
            bearing: 0.0,
            squish: Squish::default(),
            blink: BlinkTimer::default(),
            jump_state: JumpState::Idle,
            side_length: SIDE_LENGTH,
            fill_color: Rgb::new(r, g, b),
        }
    }

    pub fn is_grounded(&self, world: &World) -> bool {
        self.position.y == world.height()
    }
}
