//! Fixed physical constants. Speeds and accelerations are in pixels per second.

/// Length of the dude's side, pixels.
pub const SIDE_LENGTH: f32 = 30.0;

/// Body fill colour (orange).
pub const FILL_COLOR: (u8, u8, u8) = (255, 119, 0);

pub const DEFAULT_WORLD_WIDTH: f32 = 400.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 400.0;

/// Unitless factor applied to horizontal velocity each grounded frame without input.
pub const FRICTION: f32 = 0.95;

/// Unitless factor applied to bearing each frame without horizontal input.
pub const BEARING_FRICTION: f32 = 0.8;

pub const GRAVITY: f32 = 1400.0;
pub const MAX_VEL: f32 = 240.0;

/// Never used for clamping: bearing is bounded by `MAX_VEL`.
pub const MAX_BEARING: f32 = MAX_VEL * 0.9;

pub const ACCEL: f32 = 900.0;
pub const AIR_BENDING: f32 = 375.0;
pub const BEARING_ACCEL: f32 = 1200.0;

/// Negative is up.
pub const JUMP_IMPULSE: f32 = -700.0;

pub const MAX_SQUISH_VEL: f32 = 80.0;
pub const SQUISH_STIFFNESS: f32 = 200.0;
pub const SQUISH_DAMPING: f32 = 8.5;
pub const SQUISH_REST_THRESHOLD: f32 = 0.2;

/// Landing impulse divisor: `squish.velocity = -impact_speed / LANDING_SQUISH_DIVISOR`.
pub const LANDING_SQUISH_DIVISOR: f32 = 5.0;

/// Max downward speed while holding jump.
pub const JUMP_TERMINAL_VELOCITY: f32 = 250.0;
pub const TERMINAL_VELOCITY: f32 = 550.0;

pub const BLINK_CYCLE_SECONDS: f32 = 0.25;
pub const BLINK_ODDS_PER_FRAME: f64 = 1.0 / 250.0;

/// Largest timestep a single frame may advance by. Longer stalls slow the
/// simulation down instead of destabilising the squish spring.
pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;
