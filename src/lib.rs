//! Physics and procedural animation for a single side-view character: running
//! with inertia, gravity, a ground-gated jump, a squash-and-stretch spring,
//! horizontal screen wrap and eye blinks.
//!
//! The core never polls devices or draws. Each frame the host samples an
//! [`InputSnapshot`], measures `dt`, calls [`Sim::step`] and draws the returned
//! [`Pose`].

pub mod blink;
pub mod clock;
pub mod constants;
pub mod error;
pub mod events;
pub mod input;
pub mod jump;
pub mod model;
pub mod physics;
pub mod pose;
pub mod sim;
pub mod spring;

pub use blink::BlinkTimer;
pub use clock::{sanitize_dt, FrameClock};
pub use error::SimError;
pub use events::{BlinkCause, FrameEvent};
pub use input::{InputSnapshot, InputSource};
pub use jump::JumpState;
pub use model::{Character, Rgb, Vec2, World};
pub use physics::{wrap_x, Landing};
pub use pose::Pose;
pub use sim::{FrameReport, Sim};
pub use spring::Squish;
