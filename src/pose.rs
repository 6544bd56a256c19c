//! Read-only snapshot of the character handed to the renderer each frame.

use crate::model::{Character, Rgb, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Bottom-centre anchor.
    pub position: Vec2,
    pub bearing: f32,
    pub squish_offset: f32,
    pub blink_elapsed: Option<f32>,
    pub side_length: f32,
    pub fill_color: Rgb,
}

impl Pose {
    pub fn of(c: &Character) -> Self {
        Self {
            position: c.position,
            bearing: c.bearing,
            squish_offset: c.squish.offset,
            blink_elapsed: c.blink.elapsed(),
            side_length: c.side_length,
            fill_color: c.fill_color,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.side_length / 2.0
    }

    /// Where to draw a second copy so the body appears split across the
    /// horizontal wrap, if it overlaps either edge.
    pub fn ghost_x(&self, world_width: f32) -> Option<f32> {
        let x = self.position.x;
        if x < self.half_width() {
            Some(x + world_width)
        } else if x > world_width - self.half_width() {
            Some(x - world_width)
        } else {
            None
        }
    }
}
