//! Control state sampled once per frame.

/// Immutable view of the controls for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputSnapshot {
    /// Horizontal steering sign: -1 left, 1 right, 0 none. Left wins when both are held.
    pub fn steer(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    pub fn is_steering(&self) -> bool {
        self.left || self.right
    }
}

/// Something that knows which controls are currently engaged.
pub trait InputSource {
    fn is_jump_engaged(&self) -> bool;
    fn is_left_engaged(&self) -> bool;
    fn is_right_engaged(&self) -> bool;

    fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            left: self.is_left_engaged(),
            right: self.is_right_engaged(),
            jump: self.is_jump_engaged(),
        }
    }
}

impl InputSource for InputSnapshot {
    fn is_jump_engaged(&self) -> bool {
        self.jump
    }

    fn is_left_engaged(&self) -> bool {
        self.left
    }

    fn is_right_engaged(&self) -> bool {
        self.right
    }
}
