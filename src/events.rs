/// Why a blink started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkCause {
    Random,
    HardLanding,
}

/// Something noteworthy that happened during one frame step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameEvent {
    Takeoff,
    Landed { impact_speed: f32, hard: bool },
    Released,
    BlinkStarted { cause: BlinkCause },
}
