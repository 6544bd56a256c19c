//! Jump state machine.
//!
//! The machine only decides the next state. Applying the jump impulse and
//! detecting touchdown belong to the frame step and the integrator.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum JumpState {
    /// Grounded, no jump requested.
    #[default]
    Idle,
    /// Airborne because of a jump.
    Jumping,
    /// Back on the ground with jump still held. Blocks re-triggering until released.
    Landed,
}

/// Next state from the sampled jump control and ground contact, or `None`
/// when the state does not change.
///
/// Touchdown (`Jumping -> Landed`) is not decided here: it is detected during
/// integration, in the same frame the contact happens.
pub fn advance(state: JumpState, jump_held: bool, grounded: bool) -> Option<JumpState> {
    match (state, jump_held, grounded) {
        (JumpState::Idle, true, true) => Some(JumpState::Jumping),
        (JumpState::Idle, true, false) => None,
        (JumpState::Idle, false, _) => None,
        // releasing mid-air does not cancel the jump
        (JumpState::Jumping, _, _) => None,
        (JumpState::Landed, false, true) => Some(JumpState::Idle),
        (JumpState::Landed, false, false) => None,
        (JumpState::Landed, true, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use JumpState::*;

    #[test]
    fn full_transition_table() {
        let cases = [
            (Idle, true, true, Some(Jumping)),
            (Idle, true, false, None),
            (Idle, false, true, None),
            (Idle, false, false, None),
            (Jumping, true, true, None),
            (Jumping, true, false, None),
            (Jumping, false, true, None),
            (Jumping, false, false, None),
            (Landed, true, true, None),
            (Landed, true, false, None),
            (Landed, false, true, Some(Idle)),
            (Landed, false, false, None),
        ];
        for (state, held, grounded, expected) in cases {
            assert_eq!(
                advance(state, held, grounded),
                expected,
                "{state:?} held={held} grounded={grounded}"
            );
        }
    }

    #[test]
    fn holding_after_landing_does_not_rejump() {
        let mut state = Landed;
        for _ in 0..10 {
            if let Some(next) = advance(state, true, true) {
                state = next;
            }
        }
        assert_eq!(state, Landed);
        state = advance(state, false, true).unwrap_or(state);
        assert_eq!(state, Idle);
        assert_eq!(advance(state, true, true), Some(Jumping));
    }
}
