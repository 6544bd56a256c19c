use boxdude::InputSource;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Without release events a key counts as held for this long after its last
/// press or auto-repeat. Long enough to bridge the usual initial repeat delay.
const HOLD_WINDOW: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, Default)]
struct KeyLatch {
    down: bool,
    until: Option<Instant>,
}

impl KeyLatch {
    fn press(&mut self, now: Instant, release_events: bool) {
        if release_events {
            self.down = true;
        } else {
            self.until = Some(now + HOLD_WINDOW);
        }
    }

    fn release(&mut self) {
        self.down = false;
        self.until = None;
    }

    fn is_down(&self, now: Instant) -> bool {
        self.down || self.until.is_some_and(|u| now <= u)
    }
}

#[derive(Clone, Copy, Debug)]
enum Control {
    Left,
    Right,
    Jump,
}

/// Keyboard-backed controls. Call [`TerminalInput::poll`] once per frame, then
/// read the held state through [`InputSource`].
pub(crate) struct TerminalInput {
    left: KeyLatch,
    right: KeyLatch,
    jump: KeyLatch,
    release_events: bool,
    sampled_at: Instant,
    quit: bool,
}

impl TerminalInput {
    /// `release_events`: the terminal reports key releases (keyboard enhancement).
    pub(crate) fn new(release_events: bool) -> Self {
        Self {
            left: KeyLatch::default(),
            right: KeyLatch::default(),
            jump: KeyLatch::default(),
            release_events,
            sampled_at: Instant::now(),
            quit: false,
        }
    }

    /// Drains pending terminal events without blocking.
    pub(crate) fn poll(&mut self) -> anyhow::Result<()> {
        let mut handled = 0;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(k) = event::read()? {
                self.handle_key(k, Instant::now());
            }
            handled += 1;
            if handled >= 64 {
                break;
            }
        }
        self.sampled_at = Instant::now();
        Ok(())
    }

    pub(crate) fn quit_requested(&self) -> bool {
        self.quit
    }

    fn handle_key(&mut self, k: KeyEvent, now: Instant) {
        if matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && k.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.quit = true;
            return;
        }
        let control = match k.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Control::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Control::Right),
            KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
                Some(Control::Jump)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                if k.kind != KeyEventKind::Release {
                    self.quit = true;
                }
                None
            }
            _ => None,
        };
        let Some(control) = control else {
            return;
        };
        let latch = match control {
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Jump => &mut self.jump,
        };
        match k.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => latch.press(now, self.release_events),
            KeyEventKind::Release => latch.release(),
        }
    }
}

impl InputSource for TerminalInput {
    fn is_jump_engaged(&self) -> bool {
        self.jump.is_down(self.sampled_at)
    }

    fn is_left_engaged(&self) -> bool {
        self.left.is_down(self.sampled_at)
    }

    fn is_right_engaged(&self) -> bool {
        self.right.is_down(self.sampled_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn press_and_release_with_release_events() {
        let mut input = TerminalInput::new(true);
        let t0 = Instant::now();
        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), t0);
        input.sampled_at = t0 + Duration::from_secs(5);
        assert!(input.is_jump_engaged());
        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Release), t0);
        assert!(!input.is_jump_engaged());
    }

    #[test]
    fn hold_window_expires_without_release_events() {
        let mut input = TerminalInput::new(false);
        let t0 = Instant::now();
        input.handle_key(key(KeyCode::Left, KeyEventKind::Press), t0);
        input.sampled_at = t0 + Duration::from_millis(100);
        assert!(input.is_left_engaged());
        assert!(!input.is_right_engaged());
        input.sampled_at = t0 + HOLD_WINDOW + Duration::from_millis(1);
        assert!(!input.is_left_engaged());
    }

    #[test]
    fn repeat_extends_hold() {
        let mut input = TerminalInput::new(false);
        let t0 = Instant::now();
        input.handle_key(key(KeyCode::Right, KeyEventKind::Press), t0);
        let t1 = t0 + Duration::from_millis(400);
        input.handle_key(key(KeyCode::Right, KeyEventKind::Repeat), t1);
        input.sampled_at = t0 + Duration::from_millis(800);
        assert!(input.is_right_engaged());
    }

    #[test]
    fn quit_keys() {
        let mut input = TerminalInput::new(false);
        input.handle_key(key(KeyCode::Char('x'), KeyEventKind::Press), Instant::now());
        assert!(!input.quit_requested());
        input.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(input.quit_requested());
    }

    #[test]
    fn snapshot_reflects_latches() {
        let mut input = TerminalInput::new(true);
        let now = Instant::now();
        input.handle_key(key(KeyCode::Up, KeyEventKind::Press), now);
        input.sampled_at = now;
        let snap = input.snapshot();
        assert!(snap.jump && !snap.left && !snap.right);
    }
}
