use crate::config::Settings;
use crate::overlay::{Instructions, LINES};
use crate::render::{canvas_to_cells, draw_floor, draw_pose, draw_text, Pixel, Terminal, Viewport};
use crate::terminal_input::TerminalInput;
use anyhow::Context;
use boxdude::{FrameClock, FrameEvent, InputSnapshot, InputSource, JumpState, Pose, Sim, World};
use crossterm::style::Color;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Canvas rows kept free above the world for the instructions text.
const OVERLAY_ROWS: u16 = 3;

pub(crate) struct App {
    settings: Settings,
    sim: Sim,
    term: Terminal,
    input: TerminalInput,
    instructions: Instructions,
}

impl App {
    fn init(settings: Settings) -> anyhow::Result<Self> {
        let world = World::new(settings.world_width, settings.world_height)
            .context("invalid world size in settings")?;
        let sim = Sim::new(world, settings.seed);
        let term = Terminal::begin()?;
        let input = TerminalInput::new(term.reports_key_release());
        info!(
            width = world.width(),
            height = world.height(),
            seed = settings.seed,
            key_release = term.reports_key_release(),
            "starting"
        );
        let instructions = Instructions::new(settings.show_instructions);
        Ok(Self {
            settings,
            sim,
            term,
            input,
            instructions,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap;
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let mut clock = FrameClock::start();

        loop {
            let frame_start = Instant::now();
            self.term.resize_if_needed()?;

            self.input.poll()?;
            if self.input.quit_requested() {
                break;
            }
            let snapshot = self.input.snapshot();

            let dt = clock.tick();
            let report = self.sim.step(snapshot, dt);
            log_events(&report.events, self.sim.frames());

            let moving = self.fade_trigger(&snapshot);
            let brightness = self.instructions.advance(dt, moving);
            self.render_frame(&report.pose, brightness)?;

            spin_sleep(frame_dt, frame_start);
        }

        info!(frames = self.sim.frames(), "quit");
        Ok(())
    }

    fn fade_trigger(&self, input: &InputSnapshot) -> bool {
        input.is_steering() || self.sim.character().jump_state == JumpState::Jumping
    }

    fn render_frame(&mut self, pose: &Pose, brightness: Option<u8>) -> anyhow::Result<()> {
        let bg = Color::Black;
        let world = *self.sim.world();
        self.term.cur.clear(bg);
        self.term.canvas.clear(Pixel::CLEAR);

        let top = OVERLAY_ROWS as u32 * 4;
        let vp = Viewport::fit(&world, &self.term.canvas, top);
        draw_floor(&mut self.term.canvas, &vp, &world);
        draw_pose(&mut self.term.canvas, &vp, pose, &world);
        canvas_to_cells(
            &self.term.canvas,
            &mut self.term.cur,
            self.settings.enable_color,
            bg,
        );

        if let Some(v) = brightness {
            let fg = if self.settings.enable_color {
                Color::Rgb { r: v, g: v, b: v }
            } else {
                Color::White
            };
            for (i, line) in LINES.iter().enumerate() {
                draw_text(&mut self.term.cur, 1, i as u16, line, fg, bg);
            }
        }

        self.term.present()
    }
}

fn log_events(events: &[FrameEvent], frame: u64) {
    for ev in events {
        debug!(frame, event = ?ev, "frame event");
    }
}

pub(crate) fn run(settings: Settings) -> anyhow::Result<()> {
    let mut app = App::init(settings)?;
    let res = app.run();
    // restore the terminal even when the loop failed
    let restored = app.term.end();
    first_failure(res, restored)
}

/// The loop's own error wins; a restore failure on top of it only gets logged.
fn first_failure(res: anyhow::Result<()>, restored: anyhow::Result<()>) -> anyhow::Result<()> {
    if let (Err(run_err), Err(end_err)) = (&res, &restored) {
        error!(error = %end_err, "terminal restore failed after: {run_err:#}");
    }
    res.and(restored)
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, start: Instant) {
    let end = start + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn loop_error_survives_failed_restore() {
        let err = first_failure(Err(anyhow!("render")), Err(anyhow!("restore"))).unwrap_err();
        assert_eq!(err.to_string(), "render");
    }

    #[test]
    fn restore_error_reported_when_loop_was_fine() {
        let err = first_failure(Ok(()), Err(anyhow!("restore"))).unwrap_err();
        assert_eq!(err.to_string(), "restore");
        assert!(first_failure(Ok(()), Ok(())).is_ok());
    }
}
