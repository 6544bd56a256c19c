use boxdude::{Pose, World};
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::f32::consts::PI;
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            *c = Cell {
                bg,
                ..Cell::default()
            };
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pixel {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl Pixel {
    pub(crate) const CLEAR: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub(crate) const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

pub(crate) struct PixelCanvas {
    pub(crate) w: u32,
    pub(crate) h: u32,
    pub(crate) px: Vec<Pixel>,
}

impl PixelCanvas {
    pub(crate) fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            px: vec![Pixel::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn clear(&mut self, p: Pixel) {
        self.px.fill(p);
    }
    fn put(&mut self, x: i32, y: i32, p: Pixel) {
        if x < 0 || y < 0 || x as u32 >= self.w || y as u32 >= self.h {
            return;
        }
        let i = self.idx(x as u32, y as u32);
        self.px[i] = p;
    }

    // half-open pixel range [start, end) limited to the canvas
    fn clip_x(&self, start: f32, end: f32) -> (i32, i32) {
        clip_span(start, end, self.w)
    }

    fn clip_y(&self, start: f32, end: f32) -> (i32, i32) {
        clip_span(start, end, self.h)
    }

    /// Fills pixels whose centres fall inside `[x0, x1) x [y0, y1)`.
    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, p: Pixel) {
        let (xa, xb) = (x0.min(x1), x0.max(x1));
        let (ya, yb) = (y0.min(y1), y0.max(y1));
        let (xs, xe) = self.clip_x((xa - 0.5).ceil(), (xb - 0.5).ceil());
        let (ys, ye) = self.clip_y((ya - 0.5).ceil(), (yb - 0.5).ceil());
        for y in ys..ye {
            for x in xs..xe {
                self.put(x, y, p);
            }
        }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, r: f32, p: Pixel) {
        let r = r.max(0.5);
        let (xs, xe) = self.clip_x((cx - r).floor(), (cx + r).ceil() + 1.0);
        let (ys, ye) = self.clip_y((cy - r).floor(), (cy + r).ceil() + 1.0);
        for y in ys..ye {
            for x in xs..xe {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.put(x, y, p);
                }
            }
        }
    }
}

fn clip_span(start: f32, end: f32, len: u32) -> (i32, i32) {
    let len = len as f32;
    // NaN clamps to NaN and casts to 0, giving an empty range
    let a = start.clamp(0.0, len) as i32;
    let b = end.clamp(0.0, len) as i32;
    (a, b.max(a))
}

/// Maps world pixels onto the canvas: uniform scale, centred horizontally,
/// ground on the row just above the floor line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Viewport {
    pub(crate) scale: f32,
    pub(crate) origin_x: f32,
    pub(crate) origin_y: f32,
    pub(crate) floor_row: i32,
}

impl Viewport {
    /// `top` canvas rows are left for the text overlay.
    pub(crate) fn fit(world: &World, canvas: &PixelCanvas, top: u32) -> Self {
        let avail_h = canvas.h.saturating_sub(top + 1).max(1) as f32;
        let scale = (canvas.w as f32 / world.width()).min(avail_h / world.height());
        let origin_x = (canvas.w as f32 - world.width() * scale) / 2.0;
        let origin_y = top as f32 + avail_h - world.height() * scale;
        Self {
            scale,
            origin_x,
            origin_y,
            floor_row: (top as f32 + avail_h) as i32,
        }
    }

    fn x(&self, wx: f32) -> f32 {
        self.origin_x + wx * self.scale
    }

    fn y(&self, wy: f32) -> f32 {
        self.origin_y + wy * self.scale
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
    pub(crate) canvas: PixelCanvas,
    enhanced_keys: bool,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        // key release events make "held" exact; not every terminal has them
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let (cols, rows) = terminal::size()?;
        let prev = CellBuffer::new(cols, rows);
        let cur = CellBuffer::new(cols, rows);

        // Braille: 2×4 pixels per cell
        let canvas = PixelCanvas::new(cols as u32 * 2, rows as u32 * 4);

        Ok(Self {
            out,
            cols,
            rows,
            prev,
            cur,
            canvas,
            enhanced_keys,
        })
    }

    pub(crate) fn reports_key_release(&self) -> bool {
        self.enhanced_keys
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        if self.enhanced_keys {
            queue!(self.out, PopKeyboardEnhancementFlags)?;
        }
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        self.canvas = PixelCanvas::new(c as u32 * 2, r as u32 * 4);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/* -----------------------------
   Braille encoding: 2×4 pixels -> U+2800..U+28FF
------------------------------ */

fn braille_bit(dx: u32, dy: u32) -> u8 {
    // Dot mapping:
    // (0,0)=1 (0,1)=2 (0,2)=4 (0,3)=64
    // (1,0)=8 (1,1)=16 (1,2)=32 (1,3)=128
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0x00,
    }
}

pub(crate) fn canvas_to_cells(
    canvas: &PixelCanvas,
    out: &mut CellBuffer,
    enable_color: bool,
    bg: Color,
) {
    let cols = out.w as u32;
    let rows = out.h as u32;

    for cy in 0..rows {
        for cx in 0..cols {
            let mut mask: u8 = 0;
            let (mut sum_r, mut sum_g, mut sum_b) = (0u32, 0u32, 0u32);
            let mut ink_count: u32 = 0;

            for dy in 0..4 {
                for dx in 0..2 {
                    let x = cx * 2 + dx;
                    let y = cy * 4 + dy;
                    if x >= canvas.w || y >= canvas.h {
                        continue;
                    }
                    let p = canvas.px[canvas.idx(x, y)];
                    if p.a >= 32 {
                        mask |= braille_bit(dx, dy);
                        sum_r += p.r as u32;
                        sum_g += p.g as u32;
                        sum_b += p.b as u32;
                        ink_count += 1;
                    }
                }
            }

            if mask == 0 {
                continue;
            }
            let ch = char::from_u32(0x2800 + mask as u32).unwrap_or(' ');
            let fg = if enable_color {
                Color::Rgb {
                    r: (sum_r / ink_count) as u8,
                    g: (sum_g / ink_count) as u8,
                    b: (sum_b / ink_count) as u8,
                }
            } else {
                Color::White
            };
            out.set(cx as u16, cy as u16, Cell { ch, fg, bg });
        }
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg });
    }
}

/* -----------------------------
   Character drawing
------------------------------ */

const FLOOR: Pixel = Pixel::opaque(90, 90, 90);
const EYE_WHITE: Pixel = Pixel::opaque(255, 255, 255);

/// Vertical/horizontal stretch per pixel of squish offset.
const SQUISH_Y: f32 = 1.6;
const SQUISH_X: f32 = 0.8;

pub(crate) fn draw_floor(canvas: &mut PixelCanvas, vp: &Viewport, world: &World) {
    let y = vp.floor_row as f32 + 0.5;
    canvas.fill_rect(vp.x(0.0), y - 0.5, vp.x(world.width()), y + 0.5, FLOOR);
}

/// Draws the pose, plus a second copy across the wrap seam when it straddles an edge.
pub(crate) fn draw_pose(canvas: &mut PixelCanvas, vp: &Viewport, pose: &Pose, world: &World) {
    draw_pose_at(canvas, vp, pose, pose.position.x);
    if let Some(ghost) = pose.ghost_x(world.width()) {
        draw_pose_at(canvas, vp, pose, ghost);
    }
    // nothing may spill into the letterbox margins
    let (w, h) = (canvas.w as f32, canvas.h as f32);
    canvas.fill_rect(0.0, 0.0, vp.x(0.0), h, Pixel::CLEAR);
    canvas.fill_rect(vp.x(world.width()), 0.0, w, h, Pixel::CLEAR);
}

fn draw_pose_at(canvas: &mut PixelCanvas, vp: &Viewport, pose: &Pose, x: f32) {
    let y = pose.position.y;
    let s = pose.side_length;
    let half = pose.half_width();
    let squish = pose.squish_offset;
    let body = Pixel::opaque(pose.fill_color.r, pose.fill_color.g, pose.fill_color.b);

    let body_w = s - squish * SQUISH_X;
    let body_h = s + squish * SQUISH_Y;
    canvas.fill_rect(
        vp.x(x - body_w / 2.0),
        vp.y(y - body_h),
        vp.x(x + body_w / 2.0),
        vp.y(y),
        body,
    );

    let lean = (pose.bearing / boxdude::constants::MAX_VEL).abs();
    let dir = if pose.bearing < 0.0 { -1.0 } else { 1.0 };
    let eye_x = x + lerp(0.0, half - 6.0, lean) * dir;
    let pupil_x = x + lerp(0.0, half - 3.0, lean) * dir;
    let eye_y = y - s + 8.0 - squish;

    canvas.fill_disc(vp.x(eye_x), vp.y(eye_y), 5.0 * vp.scale, EYE_WHITE);
    canvas.fill_disc(vp.x(pupil_x), vp.y(eye_y), 1.5 * vp.scale, Pixel::CLEAR);

    if let Some(elapsed) = pose.blink_elapsed {
        let lid_top = eye_y - 6.0;
        let lid_bottom = lid_top + eyelid_drop(elapsed);
        canvas.fill_rect(
            vp.x(x - half + 3.0),
            vp.y(lid_top),
            vp.x(x + half - 3.0),
            vp.y(lid_bottom),
            body,
        );
    }
}

/// How far the eyelid has come down, in world pixels: a half sine over the cycle.
pub(crate) fn eyelid_drop(elapsed: f32) -> f32 {
    let cycle = (elapsed / boxdude::constants::BLINK_CYCLE_SECONDS).clamp(0.0, 1.0);
    12.0 * (PI * cycle).sin()
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
