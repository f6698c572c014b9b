//! Software-rendered visualizer using `minifb`.
//!
//! The 3D scene is projected through a fixed camera and painted back to
//! front into a framebuffer: the tree silhouette first, then every
//! attached ornament as a depth-scaled disc (photos get a gold ring,
//! lights get their emissive-scaled palette color), then the status
//! overlay.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 ✦ (star)                     │
//! │        · ·  discs: lights + photos  · ·      │
//! │            ▲ cone silhouette                 │
//! │                                              │
//! │ STATUS: ASSEMBLED  BIAS +0.42                │
//! │ space=fist  arrows=move  h=hide  q=quit      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Keyboard input is polled here and forwarded as [`SimInput`] events; in
//! hardware mode nobody listens and the sends are simply dropped.

use std::sync::mpsc::Sender;

use glam::Vec3;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use hand_gesture::{GestureSnapshot, SimInput};
use ornament_field::palette::scale_brightness;
use ornament_field::{Ornament, OrnamentField, OrnamentKind};

use crate::assets::TexturePool;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 960;
pub const WIN_H: usize = 720;

const BG_COLOR:   u32 = 0xFF0B0B14;
const CONE_COLOR: u32 = 0xFF0A3A22;
const STAR_COLOR: u32 = 0xFFFFD700;
const RING_COLOR: u32 = 0xFFFFD700;
const TEXT_BG:    u32 = 0xFF101826;
const STATUS_Y:   usize = WIN_H - 40;

/// Camera distance from the origin along +z.
const CAM_Z: f32 = 8.0;
/// Vertical field of view, radians (45°).
const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
/// Anything closer than this to the camera plane is clipped.
const NEAR: f32 = 0.5;

/// World-space disc radii.
const PHOTO_RADIUS: f32 = 0.26;
const LIGHT_RADIUS: f32 = 0.08;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    sim_tx: Sender<SimInput>,
    focal:  f32,
    /// Space-bar state from the previous poll, to edge-detect the fist.
    fist_held: bool,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Gesture Tree — hand-controlled ornament formation",
            WIN_W, WIN_H,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )?;
        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            focal: (WIN_H as f32 / 2.0) / (FOV_Y / 2.0).tan(),
            fist_held: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll keyboard input and forward it as [`SimInput`] events.
    /// Returns false when the app should quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }
        if self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            return false;
        }

        // Fist while Space is held; edge-detect so the source sees one
        // event per transition.
        let fist = self.window.is_key_down(Key::Space);
        if fist != self.fist_held {
            self.fist_held = fist;
            let _ = self.sim_tx.send(if fist { SimInput::FistDown } else { SimInput::FistUp });
        }

        if self.window.is_key_pressed(Key::Left, KeyRepeat::Yes) {
            let _ = self.sim_tx.send(SimInput::NudgeLeft);
        }
        if self.window.is_key_pressed(Key::Right, KeyRepeat::Yes) {
            let _ = self.sim_tx.send(SimInput::NudgeRight);
        }
        if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::ToggleHand);
        }

        true
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        field:   &OrnamentField,
        pool:    &TexturePool,
        snap:    &GestureSnapshot,
        elapsed: f32,
    ) {
        self.buf.fill(BG_COLOR);

        self.draw_cone();
        self.draw_star(elapsed);

        // Back-to-front: sort attached ornaments by camera depth.
        let mut order: Vec<&Ornament> = field.ornaments().iter().filter(|o| o.attached).collect();
        order.sort_by(|a, b| {
            let da = CAM_Z - a.position.z;
            let db = CAM_Z - b.position.z;
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
        });
        for o in order {
            self.draw_ornament(o, pool);
        }

        self.draw_overlay(field, pool, snap);

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Projection ────────────────────────────────────────────────────────

    /// Project a world point.  Returns `(sx, sy, depth)`, or `None` when
    /// the point is behind the near plane.
    fn project(&self, p: Vec3) -> Option<(f32, f32, f32)> {
        let depth = CAM_Z - p.z;
        if depth < NEAR {
            return None;
        }
        let sx = WIN_W as f32 / 2.0 + self.focal * p.x / depth;
        let sy = WIN_H as f32 / 2.0 - self.focal * p.y / depth;
        Some((sx, sy, depth))
    }

    // ── Scene elements ────────────────────────────────────────────────────

    /// Dim green silhouette of the tree cone, drawn as stacked horizontal
    /// slices so it foreshortens correctly with the camera.
    fn draw_cone(&mut self) {
        const SLICES: usize = 90;
        for s in 0..SLICES {
            let t = s as f32 / SLICES as f32;
            let y = -1.6 + 4.0 * t;
            let r = 1.55 * (1.0 - t);
            let (Some((lx, sy, _)), Some((rx, _, _))) = (
                self.project(Vec3::new(-r, y, 0.0)),
                self.project(Vec3::new(r, y, 0.0)),
            ) else {
                continue;
            };
            let row = sy as isize;
            if row < 0 || row as usize >= STATUS_Y {
                continue;
            }
            for x in (lx.max(0.0) as usize)..(rx.min(WIN_W as f32 - 1.0) as usize) {
                self.buf[row as usize * WIN_W + x] = CONE_COLOR;
            }
        }
    }

    /// Gold star above the apex, gently pulsing.
    fn draw_star(&mut self, elapsed: f32) {
        if let Some((sx, sy, depth)) = self.project(Vec3::new(0.0, 2.55, 0.0)) {
            let r = (self.focal * 0.18 / depth) as usize;
            let pulse = 1.0 + 0.15 * (elapsed * 2.0).sin();
            self.draw_diamond(sx as usize, sy as usize, (r as f32 * pulse) as usize, STAR_COLOR);
        }
    }

    fn draw_ornament(&mut self, o: &Ornament, pool: &TexturePool) {
        let Some((sx, sy, depth)) = self.project(o.position) else {
            return;
        };
        let (cx, cy) = (sx as isize, sy as isize);

        match o.kind {
            OrnamentKind::Light { color } => {
                let r = (self.focal * LIGHT_RADIUS / depth).max(1.0) as isize;
                // Emissive 1.5–3.0 maps to a visible brightness swing.
                let lit = scale_brightness(color, o.emissive / 2.0);
                self.fill_circle(cx, cy, r, lit);
            }
            OrnamentKind::Photo { slot } => {
                let r = (self.focal * PHOTO_RADIUS / depth).max(2.0) as isize;
                let swatch = pool.swatch(slot).map(|s| s.color).unwrap_or(RING_COLOR);
                // Gold ring, then the photo disc inside it.
                self.fill_circle(cx, cy, r, RING_COLOR);
                self.fill_circle(cx, cy, r - 2, swatch);
                // Spin cue: a highlight dot orbiting with the yaw.
                let hx = cx + ((r as f32 * 0.6) * o.rotation.y.cos()) as isize;
                let hy = cy + ((r as f32 * 0.6) * o.rotation.y.sin()) as isize;
                self.fill_circle(hx, hy, (r / 6).max(1), 0xFFFFFFFF);
            }
        }
    }

    // ── Overlay ───────────────────────────────────────────────────────────

    fn draw_overlay(&mut self, field: &OrnamentField, pool: &TexturePool, snap: &GestureSnapshot) {
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);

        let state = if snap.assembled { "ASSEMBLED" } else { "DISPERSE" };
        let status = format!(
            "{}  BIAS {:+.2}  ORNAMENTS {} ({} PHOTOS / POOL {})",
            state, snap.lateral_bias, field.len(), field.photo_count(), pool.len(),
        );
        let color = if snap.assembled { STAR_COLOR } else { 0xFFD0D0D0 };
        self.draw_label(&status, 10, STATUS_Y + 8, color);

        self.draw_label(
            "SPACE=FIST  LEFT/RIGHT=MOVE HAND  H=HIDE HAND  Q=QUIT",
            10, WIN_H - 14, 0xFF808080,
        );
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && (x as usize) < WIN_W && y >= 0 && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn fill_circle(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        if r <= 0 {
            self.set_pixel(cx, cy, color);
            return;
        }
        for dy in -r..=r {
            let half = ((r * r - dy * dy) as f32).sqrt() as isize;
            for dx in -half..=half {
                self.set_pixel(cx + dx, cy + dy, color);
            }
        }
    }

    fn draw_diamond(&mut self, cx: usize, cy: usize, r: usize, color: u32) {
        let (cx, cy, r) = (cx as isize, cy as isize, r as isize);
        for dy in -r..=r {
            let span = r - dy.abs();
            for dx in -span..=span {
                self.set_pixel(cx + dx, cy + dy, color);
            }
        }
    }

    /// Minimal 3×5 bitmap font for the status line (digits, upper-case
    /// letters, and a little punctuation).
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x as isize;
        for ch in text.chars() {
            let glyph = glyph_rows(ch.to_ascii_uppercase());
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3isize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y as isize + row as isize, color);
                    }
                }
            }
            cx += 4;
            if cx + 4 > WIN_W as isize {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn glyph_rows(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b011, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b110, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b010, 0b010, 0b010, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b111, 0b101, 0b101, 0b101, 0b111], // unknown: hollow box
    }
}
