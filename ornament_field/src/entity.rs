//! A single decorative entity and its per-frame motion integrator.

use glam::Vec3;
use rand::Rng;

use hand_gesture::GestureSnapshot;
use tree_layout::{scatter_target, spiral_target, RadiusBand};

// Motion constants (empirically tuned)
/// Position lerp factor per frame while assembling — snappy convergence.
pub const ASSEMBLE_SPEED: f32 = 0.08;
/// Position lerp factor per frame while dispersing — languid drift.
pub const SCATTER_SPEED: f32 = 0.04;
/// Fixed per-frame spin, radians.
pub const SPIN_RATE: f32 = 0.01;
/// Per-frame ease of roll/pitch toward zero while assembled.
const UPRIGHT_EASE: f32 = 0.1;

// Breathing glow: emissive = BASE + sin(t·FREQ + x)·AMP, range 1.5–3.0.
const EMISSIVE_BASE: f32 = 2.0;
const EMISSIVE_AMP: f32 = 0.5;
const EMISSIVE_FREQ: f32 = 3.0;

// ════════════════════════════════════════════════════════════════════════════
// OrnamentKind
// ════════════════════════════════════════════════════════════════════════════

/// The visual payload of an entity, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrnamentKind {
    /// Carries one image from the texture pool.  `slot` is a pool index;
    /// several ornaments may share a slot when the pool is smaller than
    /// the photo count.
    Photo { slot: usize },
    /// An emissive point light with a fixed palette color.
    Light { color: u32 },
}

// ════════════════════════════════════════════════════════════════════════════
// Ornament
// ════════════════════════════════════════════════════════════════════════════

/// One decorative entity.
///
/// Both targets are computed once at construction and never change; only
/// `position`, `rotation` and `emissive` advance, once per rendered frame.
#[derive(Clone, Debug)]
pub struct Ornament {
    /// Creation-order rank; sole layout input besides the total count.
    pub index: usize,
    pub kind:  OrnamentKind,

    /// Fixed point on the tree spiral.
    pub assembled_target: Vec3,
    /// Fixed point on the randomized outer shell.
    pub scattered_target: Vec3,

    /// Rendered position, eased toward the active target every frame.
    pub position: Vec3,
    /// Euler rotation (pitch, yaw, roll).
    pub rotation: Vec3,
    /// Emissive intensity; lights breathe between 1.5 and 3.0, photos stay 0.
    pub emissive: f32,

    /// False until the renderer has picked the entity up.  An unattached
    /// ornament skips integration for the frame — no error, it resumes as
    /// soon as it is attached.
    pub attached: bool,
}

impl Ornament {
    /// Build an entity: spiral target from `(index, total)`, scattered
    /// target sampled once from the band matching its kind.  Starts at the
    /// scattered target, unattached.
    pub fn new<R: Rng + ?Sized>(index: usize, total: usize, kind: OrnamentKind, rng: &mut R) -> Self {
        let band = match kind {
            OrnamentKind::Photo { .. } => RadiusBand::PHOTO,
            OrnamentKind::Light { .. } => RadiusBand::LIGHT,
        };
        let scattered = scatter_target(rng, band);

        Ornament {
            index,
            kind,
            assembled_target: spiral_target(index, total),
            scattered_target: scattered,
            position: scattered,
            rotation: Vec3::ZERO,
            emissive: match kind {
                OrnamentKind::Light { .. } => EMISSIVE_BASE,
                OrnamentKind::Photo { .. } => 0.0,
            },
            attached: false,
        }
    }

    /// The target this frame actually eases toward: the active formation
    /// target plus the lateral bias as a rigid horizontal shift.
    pub fn effective_target(&self, snap: &GestureSnapshot) -> Vec3 {
        let base = if snap.assembled { self.assembled_target } else { self.scattered_target };
        base + Vec3::new(snap.lateral_bias, 0.0, 0.0)
    }

    /// Advance one frame.  `elapsed` is seconds since startup (drives the
    /// glow phase).  Does nothing while unattached.
    pub fn tick(&mut self, snap: &GestureSnapshot, elapsed: f32) {
        if !self.attached {
            return;
        }

        let target = self.effective_target(snap);
        let speed = if snap.assembled { ASSEMBLE_SPEED } else { SCATTER_SPEED };
        self.position = self.position.lerp(target, speed);

        if snap.assembled {
            // On the tree: face outward — roll/pitch flatten, yaw keeps a
            // slow spin.
            self.rotation.y += SPIN_RATE;
            self.rotation.x += (0.0 - self.rotation.x) * UPRIGHT_EASE;
            self.rotation.z += (0.0 - self.rotation.z) * UPRIGHT_EASE;
        } else {
            // In the cloud: free tumble.
            self.rotation.x += SPIN_RATE;
            self.rotation.y += SPIN_RATE;
        }

        if let OrnamentKind::Light { .. } = self.kind {
            // Phase-shift by x so the lights never blink in unison.
            self.emissive = EMISSIVE_BASE
                + (elapsed * EMISSIVE_FREQ + self.position.x).sin() * EMISSIVE_AMP;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
