//! Shared gesture state — one writer per detection tick, many readers per
//! rendered frame.
//!
//! The discrete assembled flag is overwritten directly so the formation
//! transition stays crisp.  The lateral bias only ever moves through a
//! first-order low-pass filter (`bias' = lerp(bias, sample, 0.2)`), so it
//! cannot jump between ticks no matter how jittery the detections are.
//!
//! Both fields are read under one lock as a [`GestureSnapshot`], so a
//! reader can never observe a flag/bias pair from two different ticks.
//! Readers never block behind each other and the single writer holds the
//! lock only for the few instructions of an update.

use std::sync::Mutex;

use crate::classify::RawGesture;

/// Per-tick smoothing factor for the lateral bias.  Empirically tuned.
pub const BIAS_SMOOTHING: f32 = 0.2;

/// Linear interpolation, the only way the bias is ever advanced.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// One coherent read of the gesture state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSnapshot {
    /// True while the hand pose is classified as a closed fist.
    pub assembled: bool,
    /// Smoothed lateral bias, roughly `[-1.75, 1.75]`.
    pub lateral_bias: f32,
}

impl GestureSnapshot {
    pub const INITIAL: GestureSnapshot = GestureSnapshot { assembled: false, lateral_bias: 0.0 };
}

// ════════════════════════════════════════════════════════════════════════════
// GestureStore
// ════════════════════════════════════════════════════════════════════════════

/// Process-wide gesture state.  Created once at startup, shared by
/// reference with every consumer, and never destroyed during the session.
#[derive(Debug)]
pub struct GestureStore {
    state: Mutex<GestureSnapshot>,
}

impl Default for GestureStore {
    fn default() -> Self {
        GestureStore::new()
    }
}

impl GestureStore {
    /// Starts scattered and centered.
    pub fn new() -> Self {
        GestureStore { state: Mutex::new(GestureSnapshot::INITIAL) }
    }

    /// Publish one classifier tick.  Call from exactly one place.
    ///
    /// A "no hand detected" tick arrives here as [`RawGesture::NEUTRAL`],
    /// so the flag drops immediately and the bias decays toward zero under
    /// the same smoothing law as any other sample.
    pub fn update(&self, raw: RawGesture) {
        // A poisoned lock still holds a valid snapshot; keep going.
        let mut state = match self.state.lock() {
            Ok(g) => g,
            Err(p) => p.into_inner(),
        };
        state.assembled = raw.assembled;
        state.lateral_bias = lerp(state.lateral_bias, raw.lateral_offset, BIAS_SMOOTHING);
    }

    /// Read the current state as one coherent pair.
    pub fn snapshot(&self) -> GestureSnapshot {
        match self.state.lock() {
            Ok(g) => *g,
            Err(p) => *p.into_inner(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
