//! # hand_gesture
//!
//! The gesture-to-signal half of the display: a stream of hand-landmark
//! detections goes in, a discrete *assembled* verdict and a smoothed
//! *lateral bias* come out.
//!
//! ## Pipeline
//!
//! ```text
//! DetectorSource ──(Option<HandFrame> per tick)──▶ classify ──▶ GestureStore
//!    (own thread)                                                 │
//!                                              snapshot() ◀───────┘
//!                                         (read once per rendered frame)
//! ```
//!
//! * [`classify`](classify::classify) turns one detection into a
//!   [`RawGesture`](classify::RawGesture): closed fist ⇒ assembled, wrist
//!   horizontal position ⇒ signed lateral offset.  No hand ⇒ the scattered,
//!   centered default.
//! * [`GestureStore`](store::GestureStore) is the single source of truth:
//!   one writer per tick, many readers per frame.  The discrete flag is
//!   overwritten directly (crisp transitions); the bias only ever moves
//!   through a first-order low-pass filter (no jumps).
//! * [`DetectorSource`](source::DetectorSource) abstracts where detections
//!   come from: a keyboard-driven synthetic hand by default, or a real
//!   tracker behind the `leap` feature.  Both deliver the same
//!   `Option<HandFrame>` ticks, so the whole pipeline downstream of the
//!   camera is exercised identically in simulation.

pub mod classify;
pub mod landmark;
pub mod source;
pub mod store;

pub use classify::{classify, RawGesture};
pub use landmark::{HandFrame, Landmark};
pub use source::{spawn_detector, DetectorHandle, DetectorSource, SimDetectorSource, SimInput};
pub use store::{GestureSnapshot, GestureStore};
