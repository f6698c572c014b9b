//! # ornament_field
//!
//! The placement engine: every decorative entity owns two static targets
//! (one on the tree spiral, one on the scattered shell) and eases its
//! rendered pose toward whichever target the shared gesture state selects,
//! shifted rigidly by the smoothed lateral bias.
//!
//! Entities never carry their own copy of the gesture: the whole field
//! reads one [`GestureSnapshot`](hand_gesture::GestureSnapshot) per frame,
//! so every ornament reacts to the same instantaneous control signal while
//! keeping its own static targets.

pub mod entity;
pub mod field;
pub mod palette;

pub use entity::{Ornament, OrnamentKind, ASSEMBLE_SPEED, SCATTER_SPEED, SPIN_RATE};
pub use field::OrnamentField;
pub use palette::LIGHT_PALETTE;
