//! # gesture_tree
//!
//! Interactive holiday-tree display.  N decorative ornaments continuously
//! migrate between a scattered cloud and an assembled spiral tree, driven
//! by the viewer's hand: a closed fist assembles the tree, an open hand
//! disperses it, and moving the hand sideways sways the whole formation.
//!
//! ## Pipeline
//!
//! ```text
//! detector tick ─▶ classify ─▶ GestureStore ─▶ (per frame) OrnamentField ─▶ render
//! ```
//!
//! ## Input modes
//!
//! * (default) — **Simulation mode**: keyboard drives a synthetic hand.
//! * `leap` — **Hardware mode**: a real LeapMotion tracker via LeapC.
//!
//! ### Simulation keyboard controls
//!
//! | Key | Hand |
//! |---|---|
//! | `Space` (hold) | Close the fist — assemble |
//! | `←` / `→` | Move the hand across the frame — sway the formation |
//! | `H` | Hide / show the hand |
//! | `Q` / `Escape` | Quit |

pub mod app;
pub mod assets;
pub mod visualizer;
