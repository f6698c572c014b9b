//! Top-level application state and the main loop.
//!
//! `AppState` owns the gesture store and the ornament field and is fully
//! headless — the tests drive it with synthetic detection ticks.  [`run`]
//! wires it to a detector source and the visualizer window and drives the
//! whole thing at ~60 fps.

use std::sync::mpsc;
use std::time::Instant;

use log::info;
use rand::thread_rng;
use thiserror::Error;

use hand_gesture::{classify, spawn_detector, GestureSnapshot, GestureStore, HandFrame};
use ornament_field::OrnamentField;

use crate::assets::TexturePool;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Total decorative entities.
    pub entity_count: usize,
    /// Directory of photo images; `None` (or an unreadable/empty directory)
    /// means an all-lights tree.
    pub assets_dir: Option<std::path::PathBuf>,
    /// Ornaments attached to the renderer per frame (staggered mount).
    pub attach_per_frame: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            entity_count:     150,
            assets_dir:       None,
            attach_per_frame: 8,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppError
// ════════════════════════════════════════════════════════════════════════════

/// Failures that actually abort the application.  Detector and asset
/// problems deliberately do not appear here: the display must stay live
/// with zero gesture input and zero photos.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("window creation failed: {0}")]
    Window(#[from] minifb::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    store: GestureStore,
    field: OrnamentField,
    pool:  TexturePool,
    attach_per_frame: usize,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let pool = match &cfg.assets_dir {
            Some(dir) => TexturePool::load_dir(dir),
            None => TexturePool::empty(),
        };
        let field = OrnamentField::new(cfg.entity_count, pool.len(), &mut thread_rng());

        AppState {
            store: GestureStore::new(),
            field,
            pool,
            attach_per_frame: cfg.attach_per_frame.max(1),
        }
    }

    /// Classify and publish every detection tick that arrived since the
    /// last frame.  An empty batch means the detector is lagging the
    /// render loop; the last published state simply stays current.
    pub fn apply_ticks(&self, ticks: &[Option<HandFrame>]) {
        for tick in ticks {
            self.store.update(classify(tick.as_ref()));
        }
    }

    /// One rendered frame's worth of world updates.
    pub fn advance(&mut self, elapsed: f32) -> GestureSnapshot {
        self.field.attach_next(self.attach_per_frame);
        let snap = self.store.snapshot();
        self.field.tick(&snap, elapsed);
        snap
    }

    pub fn field(&self) -> &OrnamentField {
        &self.field
    }

    pub fn pool(&self) -> &TexturePool {
        &self.pool
    }

    pub fn snapshot(&self) -> GestureSnapshot {
        self.store.snapshot()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the detector source (simulation by default, hardware with
/// `--features leap`), the visualizer window, and drives the
/// detect → classify → store → integrate → render loop until the window
/// closes.  The detector is stopped before teardown so no stale tick can
/// publish into a dead world.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let mut app = AppState::new(&cfg);

    // Sim input channel: the window feeds it; in hardware mode nothing
    // reads it and the sends are dropped.
    let (sim_tx, sim_rx) = mpsc::channel();

    #[cfg(feature = "leap")]
    let detector = {
        drop(sim_rx);
        info!("detector: LeapMotion hardware");
        spawn_detector(hand_gesture::source::LeapDetectorSource)
    };
    #[cfg(not(feature = "leap"))]
    let detector = {
        info!("detector: keyboard simulation");
        spawn_detector(hand_gesture::SimDetectorSource { rx: sim_rx })
    };

    let mut vis = Visualizer::new(sim_tx)?;
    let start = Instant::now();

    while vis.is_open() {
        if !vis.poll_input() {
            break;
        }

        app.apply_ticks(&detector.drain());
        let elapsed = start.elapsed().as_secs_f32();
        let snap = app.advance(elapsed);

        vis.render(app.field(), app.pool(), &snap, elapsed);
    }

    // Teardown: cancel first, so an in-flight detection cannot land after
    // the world is gone.
    detector.stop();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
