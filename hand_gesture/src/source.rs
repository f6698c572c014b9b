//! Detector sources — where hand detections come from.
//!
//! The public interface is a stream of `Option<HandFrame>` ticks over an
//! `mpsc` channel: `Some` when a hand is in view, `None` when it isn't.
//! Consumers don't need to know whether ticks came from real hardware or
//! the keyboard-driven simulator, and both paths run through the same
//! classifier.
//!
//! Every source holds a cancellation token and must check it before every
//! send: once the owner calls [`DetectorHandle::stop`], no tick may be
//! published, even one already in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::landmark::HandFrame;

// ════════════════════════════════════════════════════════════════════════════
// DetectorSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver detection ticks over a channel.
///
/// Implementations run on their own thread and must return promptly once
/// `cancel` is raised or the receiving end hangs up.
pub trait DetectorSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<Option<HandFrame>>, cancel: Arc<AtomicBool>);
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorHandle — owner's end of a running source
// ════════════════════════════════════════════════════════════════════════════

/// Handle to a spawned detector.  Dropping the handle cancels the source.
pub struct DetectorHandle {
    rx:     Receiver<Option<HandFrame>>,
    cancel: Arc<AtomicBool>,
}

impl DetectorHandle {
    /// Drain all ticks that arrived since the last call (non-blocking).
    /// If the detector lags the render loop this is simply empty and the
    /// caller keeps the last published state; ticks are never queued up
    /// beyond what the channel already holds.
    pub fn drain(&self) -> Vec<Option<HandFrame>> {
        let mut out = Vec::new();
        while let Ok(tick) = self.rx.try_recv() {
            out.push(tick);
        }
        out
    }

    /// Raise the cancellation token.  The source thread sees it before its
    /// next send, so no stale tick can arrive after this returns and the
    /// channel is drained once more.
    pub fn stop(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }
}

impl Drop for DetectorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a detector source on its own thread and return the owner handle.
pub fn spawn_detector<D: DetectorSource>(source: D) -> DetectorHandle {
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let token = Arc::clone(&cancel);
    thread::spawn(move || Box::new(source).run(tx, token));
    DetectorHandle { rx, cancel }
}

// ════════════════════════════════════════════════════════════════════════════
// SimDetectorSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    /// Fist closed (hold) / reopened.
    FistDown,
    FistUp,
    /// Nudge the simulated hand across the camera frame.
    NudgeLeft,
    NudgeRight,
    /// Toggle the hand in/out of view.
    ToggleHand,
}

/// Detector source driven by [`SimInput`] events from the window.
///
/// The simulator keeps a tiny hand model (in view / fist / wrist x) and
/// synthesizes a full landmark frame ~30 times a second: a fist keeps the
/// fingertips tight against the wrist, an open hand spreads them well past
/// the classifier threshold.  The downstream pipeline cannot tell it apart
/// from a real tracker.
pub struct SimDetectorSource {
    pub rx: Receiver<SimInput>,
}

/// Fingertip spread of the simulated open hand / fist, in normalized
/// landmark space.  Chosen to land clearly on either side of the fist
/// threshold.
const SIM_OPEN_SPREAD: f32 = 0.35;
const SIM_FIST_SPREAD: f32 = 0.06;
/// Horizontal step per nudge.
const SIM_NUDGE: f32 = 0.05;
/// Simulated detection rate.
const SIM_TICK: Duration = Duration::from_millis(33);

impl DetectorSource for SimDetectorSource {
    fn run(self: Box<Self>, tx: Sender<Option<HandFrame>>, cancel: Arc<AtomicBool>) {
        info!("sim detector running (keyboard-driven synthetic hand)");

        let mut in_view = true;
        let mut fist = false;
        let mut wrist_x = 0.5_f32;

        loop {
            // Apply any inputs that arrived since the last tick.
            loop {
                match self.rx.try_recv() {
                    Ok(SimInput::FistDown)   => fist = true,
                    Ok(SimInput::FistUp)     => fist = false,
                    Ok(SimInput::NudgeLeft)  => wrist_x = (wrist_x - SIM_NUDGE).max(0.0),
                    Ok(SimInput::NudgeRight) => wrist_x = (wrist_x + SIM_NUDGE).min(1.0),
                    Ok(SimInput::ToggleHand) => in_view = !in_view,
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => return,
                }
            }

            if cancel.load(Ordering::SeqCst) {
                debug!("sim detector cancelled");
                return;
            }

            let tick = if in_view {
                let spread = if fist { SIM_FIST_SPREAD } else { SIM_OPEN_SPREAD };
                Some(HandFrame::synthetic(wrist_x, 0.5, spread))
            } else {
                None
            };
            if tx.send(tick).is_err() {
                return;
            }

            thread::sleep(SIM_TICK);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapDetectorSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Detector source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Palm and fingertip positions arrive in millimeters in tracker space and
/// are normalized into the same `[0, 1]` camera-style frame the simulator
/// and the classifier use.  Hardware init failure is logged and the channel
/// goes silent — the application stays in the default scattered state.
#[cfg(feature = "leap")]
pub struct LeapDetectorSource;

/// Tracker-space extents mapped onto the normalized frame.
#[cfg(feature = "leap")]
mod leap_extent {
    /// Horizontal half-width, mm.  ±200 mm spans the full frame.
    pub const HALF_WIDTH: f32 = 200.0;
    /// Height band, mm above the device, mapped to y = 1 (low) … 0 (high).
    pub const Y_MIN: f32 = 100.0;
    pub const Y_SPAN: f32 = 300.0;
}

#[cfg(feature = "leap")]
impl DetectorSource for LeapDetectorSource {
    fn run(self: Box<Self>, tx: Sender<Option<HandFrame>>, cancel: Arc<AtomicBool>) {
        use crate::landmark::{Landmark, FINGERTIPS, LANDMARK_COUNT};
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                log::error!("LeapC connection failed: {:?} — gesture control disabled", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            log::error!("LeapMotion device open failed: {:?} — gesture control disabled", e);
            return;
        }
        info!("LeapMotion detector running");

        let norm = |x_mm: f32, y_mm: f32| {
            Landmark::new(
                (0.5 + x_mm / (2.0 * leap_extent::HALF_WIDTH)).clamp(0.0, 1.0),
                (1.0 - (y_mm - leap_extent::Y_MIN) / leap_extent::Y_SPAN).clamp(0.0, 1.0),
            )
        };

        loop {
            if cancel.load(Ordering::SeqCst) {
                return;
            }
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let tick = frame.hands().next().map(|hand| {
                    let palm = hand.palm().position();
                    let wrist = norm(palm.x, palm.y);
                    let mut landmarks = vec![wrist; LANDMARK_COUNT];
                    for (digit, &slot) in hand.digits().zip(FINGERTIPS.iter()) {
                        let tip = digit.distal().next_joint();
                        landmarks[slot] = norm(tip.x, tip.y);
                    }
                    HandFrame::new(landmarks)
                });

                // Re-check after the poll: a tick decided before teardown
                // must not land after it.
                if cancel.load(Ordering::SeqCst) {
                    return;
                }
                if tx.send(tick).is_err() {
                    return;
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn recv_some(handle: &DetectorHandle, tries: usize) -> Vec<Option<HandFrame>> {
        let mut out = Vec::new();
        for _ in 0..tries {
            out.extend(handle.drain());
            if !out.is_empty() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        out
    }

    #[test]
    fn sim_source_emits_open_hand_by_default() {
        let (_tx, rx) = mpsc::channel();
        let handle = spawn_detector(SimDetectorSource { rx });
        let ticks = recv_some(&handle, 50);
        let frame = ticks.into_iter().flatten().next().expect("no frame");
        assert!(!classify(Some(&frame)).assembled);
    }

    #[test]
    fn sim_fist_classifies_as_assembled() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_detector(SimDetectorSource { rx });
        tx.send(SimInput::FistDown).unwrap();
        // Skip ticks emitted before the input landed.
        thread::sleep(Duration::from_millis(80));
        let _ = handle.drain();
        let ticks = recv_some(&handle, 50);
        let frame = ticks.into_iter().flatten().next().expect("no frame");
        assert!(classify(Some(&frame)).assembled);
    }

    #[test]
    fn sim_hidden_hand_emits_none() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_detector(SimDetectorSource { rx });
        tx.send(SimInput::ToggleHand).unwrap();
        thread::sleep(Duration::from_millis(80));
        let _ = handle.drain();
        let ticks = recv_some(&handle, 50);
        assert!(ticks.iter().any(|t| t.is_none()));
    }

    #[test]
    fn no_tick_arrives_after_stop() {
        let (_tx, rx) = mpsc::channel();
        let handle = spawn_detector(SimDetectorSource { rx });
        // Let it run a little, then cancel.
        thread::sleep(Duration::from_millis(50));
        handle.stop();
        // Give the thread time to observe the token, then flush the channel.
        thread::sleep(Duration::from_millis(100));
        let _ = handle.drain();
        // Anything sent now would have beaten the token check — must be empty.
        thread::sleep(Duration::from_millis(100));
        assert!(handle.drain().is_empty());
    }
}
