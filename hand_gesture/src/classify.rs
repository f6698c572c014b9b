//! Landmark classifier — one detection in, one raw gesture out.
//!
//! A closed fist keeps the fingertips near the wrist, so the mean
//! fingertip→wrist distance in normalized landmark space separates
//! fist from open hand with a single threshold.  The wrist's horizontal
//! position maps to a signed lateral offset, mirrored so a hand moving
//! toward the viewer's left pushes the formation toward positive x.

use crate::landmark::HandFrame;

// Thresholds (empirically tuned)
/// Mean fingertip–wrist distance below which the hand counts as a fist.
/// Exactly at the threshold is *not* a fist.
pub const FIST_THRESHOLD: f32 = 0.25;

/// Gain from normalized wrist offset (±0.5 around centre) to world-space
/// lateral offset (±1.75).
pub const LATERAL_GAIN: f32 = 3.5;

/// Unsmoothed classifier output for one detection tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawGesture {
    /// True when the hand pose is a closed fist (assemble the formation).
    pub assembled: bool,
    /// Signed world-scale horizontal offset, in `[-1.75, 1.75]`.
    pub lateral_offset: f32,
}

impl RawGesture {
    /// The no-detection default: scattered, centered.
    pub const NEUTRAL: RawGesture = RawGesture { assembled: false, lateral_offset: 0.0 };
}

impl Default for RawGesture {
    fn default() -> Self {
        RawGesture::NEUTRAL
    }
}

/// Classify one detection tick.
///
/// `None` and malformed frames both yield [`RawGesture::NEUTRAL`] — absence
/// of a hand is an explicit state, not an error.
pub fn classify(frame: Option<&HandFrame>) -> RawGesture {
    let frame = match frame {
        Some(f) if f.is_well_formed() => f,
        _ => return RawGesture::NEUTRAL,
    };

    let wrist = frame.wrist();
    let mut sum = 0.0;
    let mut n = 0usize;
    for tip in frame.fingertips() {
        sum += tip.distance_to(wrist);
        n += 1;
    }
    let mean = sum / n as f32;

    RawGesture {
        assembled: mean < FIST_THRESHOLD,
        lateral_offset: (0.5 - wrist.x) * LATERAL_GAIN,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{HandFrame, Landmark, FINGERTIPS, LANDMARK_COUNT};

    /// Frame whose five fingertips all sit exactly `dist` from the wrist.
    fn frame_with_mean_distance(wrist_x: f32, dist: f32) -> HandFrame {
        let wrist = Landmark::new(wrist_x, 0.5);
        let mut landmarks = vec![wrist; LANDMARK_COUNT];
        for &i in FINGERTIPS.iter() {
            landmarks[i] = Landmark::new(wrist_x, 0.5 - dist);
        }
        HandFrame::new(landmarks)
    }

    #[test]
    fn no_detection_is_neutral() {
        assert_eq!(classify(None), RawGesture::NEUTRAL);
    }

    #[test]
    fn malformed_frame_is_neutral() {
        let short = HandFrame::new(vec![Landmark::new(0.2, 0.2); 5]);
        assert_eq!(classify(Some(&short)), RawGesture::NEUTRAL);
    }

    #[test]
    fn tight_fingertips_classify_as_fist() {
        let g = classify(Some(&frame_with_mean_distance(0.5, 0.05)));
        assert!(g.assembled);
    }

    #[test]
    fn spread_fingertips_classify_as_open() {
        let g = classify(Some(&frame_with_mean_distance(0.5, 0.4)));
        assert!(!g.assembled);
    }

    #[test]
    fn threshold_boundary_is_not_a_fist() {
        // Exactly 0.25 mean distance: strict less-than, so not assembled.
        let g = classify(Some(&frame_with_mean_distance(0.5, FIST_THRESHOLD)));
        assert!(!g.assembled);
        let g = classify(Some(&frame_with_mean_distance(0.5, FIST_THRESHOLD - 1e-4)));
        assert!(g.assembled);
    }

    #[test]
    fn centred_wrist_gives_zero_offset() {
        let g = classify(Some(&frame_with_mean_distance(0.5, 0.05)));
        assert!(g.assembled);
        assert!(g.lateral_offset.abs() < 1e-6);
    }

    #[test]
    fn left_edge_wrist_gives_full_positive_offset() {
        // wrist.x = 0 (left edge) → (0.5 - 0.0) * 3.5 = 1.75, mirrored.
        let g = classify(Some(&frame_with_mean_distance(0.0, 0.1)));
        assert!((g.lateral_offset - 1.75).abs() < 1e-6);
    }

    #[test]
    fn right_edge_wrist_gives_full_negative_offset() {
        let g = classify(Some(&frame_with_mean_distance(1.0, 0.1)));
        assert!((g.lateral_offset + 1.75).abs() < 1e-6);
    }

    #[test]
    fn synthetic_frames_round_trip_the_classifier() {
        let fist = HandFrame::synthetic(0.5, 0.5, 0.06);
        let open = HandFrame::synthetic(0.5, 0.5, 0.35);
        assert!(classify(Some(&fist)).assembled);
        assert!(!classify(Some(&open)).assembled);
    }
}
