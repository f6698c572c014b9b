//! Hand-landmark model.
//!
//! A detection tick delivers at most one hand as a set of planar landmarks,
//! each normalized to `[0, 1]` relative to the camera frame (x: 0 = left
//! edge, 1 = right edge).  Only the wrist and the five fingertips are ever
//! consumed; the indices follow the standard 21-point hand topology.

/// One landmark in normalized camera space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }

    /// Planar Euclidean distance to another landmark.
    pub fn distance_to(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Index of the wrist landmark.
pub const WRIST: usize = 0;

/// Indices of the five fingertip landmarks (thumb → pinky).
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];

/// Minimum landmark count for a frame to be well-formed.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand: the full landmark set for a single tick.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    landmarks: Vec<Landmark>,
}

impl HandFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        HandFrame { landmarks }
    }

    /// A frame with fewer than [`LANDMARK_COUNT`] points is malformed and
    /// treated exactly like "no detection" by the classifier.
    pub fn is_well_formed(&self) -> bool {
        self.landmarks.len() >= LANDMARK_COUNT
    }

    pub fn wrist(&self) -> &Landmark {
        &self.landmarks[WRIST]
    }

    pub fn fingertips(&self) -> impl Iterator<Item = &Landmark> {
        FINGERTIPS.iter().map(|&i| &self.landmarks[i])
    }

    /// Build a well-formed synthetic frame from a wrist position and a
    /// uniform fingertip spread.  All 21 points are populated (non-consumed
    /// ones sit at the wrist); used by the simulation source and tests.
    pub fn synthetic(wrist_x: f32, wrist_y: f32, spread: f32) -> Self {
        let wrist = Landmark::new(wrist_x, wrist_y);
        let mut landmarks = vec![wrist; LANDMARK_COUNT];
        for (k, &i) in FINGERTIPS.iter().enumerate() {
            // Fan the fingertips above the wrist; only their distance
            // matters to the classifier.
            let angle = 1.2 + 0.18 * k as f32;
            landmarks[i] = Landmark::new(
                (wrist_x + spread * angle.cos()).clamp(0.0, 1.0),
                (wrist_y - spread * angle.sin()).clamp(0.0, 1.0),
            );
        }
        HandFrame::new(landmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.3, 0.4);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn short_frame_is_malformed() {
        let f = HandFrame::new(vec![Landmark::new(0.5, 0.5); 10]);
        assert!(!f.is_well_formed());
    }

    #[test]
    fn synthetic_frame_is_well_formed() {
        let f = HandFrame::synthetic(0.5, 0.5, 0.3);
        assert!(f.is_well_formed());
        assert_eq!(f.wrist().x, 0.5);
    }

    #[test]
    fn synthetic_spread_reaches_fingertips() {
        let f = HandFrame::synthetic(0.5, 0.6, 0.3);
        for tip in f.fingertips() {
            let d = tip.distance_to(f.wrist());
            // Clamping to [0,1] can shorten a tip near the frame edge, but
            // a centred hand keeps the full spread.
            assert!(d > 0.25, "tip too close: {}", d);
        }
    }
}
