//! # tree_layout
//!
//! Formation layout math for the ornament field.  Every decorative entity
//! has two static target positions:
//!
//! * an **assembled** target on a cone spiral (the tree shape), a pure
//!   function of the entity's creation index and the total entity count;
//! * a **scattered** target on a randomized outer sphere shell, sampled
//!   once at entity construction and never re-sampled.
//!
//! Successive spiral points are spaced by the golden angle (~2.4 rad,
//! ~137.5°) so consecutive entities never line up radially — the spiral
//! covers the cone evenly without any collision checking.

use glam::Vec3;
use rand::Rng;

// ════════════════════════════════════════════════════════════════════════════
// Spiral constants
// ════════════════════════════════════════════════════════════════════════════

/// Angular step between consecutive spiral points, in radians.
pub const GOLDEN_ANGLE: f32 = 2.4;

/// Height of the lowest spiral point (tree base).
pub const BASE_Y: f32 = -1.5;

/// Vertical span from base to apex.  Apex sits at `BASE_Y + HEIGHT_SPAN`.
pub const HEIGHT_SPAN: f32 = 3.8;

/// Spiral radius at the base.
pub const BASE_RADIUS: f32 = 1.4;

/// Residual radius at the apex, so the topmost ornaments don't collapse
/// onto the axis.
pub const TIP_RADIUS: f32 = 0.1;

/// Vertical offset applied to every scattered target, lifting the cloud
/// so it surrounds the tree rather than the floor.
pub const SCATTER_LIFT: f32 = 2.0;

// ════════════════════════════════════════════════════════════════════════════
// Assembled target — cone spiral
// ════════════════════════════════════════════════════════════════════════════

/// Position of entity `index` (of `total`) on the tree spiral.
///
/// Pure and deterministic: the same `(index, total)` always yields the same
/// point.  `total` is clamped to at least 1.
///
/// For any valid input, `y ∈ [BASE_Y, BASE_Y + HEIGHT_SPAN]` and the
/// horizontal radius lies in `[TIP_RADIUS, BASE_RADIUS + TIP_RADIUS]`.
pub fn spiral_target(index: usize, total: usize) -> Vec3 {
    let total = total.max(1);
    let t = index as f32 / total as f32;

    let y = BASE_Y + HEIGHT_SPAN * t;
    let radius = BASE_RADIUS * (1.0 - t) + TIP_RADIUS;
    let angle = index as f32 * GOLDEN_ANGLE;

    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

// ════════════════════════════════════════════════════════════════════════════
// Scattered target — sphere-shell sample
// ════════════════════════════════════════════════════════════════════════════

/// Radial band a scattered target is sampled from.  Photo ornaments drift a
/// little further out than lights so their larger discs don't crowd the
/// inner shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusBand {
    pub min: f32,
    pub max: f32,
}

impl RadiusBand {
    /// Band for photo ornaments.
    pub const PHOTO: RadiusBand = RadiusBand { min: 6.0, max: 10.0 };
    /// Band for light ornaments.
    pub const LIGHT: RadiusBand = RadiusBand { min: 5.0, max: 10.0 };
}

/// Sample one scattered-formation target.
///
/// The polar angle is drawn as `φ = acos(U(-1, 1))` — uniform over the
/// sphere surface, not over the angle, which would cluster points at the
/// poles.  The caller supplies the RNG so tests can seed it.
pub fn scatter_target<R: Rng + ?Sized>(rng: &mut R, band: RadiusBand) -> Vec3 {
    let theta = rng.gen_range(0.0..std::f32::consts::TAU);
    let phi = (rng.gen_range(-1.0_f32..1.0)).acos();
    let radius = rng.gen_range(band.min..band.max);

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin() + SCATTER_LIFT,
        radius * phi.cos(),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spiral_is_deterministic() {
        for i in [0, 7, 149] {
            assert_eq!(spiral_target(i, 150), spiral_target(i, 150));
        }
    }

    #[test]
    fn spiral_height_and_radius_bounds() {
        for total in [1usize, 50, 150] {
            for i in 0..total {
                let p = spiral_target(i, total);
                assert!(p.y >= BASE_Y - 1e-6 && p.y <= BASE_Y + HEIGHT_SPAN + 1e-6,
                        "y out of range for i={} total={}: {}", i, total, p.y);
                let r = (p.x * p.x + p.z * p.z).sqrt();
                assert!(r >= TIP_RADIUS - 1e-4 && r <= BASE_RADIUS + TIP_RADIUS + 1e-4,
                        "radius out of range for i={} total={}: {}", i, total, r);
            }
        }
    }

    #[test]
    fn spiral_neighbours_do_not_align() {
        // Golden-angle spacing: consecutive points differ in azimuth.
        let a = spiral_target(10, 150);
        let b = spiral_target(11, 150);
        let az_a = a.z.atan2(a.x);
        let az_b = b.z.atan2(b.x);
        assert!((az_a - az_b).abs() > 0.1);
    }

    #[test]
    fn spiral_total_zero_clamped() {
        // total = 0 must not divide by zero; clamps to 1.
        let p = spiral_target(0, 0);
        assert_eq!(p, spiral_target(0, 1));
    }

    #[test]
    fn scatter_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for band in [RadiusBand::PHOTO, RadiusBand::LIGHT] {
            for _ in 0..500 {
                let p = scatter_target(&mut rng, band);
                // Measure around the lifted centre.
                let r = (p - Vec3::new(0.0, SCATTER_LIFT, 0.0)).length();
                assert!(r >= band.min - 1e-4 && r <= band.max + 1e-4,
                        "scatter radius {} outside [{}, {}]", r, band.min, band.max);
            }
        }
    }

    #[test]
    fn scatter_covers_both_hemispheres() {
        // The acos(U(-1,1)) polar draw should reach both z hemispheres.
        let mut rng = StdRng::seed_from_u64(7);
        let mut above = 0;
        let mut below = 0;
        for _ in 0..200 {
            let p = scatter_target(&mut rng, RadiusBand::LIGHT);
            if p.z > 0.0 { above += 1; } else { below += 1; }
        }
        assert!(above > 40 && below > 40, "pole clustering: +{} -{}", above, below);
    }
}
