//! The ornament collection: creation-time partition, staggered attachment,
//! and the whole-field per-frame tick.

use log::{info, warn};
use rand::Rng;

use hand_gesture::GestureSnapshot;

use crate::entity::{Ornament, OrnamentKind};
use crate::palette::LIGHT_PALETTE;

/// Every third creation index is eligible to carry a photo.
const PHOTO_STRIDE: usize = 3;

// ════════════════════════════════════════════════════════════════════════════
// OrnamentField
// ════════════════════════════════════════════════════════════════════════════

/// Owns all decorative entities for the session.
///
/// The photo/light partition is decided once here and never changes:
/// an index is photo-eligible when `index % 3 == 0`, and becomes a photo
/// only if the texture pool is non-empty.  Pool slots are assigned
/// cyclically (`nth_photo % pool_len`) — deterministic reuse, no cursors.
/// An empty pool degrades the whole field to lights; that is a warning,
/// not an error.
pub struct OrnamentField {
    ornaments: Vec<Ornament>,
    /// Index of the next ornament to attach (staggered mount).
    next_attach: usize,
}

impl OrnamentField {
    pub fn new<R: Rng + ?Sized>(total: usize, pool_len: usize, rng: &mut R) -> Self {
        if pool_len == 0 {
            warn!("texture pool is empty — all {} ornaments degrade to lights", total);
        }

        let mut ornaments = Vec::with_capacity(total);
        let mut photos = 0usize;
        for index in 0..total {
            let kind = if index % PHOTO_STRIDE == 0 && pool_len > 0 {
                let slot = photos % pool_len;
                photos += 1;
                OrnamentKind::Photo { slot }
            } else {
                OrnamentKind::Light { color: LIGHT_PALETTE[index % LIGHT_PALETTE.len()] }
            };
            ornaments.push(Ornament::new(index, total, kind, rng));
        }

        info!("ornament field: {} entities ({} photos, {} lights)",
              total, photos, total - photos);

        OrnamentField { ornaments, next_attach: 0 }
    }

    /// Attach up to `n` more ornaments to the renderer.  Unattached
    /// ornaments sit at their scattered target untouched until their turn.
    pub fn attach_next(&mut self, n: usize) {
        let end = (self.next_attach + n).min(self.ornaments.len());
        for o in &mut self.ornaments[self.next_attach..end] {
            o.attached = true;
        }
        self.next_attach = end;
    }

    /// Advance every attached ornament one frame against the same snapshot.
    pub fn tick(&mut self, snap: &GestureSnapshot, elapsed: f32) {
        for o in &mut self.ornaments {
            o.tick(snap, elapsed);
        }
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    pub fn len(&self) -> usize {
        self.ornaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ornaments.is_empty()
    }

    pub fn photo_count(&self) -> usize {
        self.ornaments.iter()
            .filter(|o| matches!(o.kind, OrnamentKind::Photo { .. }))
            .count()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn empty_pool_degrades_to_all_lights() {
        let field = OrnamentField::new(150, 0, &mut rng());
        assert_eq!(field.len(), 150);
        assert_eq!(field.photo_count(), 0);
    }

    #[test]
    fn one_in_three_is_a_photo_when_pool_available() {
        let field = OrnamentField::new(150, 12, &mut rng());
        assert_eq!(field.photo_count(), 50);
        for o in field.ornaments() {
            let eligible = o.index % 3 == 0;
            assert_eq!(matches!(o.kind, OrnamentKind::Photo { .. }), eligible,
                       "index {} partitioned wrong", o.index);
        }
    }

    #[test]
    fn texture_slots_cycle_through_small_pool() {
        let field = OrnamentField::new(150, 4, &mut rng());
        let slots: Vec<usize> = field.ornaments().iter()
            .filter_map(|o| match o.kind {
                OrnamentKind::Photo { slot } => Some(slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots.len(), 50);
        for (k, &slot) in slots.iter().enumerate() {
            assert_eq!(slot, k % 4);
        }
    }

    #[test]
    fn partition_never_changes_after_creation() {
        let mut field = OrnamentField::new(60, 5, &mut rng());
        let kinds: Vec<OrnamentKind> = field.ornaments().iter().map(|o| o.kind).collect();
        field.attach_next(60);
        let snap = GestureSnapshot { assembled: true, lateral_bias: 0.5 };
        for i in 0..100 {
            field.tick(&snap, i as f32 * 0.016);
        }
        let after: Vec<OrnamentKind> = field.ornaments().iter().map(|o| o.kind).collect();
        assert_eq!(kinds, after);
    }

    #[test]
    fn staggered_attach_leaves_the_rest_untouched() {
        let mut field = OrnamentField::new(30, 0, &mut rng());
        field.attach_next(10);
        let frozen: Vec<_> = field.ornaments()[10..].iter().map(|o| o.position).collect();
        let snap = GestureSnapshot { assembled: true, lateral_bias: 0.0 };
        field.tick(&snap, 0.0);

        // Attached ornaments moved off their scattered start.
        for o in field.ornaments()[..10].iter() {
            assert_ne!(o.position, o.scattered_target);
        }
        for (o, before) in field.ornaments()[10..].iter().zip(frozen.iter()) {
            assert_eq!(o.position, *before);
        }
    }

    #[test]
    fn attach_next_is_idempotent_past_the_end() {
        let mut field = OrnamentField::new(5, 0, &mut rng());
        field.attach_next(100);
        field.attach_next(100);
        assert!(field.ornaments().iter().all(|o| o.attached));
    }

    #[test]
    fn whole_field_reads_one_snapshot() {
        // With a shared bias every effective target shifts by the same x.
        let mut field = OrnamentField::new(20, 0, &mut rng());
        field.attach_next(20);
        let snap = GestureSnapshot { assembled: true, lateral_bias: 1.0 };
        for o in field.ornaments() {
            let shift = o.effective_target(&snap) - o.assembled_target;
            assert_eq!(shift, glam::Vec3::new(1.0, 0.0, 0.0));
        }
    }
}
