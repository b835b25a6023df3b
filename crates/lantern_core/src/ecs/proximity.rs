//! # Proximity Detector
//!
//! Turns raw padded-AABB overlap into enter/stay/exit transition events
//! without any persistent per-pair object. The pair set is recomputed from
//! scratch every tick into a double buffer: at the start of a rebuild the
//! current buffer becomes the previous one, and transition views are set
//! differences between the two.
//!
//! The scan is intentionally O(N²) over the fixed slot range, outer loop
//! over trigger owners, inner loop over candidates. Pair order is the
//! nested slot order, deterministic for a given entity layout.

use super::component::{Collider, ComponentKind, Position};
use super::entity::{EntityId, Slot};
use super::world::Components;

/// A detected overlap between a trigger owner and a matching entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProxPair {
    /// The entity owning the trigger component.
    pub trigger_owner: EntityId,
    /// The entity that matched the trigger's target mask and overlapped.
    pub matched: EntityId,
}

/// Mask an entity must satisfy to own a trigger scan.
const OWNER_REQ: u64 = ComponentKind::Position.bit()
    | ComponentKind::Collider.bit()
    | ComponentKind::Trigger.bit();

/// Mask every candidate must satisfy on top of the trigger's target mask.
const TARGET_REQ: u64 = ComponentKind::Position.bit() | ComponentKind::Collider.bit();

/// Double-buffered pair lists.
#[derive(Default)]
pub(crate) struct ProximitySet {
    current: Vec<ProxPair>,
    previous: Vec<ProxPair>,
}

impl ProximitySet {
    /// Promotes the current buffer to previous and clears current.
    fn begin_tick(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
    }

    /// This tick's pairs.
    pub fn current(&self) -> &[ProxPair] {
        &self.current
    }

    /// Last tick's pairs.
    pub fn previous(&self) -> &[ProxPair] {
        &self.previous
    }

    /// Drops both buffers' contents (full reset).
    pub fn reset(&mut self) {
        self.current.clear();
        self.previous.clear();
    }
}

/// Padded AABB overlap test: the owner's half-extents grow by `pad`.
fn overlap_padded(pa: Position, ca: Collider, pad: f32, pb: Position, cb: Collider) -> bool {
    (pa.x - pb.x).abs() <= ca.hx + pad + cb.hx && (pa.y - pb.y).abs() <= ca.hy + pad + cb.hy
}

/// Rebuilds the pair set from the live entity layout.
///
/// Runs once per tick (SimPost). Destroyed entities simply never re-enter
/// the current buffer, which is what makes the exit view work for
/// mid-overlap destruction.
pub(crate) fn rebuild(set: &mut ProximitySet, slots: &[Slot], components: &Components) {
    set.begin_tick();

    for a in 0..slots.len() {
        if slots[a].generation == 0 || slots[a].mask & OWNER_REQ != OWNER_REQ {
            continue;
        }

        let trigger = components.triggers.as_slice()[a];
        let pa = components.positions.as_slice()[a];
        let ca = components.colliders.as_slice()[a];

        for b in 0..slots.len() {
            if b == a || slots[b].generation == 0 {
                continue;
            }
            if slots[b].mask & trigger.target_mask != trigger.target_mask {
                continue;
            }
            if slots[b].mask & TARGET_REQ != TARGET_REQ {
                continue;
            }

            let pb = components.positions.as_slice()[b];
            let cb = components.colliders.as_slice()[b];
            if overlap_padded(pa, ca, trigger.pad, pb, cb) {
                set.current.push(ProxPair {
                    trigger_owner: EntityId::new(a as u32, slots[a].generation),
                    matched: EntityId::new(b as u32, slots[b].generation),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_padded_edges() {
        let ca = Collider::new(1.0, 1.0);
        let cb = Collider::new(1.0, 1.0);
        let origin = Position::new(0.0, 0.0);

        // Touching edges count as overlap (<= comparison).
        assert!(overlap_padded(origin, ca, 0.0, Position::new(2.0, 0.0), cb));
        assert!(!overlap_padded(origin, ca, 0.0, Position::new(2.1, 0.0), cb));

        // Padding widens the owner only.
        assert!(overlap_padded(origin, ca, 0.5, Position::new(2.4, 0.0), cb));
    }

    #[test]
    fn test_begin_tick_swaps_buffers() {
        let mut set = ProximitySet::default();
        set.current.push(ProxPair {
            trigger_owner: EntityId::new(0, 1),
            matched: EntityId::new(1, 1),
        });

        set.begin_tick();
        assert_eq!(set.previous().len(), 1);
        assert!(set.current().is_empty());

        set.begin_tick();
        assert!(set.previous().is_empty());
    }
}
