//! # Component Storage
//!
//! Pre-allocated, dense storage: one cell per entity slot, index-aligned
//! with the entity table (structure-of-arrays layout).
//!
//! Cells are **not** cleared when an entity is destroyed. A cell is
//! meaningful only while the owning slot's mask bit for this kind is set;
//! destroyed or never-added slots hold unspecified leftovers from prior
//! occupants, and callers must check the mask before reading.

use super::component::Component;

/// Pre-allocated storage for a single component kind.
///
/// Guarantees:
/// - Zero allocations after initialization
/// - O(1) access by entity index
/// - Cache-friendly iteration over the dense array
pub struct ComponentStorage<C: Component> {
    /// The dense array of cells, one per entity slot.
    data: Box<[C]>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates storage with one default-filled cell per entity slot.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        Self {
            data: vec![C::default(); capacity].into_boxed_slice(),
        }
    }

    /// Returns the number of cells.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Gets a cell by entity index, or `None` if out of bounds.
    ///
    /// The caller is responsible for the mask check; an in-bounds cell for
    /// an entity that never added this kind holds leftover data.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Gets a mutable cell by entity index, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.data.get_mut(index)
    }

    /// Overwrites the cell at `index`.
    ///
    /// Returns `false` if the index was out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Returns the full cell slice for batch scans.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns the full mutable cell slice for batch scans.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::Position;

    #[test]
    fn test_storage_creation() {
        let storage: ComponentStorage<Position> = ComponentStorage::new(1000);
        assert_eq!(storage.capacity(), 1000);
    }

    #[test]
    fn test_storage_get_set() {
        let mut storage: ComponentStorage<Position> = ComponentStorage::new(100);

        let pos = Position::new(1.0, 2.0);
        assert!(storage.set(50, pos));
        assert_eq!(*storage.get(50).unwrap(), pos);
    }

    #[test]
    fn test_storage_bounds() {
        let mut storage: ComponentStorage<Position> = ComponentStorage::new(100);
        assert!(storage.get(100).is_none());
        assert!(storage.get(99).is_some());
        assert!(!storage.set(100, Position::default()));
    }
}
