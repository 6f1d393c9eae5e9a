//! Abstract `Component` trait and the dense arena storage behind it.

use std::any::Any;

use super::{Entity, MAX_ENTITIES};

/// Marker trait for types that can be attached to entities.
///
/// Components are plain data values; behavior lives in the systems that read
/// and write them through [`World`](crate::ecs::world::World).
pub trait Component: 'static {}

/// Dense, packed storage for one component type.
///
/// The occupied prefix `[0, len)` of the internal array never has gaps: every
/// entity holding this component type has exactly one slot in it. Removals
/// are compacted with a swap-remove, which keeps all operations O(1) at the
/// cost of not preserving insertion order within the arena.
///
/// The entity-to-slot map is a flat array indexed by entity id rather than a
/// hash map, so lookups stay branch-light and cache-friendly.
pub struct Arena<T: Component> {
    data: Vec<T>,
    entities: Vec<Entity>,
    indices: Vec<Option<u32>>,
}

impl<T: Component> Arena<T> {
    /// Creates a new, empty `Arena<T>`. This is called when the component
    /// type is registered within the world.
    pub fn new() -> Self {
        Arena {
            data: Vec::new(),
            entities: Vec::new(),
            indices: vec![None; MAX_ENTITIES as usize],
        }
    }

    /// Returns true if the entity has a row in this arena.
    #[inline]
    pub fn has(&self, ent: Entity) -> bool {
        self.indices[ent.index() as usize].is_some()
    }

    /// Inserts a row for `ent` at the back of the packed prefix.
    ///
    /// # Panics
    ///
    /// Panics if the entity already has a row in this arena.
    pub fn insert(&mut self, ent: Entity, value: T) {
        assert!(
            !self.has(ent),
            "Component added to the same entity more than once."
        );

        self.indices[ent.index() as usize] = Some(self.data.len() as u32);
        self.entities.push(ent);
        self.data.push(value);
    }

    /// Removes the row of `ent` and returns its value. The last row of the
    /// packed prefix is moved into the vacated slot, so the prefix stays free
    /// of holes.
    ///
    /// # Panics
    ///
    /// Panics if the entity has no row in this arena.
    pub fn remove(&mut self, ent: Entity) -> T {
        let index = self.indices[ent.index() as usize]
            .take()
            .expect("Removing non-existent component data.") as usize;

        let value = self.data.swap_remove(index);
        self.entities.swap_remove(index);

        // Repoint the moved entity, unless the removed row was the last one.
        if index < self.data.len() {
            let moved = self.entities[index];
            self.indices[moved.index() as usize] = Some(index as u32);
        }

        value
    }

    /// Returns a reference to the component value of `ent`.
    ///
    /// # Panics
    ///
    /// Panics if the entity has no row in this arena.
    #[inline]
    pub fn get(&self, ent: Entity) -> &T {
        let index = self.indices[ent.index() as usize]
            .expect("Retrieving non-existent component data.");
        &self.data[index as usize]
    }

    /// Returns a mutable reference to the component value of `ent`, through
    /// which callers mutate the stored value in place.
    ///
    /// # Panics
    ///
    /// Panics if the entity has no row in this arena.
    #[inline]
    pub fn get_mut(&mut self, ent: Entity) -> &mut T {
        let index = self.indices[ent.index() as usize]
            .expect("Retrieving non-existent component data.");
        &mut self.data[index as usize]
    }

    /// Returns the live, packed rows for bulk iteration. The slice length
    /// always equals the number of entities holding this component type.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable variant of [`Arena::data`].
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the entities holding this component type, parallel to
    /// [`Arena::data`].
    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the number of occupied rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no entity holds this component type.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Component> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The closed type-erased interface the registry owns arenas through.
///
/// It deliberately exposes nothing typed: `forget` is what entity
/// destruction needs, and the `Any` upcasts are where the registry performs
/// its downcast once the caller's static type is known.
pub(crate) trait ErasedArena: Any {
    /// Drops the row of `ent` if there is one. Returns whether a row was
    /// removed.
    fn forget(&mut self, ent: Entity) -> bool;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedArena for Arena<T> {
    fn forget(&mut self, ent: Entity) -> bool {
        if self.has(ent) {
            self.remove(ent);
            true
        } else {
            false
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Mass(u32);
    impl Component for Mass {}

    #[test]
    fn basic() {
        let mut arena = Arena::new();
        let e1 = Entity::new(4);

        assert!(!arena.has(e1));
        arena.insert(e1, Mass(16));
        assert!(arena.has(e1));
        assert_eq!(*arena.get(e1), Mass(16));

        arena.get_mut(e1).0 = 32;
        assert_eq!(*arena.get(e1), Mass(32));

        assert_eq!(arena.remove(e1), Mass(32));
        assert!(!arena.has(e1));
        assert!(arena.is_empty());
    }

    #[test]
    fn swap_remove_packing() {
        let mut arena = Arena::new();
        let entities: Vec<_> = (0..5).map(Entity::new).collect();
        for (i, &e) in entities.iter().enumerate() {
            arena.insert(e, Mass(i as u32));
        }
        assert_eq!(arena.len(), 5);

        // Removing from the middle moves the last row into the hole.
        arena.remove(entities[1]);
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.data().len(), 4);
        assert_eq!(*arena.get(entities[4]), Mass(4));
        assert_eq!(arena.entities()[1], entities[4]);

        // Removing the last row is a plain pop.
        arena.remove(entities[4]);
        assert_eq!(arena.len(), 3);
        for &e in &[entities[0], entities[2], entities[3]] {
            assert!(arena.has(e));
        }
    }

    #[test]
    fn reinsert_after_remove() {
        let mut arena = Arena::new();
        let e1 = Entity::new(0);

        arena.insert(e1, Mass(1));
        arena.remove(e1);
        arena.insert(e1, Mass(2));
        assert_eq!(*arena.get(e1), Mass(2));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    #[should_panic]
    fn duplicated_insert() {
        let mut arena = Arena::new();
        let e1 = Entity::new(0);
        arena.insert(e1, Mass(1));
        arena.insert(e1, Mass(2));
    }

    #[test]
    #[should_panic]
    fn remove_missing() {
        let mut arena: Arena<Mass> = Arena::new();
        arena.remove(Entity::new(0));
    }

    #[test]
    #[should_panic]
    fn get_missing() {
        let arena: Arena<Mass> = Arena::new();
        arena.get(Entity::new(0));
    }
}
