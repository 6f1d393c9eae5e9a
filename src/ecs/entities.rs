//! Bounded entity allocator with deterministic identifier recycling.

use std::collections::VecDeque;

use super::{Entity, MAX_ENTITIES};

/// `EntityPool` issues and recycles entity identifiers from the fixed range
/// `[0, MAX_ENTITIES)`.
///
/// Freed identifiers go to the back of a FIFO queue that is seeded with the
/// whole range at construction, so the ids freed earliest are reused first.
/// This keeps allocation order deterministic across runs, which matters for
/// reproducible tests.
pub struct EntityPool {
    frees: VecDeque<u32>,
    alives: Vec<bool>,
    len: usize,
}

impl EntityPool {
    /// Constructs a new `EntityPool` with every identifier available.
    pub fn new() -> Self {
        EntityPool {
            frees: (0..MAX_ENTITIES).collect(),
            alives: vec![false; MAX_ENTITIES as usize],
            len: 0,
        }
    }

    /// Creates an unused `Entity`.
    ///
    /// # Panics
    ///
    /// Panics if the number of living entities already equals `MAX_ENTITIES`.
    pub fn create(&mut self) -> Entity {
        assert!(
            self.len < MAX_ENTITIES as usize,
            "Too many living entities. (MAX_ENTITIES: {:?})",
            MAX_ENTITIES
        );

        let index = self.frees.pop_front().unwrap();
        self.alives[index as usize] = true;
        self.len += 1;
        Entity::new(index)
    }

    /// Returns true if the identifier was handed out by `create` and has not
    /// been freed since.
    #[inline]
    pub fn is_alive(&self, ent: Entity) -> bool {
        ent.index() < MAX_ENTITIES && self.alives[ent.index() as usize]
    }

    /// Recycles the `Entity` identifier. It will be handed out again once
    /// every identifier freed before it has been reused.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is out of the valid range, or if it is not
    /// living.
    pub fn free(&mut self, ent: Entity) {
        assert!(
            ent.index() < MAX_ENTITIES,
            "Entity out of range. (MAX_ENTITIES: {:?})",
            MAX_ENTITIES
        );
        assert!(
            self.alives[ent.index() as usize],
            "Freeing an entity that is not living."
        );

        self.alives[ent.index() as usize] = false;
        self.frees.push_back(ent.index());
        self.len -= 1;
    }

    /// Returns the number of living entities in this pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no living entities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::new()
    }
}
