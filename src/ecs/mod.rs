//! Entity Component System (ECS)
//!
//! The pieces fit together like so: the [`EntityPool`] issues and recycles
//! entity identifiers from a bounded pool; one [`Arena`] per component type
//! holds the packed component rows; the [`Registry`] owns every arena behind
//! a type-erased interface and routes typed operations to the right one; the
//! [`SignatureTracker`] records which component types each entity carries and
//! keeps a reverse index from signature to entity set so that queries never
//! touch entities one by one. [`World`] wires all of them together and is the
//! only type callers normally interact with.
//!
//! [`EntityPool`]: entities::EntityPool
//! [`Arena`]: component::Arena
//! [`Registry`]: registry::Registry
//! [`SignatureTracker`]: signature::SignatureTracker
//! [`World`]: world::World

use std::fmt;

pub mod bitset;
pub mod component;
pub mod entities;
pub mod registry;
pub mod signature;
pub mod world;

pub use self::bitset::Signature;
pub use self::component::{Arena, Component};
pub use self::entities::EntityPool;
pub use self::registry::{ComponentTypeId, Registry};
pub use self::signature::SignatureTracker;
pub use self::world::{ComponentSet, World};

/// The upper bound of living entities. Identifiers are always drawn from
/// `[0, MAX_ENTITIES)`.
pub const MAX_ENTITIES: u32 = 1024;

/// The upper bound of distinct component types per process.
pub const MAX_COMPONENTS: usize = 32;

/// A lightweight identifier for a game object. An `Entity` owns no data
/// itself; components attached through [`World`](world::World) do.
///
/// The underlying index is recycled after [`World::free`](world::World::free),
/// so a copy of a freed `Entity` may later refer to a different object.
/// Holding on to freed entities is a caller defect.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    #[inline]
    pub(crate) fn new(index: u32) -> Self {
        Entity(index)
    }

    /// Returns the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entity ({})", self.0)
    }
}
