//! The `World` facade that wires the allocator, registry and signature
//! tracker together.

use super::bitset::Signature;
use super::component::Component;
use super::entities::EntityPool;
use super::registry::{ComponentTypeId, Registry};
use super::signature::SignatureTracker;
use super::Entity;

/// The `World` struct contains all the data, which is entities and their
/// components, and is the only entry point collaborators use.
///
/// All operations run synchronously on the calling thread with no internal
/// locking; references handed out by `get`/`get_mut`/`data` are borrowed for
/// the duration of a call and must not outlive the next structural mutation,
/// which the borrow checker enforces. A multithreaded host must serialize
/// access with its own lock around the whole `World`.
///
/// Every failure an operation documents is a precondition violation caused
/// by a caller bug, so the policy is an immediate panic with a diagnostic
/// rather than an error value.
pub struct World {
    entities: EntityPool,
    registry: Registry,
    tracker: SignatureTracker,
}

impl World {
    /// Constructs a new, empty `World`.
    pub fn new() -> Self {
        World {
            entities: EntityPool::new(),
            registry: Registry::new(),
            tracker: SignatureTracker::new(),
        }
    }

    /// Creates and returns an unused `Entity` with an all-zero signature.
    ///
    /// # Panics
    ///
    /// Panics if `MAX_ENTITIES` entities are living already.
    pub fn create(&mut self) -> Entity {
        let ent = self.entities.create();
        self.tracker.activate(ent);
        ent
    }

    /// Destroys `ent`: strips it from every arena holding one of its
    /// components, resets its signature, and recycles the identifier.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is out of the valid range, or if the entity
    /// is not living (e.g. freed twice).
    pub fn free(&mut self, ent: Entity) {
        self.registry.forget(ent);
        self.tracker.deactivate(ent);
        self.entities.free(ent);
    }

    /// Returns the number of living entities in this `World`.
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity is living.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registers a new component type. This is one-time setup: call it for
    /// every component type before any entity uses it.
    ///
    /// # Panics
    ///
    /// Panics if `T` was already registered, or if `MAX_COMPONENTS` types
    /// are registered already.
    pub fn register<T: Component>(&mut self) -> ComponentTypeId {
        self.registry.register::<T>()
    }

    /// Returns the identifier assigned to `T` at registration.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    #[inline]
    pub fn type_id<T: Component>(&self) -> ComponentTypeId {
        self.registry.type_id::<T>()
    }

    /// Adds a component to `ent` and sets the matching bit in its signature.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered, or if the entity already has a
    /// component of this type.
    pub fn add<T: Component>(&mut self, ent: Entity, value: T) {
        let id = self.registry.type_id::<T>();
        self.registry.arena_mut::<T>().insert(ent, value);
        self.tracker.insert_bit(ent, id);
    }

    /// Removes the component of type `T` from `ent`, clears the matching
    /// signature bit, and returns the removed value.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered, or if the entity has no component
    /// of this type.
    pub fn remove<T: Component>(&mut self, ent: Entity) -> T {
        let id = self.registry.type_id::<T>();
        let value = self.registry.arena_mut::<T>().remove(ent);
        self.tracker.remove_bit(ent, id);
        value
    }

    /// Returns true if `ent` has a component of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    #[inline]
    pub fn has<T: Component>(&self, ent: Entity) -> bool {
        self.registry.arena::<T>().has(ent)
    }

    /// Returns a reference to the component of type `T` on `ent`.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered, or if the entity has no component
    /// of this type.
    #[inline]
    pub fn get<T: Component>(&self, ent: Entity) -> &T {
        self.registry.arena::<T>().get(ent)
    }

    /// Returns a mutable reference to the component of type `T` on `ent`;
    /// writes go to the exact storage later reads observe.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered, or if the entity has no component
    /// of this type.
    #[inline]
    pub fn get_mut<T: Component>(&mut self, ent: Entity) -> &mut T {
        self.registry.arena_mut::<T>().get_mut(ent)
    }

    /// Returns the packed rows of every living component of type `T`, for
    /// systems that visit all instances of one type without per-entity
    /// lookups.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    #[inline]
    pub fn data<T: Component>(&self) -> &[T] {
        self.registry.arena::<T>().data()
    }

    /// Mutable variant of [`World::data`].
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    #[inline]
    pub fn data_mut<T: Component>(&mut self) -> &mut [T] {
        self.registry.arena_mut::<T>().data_mut()
    }

    /// Returns the current signature of `ent`.
    #[inline]
    pub fn signature(&self, ent: Entity) -> Signature {
        self.tracker.get(ent)
    }

    /// Returns every living entity whose signature is a superset of the
    /// given component tuple, e.g. `world.query::<(Mesh, Transform)>()`.
    ///
    /// Ordering across distinct signatures is unspecified; entities sharing
    /// a signature come out in the order they reached it.
    ///
    /// # Panics
    ///
    /// Panics if any type in the tuple was never registered.
    pub fn query<S: ComponentSet>(&self) -> Vec<Entity> {
        self.query_signature(S::signature(&self.registry))
    }

    /// Raw form of [`World::query`], taking a prebuilt requirement.
    pub fn query_signature(&self, required: Signature) -> Vec<Entity> {
        self.tracker.query(required)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of component types that can act as a query requirement. Implemented
/// for tuples of up to four components.
pub trait ComponentSet {
    /// Builds the requirement signature, with one bit per component type in
    /// the set.
    fn signature(registry: &Registry) -> Signature;
}

macro_rules! impl_component_set {
    ($($cmp: ident), *) => {
        impl<$($cmp: Component,)*> ComponentSet for ($($cmp,)*) {
            fn signature(registry: &Registry) -> Signature {
                let mut sig = Signature::new();
                $( sig.insert(registry.type_id::<$cmp>().index()); )*
                sig
            }
        }
    };
}

impl_component_set!(C1);
impl_component_set!(C1, C2);
impl_component_set!(C1, C2, C3);
impl_component_set!(C1, C2, C3, C4);
