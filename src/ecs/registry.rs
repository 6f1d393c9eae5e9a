//! Component type registry: type-erased ownership of every arena, keyed by a
//! per-type identifier assigned at registration time.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;

use super::component::{Arena, Component, ErasedArena};
use super::{Entity, MAX_COMPONENTS};

/// A small identifier assigned once per distinct component type, in
/// registration order. It doubles as the bit index of that type inside a
/// [`Signature`](crate::ecs::bitset::Signature).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentTypeId(u8);

impl ComponentTypeId {
    /// Returns the bit index of this type.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ComponentTypeId ({})", self.0)
    }
}

/// `Registry` owns one [`Arena`] per registered component type and routes
/// typed operations by type identity to the erased storage.
///
/// Registration is explicit and one-time: ids are handed out densely in call
/// order, which makes assignment order testable instead of depending on
/// first-use order. There is no unregistration; once attached to the running
/// system, a component type's identity and storage persist for the process
/// lifetime.
pub struct Registry {
    types: HashMap<TypeId, ComponentTypeId>,
    arenas: Vec<Box<dyn ErasedArena>>,
}

impl Registry {
    /// Constructs a new, empty `Registry`.
    pub fn new() -> Self {
        Registry {
            types: HashMap::new(),
            arenas: Vec::new(),
        }
    }

    /// Registers a new component type, creating its arena and assigning the
    /// next `ComponentTypeId`.
    ///
    /// # Panics
    ///
    /// Panics if `T` was already registered, or if `MAX_COMPONENTS` types
    /// are registered already.
    pub fn register<T: Component>(&mut self) -> ComponentTypeId {
        let key = TypeId::of::<T>();
        assert!(
            !self.types.contains_key(&key),
            "Component type registered more than once."
        );
        assert!(
            self.arenas.len() < MAX_COMPONENTS,
            "Too many component types. (MAX_COMPONENTS: {:?})",
            MAX_COMPONENTS
        );

        let id = ComponentTypeId(self.arenas.len() as u8);
        self.types.insert(key, id);
        self.arenas.push(Box::new(Arena::<T>::new()));

        debug!("Registers component type {} as {}.", type_name::<T>(), id);
        id
    }

    /// Returns the identifier assigned to `T` at registration.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    pub fn type_id<T: Component>(&self) -> ComponentTypeId {
        *self
            .types
            .get(&TypeId::of::<T>())
            .expect("Tried to perform an operation on component type that is not registered.")
    }

    /// Returns a reference to the arena of `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    pub fn arena<T: Component>(&self) -> &Arena<T> {
        let id = self.type_id::<T>();
        self.arenas[id.index()]
            .as_any()
            .downcast_ref::<Arena<T>>()
            .unwrap()
    }

    /// Returns a mutable reference to the arena of `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered.
    pub fn arena_mut<T: Component>(&mut self) -> &mut Arena<T> {
        let id = self.type_id::<T>();
        self.arenas[id.index()]
            .as_any_mut()
            .downcast_mut::<Arena<T>>()
            .unwrap()
    }

    /// Drops the rows of `ent` from every arena that holds one. Used when an
    /// entity is destroyed.
    pub fn forget(&mut self, ent: Entity) {
        for arena in &mut self.arenas {
            arena.forget(ent);
        }
    }

    /// Returns the number of registered component types.
    #[inline]
    pub fn len(&self) -> usize {
        self.arenas.len()
    }

    /// Returns true if no component type was registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arenas.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Radius(f32);
    impl Component for Radius {}

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Tint([f32; 3]);
    impl Component for Tint {}

    #[test]
    fn dense_ids_in_registration_order() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        let r = registry.register::<Radius>();
        let t = registry.register::<Tint>();
        assert_eq!(r.index(), 0);
        assert_eq!(t.index(), 1);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.type_id::<Radius>(), r);
        assert_eq!(registry.type_id::<Tint>(), t);
    }

    #[test]
    fn typed_access_roundtrip() {
        let mut registry = Registry::new();
        registry.register::<Radius>();
        registry.register::<Tint>();

        let e1 = Entity::new(0);
        registry.arena_mut::<Radius>().insert(e1, Radius(2.0));
        registry.arena_mut::<Tint>().insert(e1, Tint([1.0, 0.0, 0.0]));

        assert_eq!(*registry.arena::<Radius>().get(e1), Radius(2.0));
        assert_eq!(*registry.arena::<Tint>().get(e1), Tint([1.0, 0.0, 0.0]));
    }

    #[test]
    fn forget_sweeps_every_arena() {
        let mut registry = Registry::new();
        registry.register::<Radius>();
        registry.register::<Tint>();

        let e1 = Entity::new(3);
        registry.arena_mut::<Radius>().insert(e1, Radius(1.0));

        registry.forget(e1);
        assert!(!registry.arena::<Radius>().has(e1));
        assert!(!registry.arena::<Tint>().has(e1));
    }

    #[test]
    #[should_panic]
    fn duplicated_registration() {
        let mut registry = Registry::new();
        registry.register::<Radius>();
        registry.register::<Radius>();
    }

    #[test]
    #[should_panic]
    fn unregistered_access() {
        let registry = Registry::new();
        registry.type_id::<Radius>();
    }
}
