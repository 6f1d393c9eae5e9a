//! # What is This?
//!
//! Glint is the entity-component core of a small real-time renderer. It
//! associates plain data values (components) with lightweight integer
//! identifiers (entities), and retrieves, in bulk, all entities that carry
//! a given combination of component types.
//!
//! The storage is dense and cache-friendly: every component type gets one
//! packed array that is compacted with a swap-remove on every removal, so
//! insert, remove and lookup are all O(1). Queries are answered from a
//! reverse index over entity signatures instead of a scan over every
//! entity.
//!
//! ## Quick Example
//!
//! ```rust
//! use glint::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Position { x: f32, y: f32 }
//! impl Component for Position {}
//!
//! let mut world = World::new();
//! world.register::<Position>();
//!
//! let e1 = world.create();
//! world.add(e1, Position { x: 1.0, y: 2.0 });
//!
//! world.get_mut::<Position>(e1).x += 1.0;
//! assert_eq!(world.get::<Position>(e1).x, 2.0);
//!
//! assert_eq!(world.query::<(Position,)>(), vec![e1]);
//! ```

#[macro_use]
extern crate log;

pub mod ecs;
pub mod prelude;

pub use self::ecs::bitset::Signature;
pub use self::ecs::component::{Arena, Component};
pub use self::ecs::registry::ComponentTypeId;
pub use self::ecs::world::{ComponentSet, World};
pub use self::ecs::{Entity, MAX_COMPONENTS, MAX_ENTITIES};
