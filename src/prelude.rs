//! The most commonly used types, re-exported for glob imports.

pub use crate::ecs::bitset::Signature;
pub use crate::ecs::component::Component;
pub use crate::ecs::registry::ComponentTypeId;
pub use crate::ecs::world::{ComponentSet, World};
pub use crate::ecs::{Entity, MAX_COMPONENTS, MAX_ENTITIES};
