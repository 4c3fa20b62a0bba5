//! Entity-component core.
//!
//! - [`Store`] holds every value of one component type and defers removal
//!   until an explicit flush.
//! - [`World`] lazily owns one store per component type, keyed by `TypeId`.
//! - [`View`] / [`ViewMut`] iterate the entities holding a set of components.
//! - [`Registry`] layers name-based creation and per-entity membership on top
//!   of a world, so data files can address components by string.

mod registry;
mod store;
mod view;
mod world;

pub use registry::{Component, ComponentFns, Registrar, Registry};
pub use store::{Store, StoreIter, StoreIterMut};
pub use view::{ComponentSet, View, ViewMut};
pub use world::World;

// ---------------------------------------------------------------------------
// Entity — monotonic handle
// ---------------------------------------------------------------------------

/// Handle value that no live entity ever receives.
pub const INVALID_ENTITY: u32 = u32::MAX;

/// Opaque entity handle.
///
/// Handles are issued from a monotonically increasing counter and never
/// reused until the owning [`World`] is cleared. There is no generation
/// counter: a handle to a destroyed entity cannot be told apart from a live
/// one except by the absence of its components.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    pub const INVALID: Entity = Entity(INVALID_ENTITY);

    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 != INVALID_ENTITY
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
