//! Built-in frame systems, listed in the order [`Engine::new`](crate::engine::Engine::new)
//! runs them.

mod geometry;
mod input;
mod physics;
mod render;
mod resource;
mod track;

pub use geometry::{GeometrySystem, geometry_mesh};
pub use input::InputSystem;
pub use physics::PhysicsSystem;
pub use render::{DrawList, Primitive, RenderSystem};
pub use resource::ResourceSystem;
pub use track::{TrackSystem, track_mesh};
