//! Built-in component types and their registration list.
//!
//! Every type here is a plain value with a `Default`, addressable by name in
//! scene files through [`register_builtin`] and
//! [`SceneLoader::builtin`](crate::scene::SceneLoader::builtin).

mod lake;
mod level;
mod mesh;
mod shapes;
mod spatial;
mod track;

pub use lake::Lake;
pub use level::Level;
pub use mesh::{Mesh, Topology};
pub use shapes::{Geometry, Point, Triangle};
pub use spatial::{Transform, Velocity};
pub use track::Track;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

use crate::ecs::{Component, Registry};

/// A component that can be populated from the field object of a scene file.
pub trait LoadComponent: Component {
    /// Name used in scene files.
    const NAME: &'static str;

    /// Replace `self` with the value described by `data`.
    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error>;
}

/// Register every built-in component with `registry`.
pub fn register_builtin(registry: &mut Registry) {
    registry.register::<Point>(Point::NAME);
    registry.register::<Triangle>(Triangle::NAME);
    registry.register::<Geometry>(Geometry::NAME);
    registry.register::<Transform>(Transform::NAME);
    registry.register::<Velocity>(Velocity::NAME);
    registry.register::<Track>(Track::NAME);
    registry.register::<Lake>(Lake::NAME);
    registry.register::<Mesh>(Mesh::NAME);
    registry.register::<Level>(Level::NAME);
}

fn decode<T: DeserializeOwned>(data: &serde_json::Value) -> Result<T, serde_json::Error> {
    T::deserialize(data)
}

/// Segment counts accept any non-negative JSON number. Fractions truncate.
fn segment_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = f64::deserialize(deserializer)?;
    if n.is_finite() && (0.0..=u32::MAX as f64).contains(&n) {
        Ok(n as u32)
    } else {
        Err(D::Error::custom(format_args!("invalid segment count {n}")))
    }
}
