use glam::{Vec2, Vec3};
use serde::Deserialize;

use super::{LoadComponent, decode};

/// A ribbon of constant width following a centreline. `TrackSystem` turns it
/// into a triangle-list [`Mesh`](super::Mesh) whenever `dirty` is set.
///
/// Unlike the other built-ins every field is required in scene data.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Track {
    #[serde(rename = "points")]
    pub centreline: Vec<Vec2>,
    pub width: f32,
    pub closed: bool,
    pub colour: Vec3,
    #[serde(skip)]
    pub dirty: bool,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            centreline: Vec::new(),
            width: 1.0,
            closed: false,
            colour: Vec3::ONE,
            dirty: false,
        }
    }
}

impl LoadComponent for Track {
    const NAME: &'static str = "Track";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        self.dirty = true;
        Ok(())
    }
}
