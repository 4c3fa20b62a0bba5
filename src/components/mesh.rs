use glam::Vec3;

use super::LoadComponent;

/// How a [`Mesh`]'s vertices (or indices, when present) are assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Derived render data produced by the geometry and track systems.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub topology: Topology,
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub colours: Vec<Vec3>,
    pub filled: bool,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

impl LoadComponent for Mesh {
    const NAME: &'static str = "Mesh";

    // Meshes are always generated; any fields in scene data are ignored.
    fn load(&mut self, _data: &serde_json::Value) -> Result<(), serde_json::Error> {
        Ok(())
    }
}
