use glam::Vec3;
use serde::Deserialize;

use super::{LoadComponent, decode};

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);

// ── Point ─────────────────────────────────────────────────────────────────────

/// A single coloured point at the entity's origin.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Point {
    pub colour: Vec3,
}

impl Default for Point {
    fn default() -> Self {
        Self { colour: RED }
    }
}

impl LoadComponent for Point {
    const NAME: &'static str = "Point";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        Ok(())
    }
}

// ── Triangle ──────────────────────────────────────────────────────────────────

/// A flat-coloured triangle in entity space.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Triangle {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
    pub colour: Vec3,
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            v1: Vec3::new(-1.0, 0.0, 0.0),
            v2: Vec3::new(0.0, 1.0, 0.0),
            v3: Vec3::new(1.0, 0.0, 0.0),
            colour: RED,
        }
    }
}

impl Triangle {
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v1, self.v2, self.v3]
    }
}

impl LoadComponent for Triangle {
    const NAME: &'static str = "Triangle";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        Ok(())
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Parametric ellipse / regular polygon. `GeometrySystem` turns it into a
/// [`Mesh`](super::Mesh) whenever `dirty` is set.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub axis_a: f32,
    pub axis_b: f32,
    #[serde(deserialize_with = "super::segment_count")]
    pub segments: u32,
    pub closed: bool,
    pub filled: bool,
    pub colour: Vec3,
    #[serde(skip)]
    pub dirty: bool,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            axis_a: 1.0,
            axis_b: 1.0,
            segments: 4,
            closed: true,
            filled: true,
            colour: RED,
            dirty: true,
        }
    }
}

impl LoadComponent for Geometry {
    const NAME: &'static str = "Geometry";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        self.dirty = true;
        Ok(())
    }
}
