use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::Deserialize;

use super::{LoadComponent, decode};

/// Placement of an entity: translation, Euler rotation in radians (applied
/// X, then Y, then Z) and per-axis scale.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

impl LoadComponent for Transform {
    const NAME: &'static str = "Transform";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        Ok(())
    }
}

/// Linear velocity in units per second.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Velocity {
    pub speed: Vec3,
}

impl LoadComponent for Velocity {
    const NAME: &'static str = "Velocity";

    fn load(&mut self, data: &serde_json::Value) -> Result<(), serde_json::Error> {
        *self = decode(data)?;
        Ok(())
    }
}
