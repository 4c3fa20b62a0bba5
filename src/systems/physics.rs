use std::any::Any;

use crate::components::{Transform, Velocity};
use crate::engine::{Context, System};

/// Integrates `Velocity` into `Transform::translation`.
pub struct PhysicsSystem;

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update(&mut self, ctx: &mut Context, dt: f32) {
        for (_, transform, velocity) in ctx.registry.world_mut().view_mut::<(Transform, Velocity)>() {
            transform.translation += velocity.speed * dt;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
