use std::any::Any;

use crate::commands::LoadRequest;
use crate::components::Level;
use crate::engine::{Context, System};

/// Consumes `Level` entities: each one queues a load of its file and is
/// removed.
pub struct ResourceSystem;

impl System for ResourceSystem {
    fn name(&self) -> &'static str {
        "resource"
    }

    fn update(&mut self, ctx: &mut Context, _dt: f32) {
        let requests: Vec<_> = ctx
            .registry
            .world()
            .view::<(Level,)>()
            .map(|(entity, level)| (entity, level.file.clone()))
            .collect();

        for (entity, file) in requests {
            log::debug!("level change requested by {entity}: {}", file.display());
            ctx.commands.push(LoadRequest::new(file));
            ctx.registry.remove_entity(entity);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
