use std::any::Any;

use crate::commands::{LoadRequest, Quit};
use crate::engine::{Context, System};
use crate::input::Binding;

/// Turns bound key events into commands.
pub struct InputSystem;

impl System for InputSystem {
    fn name(&self) -> &'static str {
        "input"
    }

    fn input(&mut self, ctx: &mut Context) {
        while let Some(event) = ctx.input.pop() {
            match ctx.bindings.resolve(&event) {
                Some(Binding::Quit) => ctx.commands.push(Quit),
                Some(Binding::Load(path)) => ctx.commands.push(LoadRequest::new(path.clone())),
                None => {}
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
