use std::collections::VecDeque;
use std::path::PathBuf;

use crate::engine::Context;
use crate::error::EngineError;

/// Deferred work executed between the input and update stages of a frame.
pub trait Command {
    fn execute(self: Box<Self>, ctx: &mut Context) -> Result<(), EngineError>;
}

/// FIFO of pending commands.
#[derive(Default)]
pub struct CommandQueue {
    queue: VecDeque<Box<dyn Command>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Command + 'static) {
        self.queue.push_back(Box::new(command));
    }

    pub fn push_boxed(&mut self, command: Box<dyn Command>) {
        self.queue.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Box<dyn Command>> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

// ── LoadRequest ───────────────────────────────────────────────────────────────

/// Replace the current scene with the one in `path`.
///
/// An unreadable or blank file leaves the current scene untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub path: PathBuf,
}

impl LoadRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Command for LoadRequest {
    fn execute(self: Box<Self>, ctx: &mut Context) -> Result<(), EngineError> {
        ctx.load_scene(&self.path)?;
        Ok(())
    }
}

// ── Quit ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quit;

impl Command for Quit {
    fn execute(self: Box<Self>, ctx: &mut Context) -> Result<(), EngineError> {
        ctx.request_quit();
        Ok(())
    }
}
