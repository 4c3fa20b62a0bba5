pub mod commands;
pub mod components;
pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod input;
pub mod scene;
pub mod systems;

pub use engine::{Context, Engine, EngineBuilder, System};
pub use error::{ConfigError, EngineError, LoadError};
