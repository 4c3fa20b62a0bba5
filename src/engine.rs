use std::any::Any;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::commands::{CommandQueue, LoadRequest};
use crate::components::register_builtin;
use crate::config::EngineConfig;
use crate::ecs::Registry;
use crate::error::{EngineError, LoadError};
use crate::input::{InputQueue, KeyBindings};
use crate::scene::SceneLoader;
use crate::systems::{
    GeometrySystem, InputSystem, PhysicsSystem, RenderSystem, ResourceSystem, TrackSystem,
};

// ── System trait ──────────────────────────────────────────────────────────────

/// One stage of per-frame logic. Every hook defaults to a no-op.
pub trait System: Any {
    fn name(&self) -> &'static str;
    fn init(&mut self, _ctx: &mut Context) {}
    /// Runs before queued commands.
    fn input(&mut self, _ctx: &mut Context) {}
    fn update(&mut self, _ctx: &mut Context, _dt: f32) {}
    /// Runs after every update; the context is read-only here.
    fn draw(&mut self, _ctx: &Context) {}
    fn shutdown(&mut self, _ctx: &mut Context) {}
    fn as_any(&self) -> &dyn Any;
}

// ── Context ───────────────────────────────────────────────────────────────────

/// Everything systems and commands share: the registry and the queues that
/// feed it.
pub struct Context {
    pub registry: Registry,
    pub loader: SceneLoader,
    pub commands: CommandQueue,
    pub input: InputQueue,
    pub bindings: KeyBindings,
    pub config: EngineConfig,
    running: bool,
    frame: u64,
}

impl Context {
    /// A context with every built-in component registered and the number
    /// keys bound to the configured scenes.
    pub fn new(config: EngineConfig) -> Self {
        let mut registry = Registry::new();
        register_builtin(&mut registry);
        let bindings = KeyBindings::with_scenes(&config.scene_list());
        Self {
            registry,
            loader: SceneLoader::builtin(),
            commands: CommandQueue::new(),
            input: InputQueue::new(),
            bindings,
            config,
            running: true,
            frame: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Completed frames.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Replace the registry's contents with the scene in `path`.
    ///
    /// Returns `Ok(None)` without touching the registry when the file is
    /// unreadable or blank. On a component error the entities created so far
    /// remain.
    pub fn load_scene(&mut self, path: &Path) -> Result<Option<usize>, LoadError> {
        let Some(scene) = self.loader.read(path)? else {
            return Ok(None);
        };
        self.registry.clear();
        let entities = self.loader.instantiate(&mut self.registry, &scene)?;
        log::info!("loaded scene {} ({} entities)", path.display(), entities.len());
        Ok(Some(entities.len()))
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

pub struct Engine {
    ctx: Context,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// An engine running the built-in systems in frame order.
    pub fn new(config: EngineConfig) -> Self {
        let systems: Vec<Box<dyn System>> = vec![
            Box::new(InputSystem),
            Box::new(ResourceSystem),
            Box::new(PhysicsSystem),
            Box::new(GeometrySystem),
            Box::new(TrackSystem),
            Box::new(RenderSystem::new()),
        ];
        Self {
            ctx: Context::new(config),
            systems,
            initialized: false,
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn registry(&self) -> &Registry {
        &self.ctx.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.ctx.registry
    }

    pub fn is_running(&self) -> bool {
        self.ctx.running
    }

    pub fn frame(&self) -> u64 {
        self.ctx.frame
    }

    /// Append a system after the built-in ones.
    pub fn add_system(&mut self, system: impl System) {
        self.systems.push(Box::new(system));
    }

    pub fn system<S: System>(&self) -> Option<&S> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<S>())
    }

    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|s| s.name())
    }

    /// Run every system's `init` and queue the startup scene. Called by the
    /// first [`step`](Self::step) if not called before.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        for system in &mut self.systems {
            system.init(&mut self.ctx);
        }
        if let Some(scene) = self.ctx.config.startup_scene.clone() {
            self.ctx.commands.push(LoadRequest::new(scene));
        }
        log::info!("engine started with {} systems", self.systems.len());
    }

    /// Execute one frame: input, queued commands, update, draw, flush.
    ///
    /// A failing command ends the frame immediately. Commands queued behind
    /// it stay queued and no flush happens.
    pub fn step(&mut self, dt: f32) -> Result<(), EngineError> {
        self.init();

        for system in &mut self.systems {
            system.input(&mut self.ctx);
        }

        while let Some(command) = self.ctx.commands.pop() {
            command.execute(&mut self.ctx)?;
        }

        for system in &mut self.systems {
            system.update(&mut self.ctx, dt);
        }

        for system in &mut self.systems {
            system.draw(&self.ctx);
        }

        self.ctx.registry.flush();
        self.ctx.frame += 1;
        Ok(())
    }

    /// Step at the configured fixed rate until quit or `max_frames`.
    /// Frame errors are logged and the loop carries on. Returns the number of
    /// frames stepped.
    pub fn run(&mut self) -> u64 {
        let dt = self.ctx.config.fixed_dt();
        let max_frames = self.ctx.config.max_frames;
        let pace = self.ctx.config.realtime && dt > 0.0;
        let mut frames = 0;

        self.init();
        while self.ctx.running && max_frames.is_none_or(|max| frames < max) {
            let started = Instant::now();
            if let Err(err) = self.step(dt) {
                log::error!("frame {frames}: {err}");
            }
            frames += 1;

            if pace {
                let budget = Duration::from_secs_f32(dt);
                if let Some(rest) = budget.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        self.shutdown();
        frames
    }

    pub fn shutdown(&mut self) {
        for system in self.systems.iter_mut().rev() {
            system.shutdown(&mut self.ctx);
        }
        log::info!("engine stopped after {} frames", self.ctx.frame);
    }
}

// ── EngineBuilder ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn with_config(mut self, config: EngineConfig) -> Self { self.config = config; self }
    pub fn with_ups(mut self, ups: u32) -> Self { self.config.updates_per_second = ups; self }
    pub fn with_max_frames(mut self, frames: u64) -> Self { self.config.max_frames = Some(frames); self }
    pub fn with_realtime(mut self, realtime: bool) -> Self { self.config.realtime = realtime; self }

    pub fn with_startup_scene(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.startup_scene = Some(path.into()); self
    }

    /// Bind the next free number key to `path`.
    pub fn with_scene(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.scenes.push(path.into()); self
    }

    pub fn with_system(mut self, system: impl System) -> Self {
        self.systems.push(Box::new(system)); self
    }

    pub fn build(self) -> Engine {
        let mut engine = Engine::new(self.config);
        engine.systems.extend(self.systems);
        engine
    }
}
