use anyhow::Context as _;
use clap::Parser;

use tessera::config::EngineConfig;
use tessera::systems::RenderSystem;
use tessera::Engine;

mod cli;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    log::info!("tessera {VERSION}");

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(scene) = args.scene {
        config.startup_scene = Some(scene);
    }
    if let Some(frames) = args.frames {
        config.max_frames = Some(frames);
    }
    config.realtime |= args.realtime;

    if config.max_frames.is_none() && !config.realtime {
        log::warn!("no frame limit and no pacing: running until quit at full speed");
    }

    let mut engine = Engine::new(config);
    let frames = engine.run();

    let drawn = engine
        .system::<RenderSystem>()
        .map_or(0, |render| render.draw_list().len());
    println!(
        "{frames} frames, {} entities, {drawn} primitives in the last frame",
        engine.registry().entity_count()
    );
    Ok(())
}
