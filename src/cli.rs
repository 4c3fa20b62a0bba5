use clap::Parser;
use std::path::PathBuf;

/// User-specified command line parameters. Each flag overrides the matching
/// value from the config file.
#[derive(Parser, Debug)]
#[clap(name = "tessera", about)]
pub struct Args {
    #[clap(long, short = 'c', help = "Engine configuration file (JSON).")]
    pub config: Option<PathBuf>,

    #[clap(long, short = 's', help = "Scene loaded at startup.")]
    pub scene: Option<PathBuf>,

    #[clap(long, short = 'n', help = "Stop after this many frames.")]
    pub frames: Option<u64>,

    #[clap(long, help = "Pace frames to the configured update rate.")]
    pub realtime: bool,
}
