use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Command-line arguments. Anything given here overrides the config file.
#[derive(Debug, Parser)]
#[command(name = "solar-orrery", about = "Sun, earth and moon, spinning")]
pub struct CliArgs {
    /// Path to a RON config file.
    #[arg(long, default_value = "solar-orrery.ron")]
    pub config: PathBuf,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Initial speed multiplier.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Start with the animation paused.
    #[arg(long)]
    pub paused: bool,

    /// Directory that relative texture paths are resolved against.
    #[arg(long)]
    pub texture_root: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(speed) = args.speed {
            self.animation.initial_speed = speed;
        }
        if args.paused {
            self.animation.start_paused = true;
        }
        if let Some(ref root) = args.texture_root {
            self.textures.root = Some(root.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
