use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Portfolio slideshow: pick, order and present a folder of images
#[derive(Parser, Debug)]
#[command(name = "portfolio-slides", version, about)]
pub struct Args {
    /// Directory holding the portfolio images
    #[arg(default_value = "images")]
    pub image_directory: PathBuf,

    /// Where the slide configuration is stored (defaults to the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep the slide configuration in memory only
    #[arg(long, conflicts_with = "config")]
    pub ephemeral: bool,

    /// Seed for the transition picker, for reproducible shows
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start in fullscreen mode
    #[arg(long)]
    pub fullscreen: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Unknown levels fall back to info.
    pub fn log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}
