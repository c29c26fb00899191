use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "firework-visualizer",
    version,
    about = "Animated firework/waterwork terminal visualizer with ten stackable effects"
)]
pub struct Config {
    /// Logical canvas width in pixels.
    #[arg(long, default_value_t = 500)]
    pub width: i32,

    /// Logical canvas height in pixels.
    #[arg(long, default_value_t = 500)]
    pub height: i32,

    #[arg(long, value_enum, default_value_t = SpeedArg::Slow)]
    pub speed: SpeedArg,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    /// Presentation frame cap; tick cadence is governed by --speed.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed the random source for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated effect names active at startup
    /// (e.g. "random-colour,trails").
    #[arg(long, value_delimiter = ',')]
    pub effects: Vec<String>,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpeedArg {
    Slow,
    Fast,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
    #[value(alias = "hires", alias = "dots")]
    Braille,
    Kitty,
}
