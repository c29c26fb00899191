use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cfg = firework_visualizer::config::Config::parse();
    firework_visualizer::app::run(cfg)
}
