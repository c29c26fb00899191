use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use firework_visualizer::canvas::Canvas;
use firework_visualizer::effects::{EffectState, Modifier};
use firework_visualizer::visual;

const DEFAULT_SEED: u64 = 0xF1EE_2026;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "export_frames",
    version,
    about = "Offline deterministic frame export (seeded engine -> PPM files)"
)]
pub(crate) struct Cli {
    #[arg(long, value_name = "DIR", default_value = "frames")]
    pub(crate) out_dir: PathBuf,

    #[arg(long, default_value_t = 32)]
    pub(crate) frames: usize,

    #[arg(long, default_value_t = 500)]
    pub(crate) width: i32,

    #[arg(long, default_value_t = 500)]
    pub(crate) height: i32,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub(crate) seed: u64,

    /// Comma-separated effect names active for the whole run.
    #[arg(long, value_delimiter = ',')]
    pub(crate) effects: Vec<String>,
}

pub(crate) fn validate_args(args: &Cli) -> Result<()> {
    if args.width <= 0 {
        bail!("--width must be >= 1");
    }
    if args.height <= 0 {
        bail!("--height must be >= 1");
    }
    if args.frames == 0 {
        bail!("--frames must be >= 1");
    }
    Ok(())
}

pub(crate) fn ppm_bytes(canvas: &Canvas) -> Vec<u8> {
    let mut rgb = Vec::new();
    canvas.write_rgb8_top_down(&mut rgb);
    let mut out = format!("P6\n{} {}\n255\n", canvas.width(), canvas.height()).into_bytes();
    out.extend_from_slice(&rgb);
    out
}

fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}

fn run(args: Cli) -> Result<()> {
    validate_args(&args)?;

    let mut state = EffectState::new(args.width, args.height);
    for name in &args.effects {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let modifier = Modifier::parse(name).ok_or_else(|| {
            anyhow!(
                "unknown effect '{}' (expected one of: {})",
                name,
                Modifier::all().map(|m| m.as_str()).join(", ")
            )
        })?;
        if !state.is_active(modifier) {
            state.toggle(modifier);
        }
    }

    let mut rng = fastrand::Rng::with_seed(args.seed);
    let mut canvas = Canvas::new(args.width, args.height);

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create {}", args.out_dir.display()))?;

    for i in 0..args.frames {
        visual::tick(&mut state, &mut rng, &mut canvas);
        let path = args.out_dir.join(format!("frame_{i:05}.ppm"));
        let mut file = fs::File::create(&path)
            .with_context(|| format!("create {}", path.display()))?;
        file.write_all(&ppm_bytes(&canvas))
            .with_context(|| format!("write {}", path.display()))?;
    }

    println!(
        "wrote {} frame(s) to {} (seed {:#x})",
        args.frames,
        args.out_dir.display(),
        args.seed
    );
    Ok(())
}
