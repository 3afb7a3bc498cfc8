use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use glowgrid::{Engine, EngineConfig, Raster, VariantId};

#[derive(Parser, Debug)]
#[command(name = "glowgrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the recognized animation ids.
    List,
    /// Sample one animation frame and write it as a PNG.
    Frame(FrameArgs),
    /// Sample one animation frame and write the JSON pixel matrix.
    Matrix(MatrixArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sample: SampleArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MatrixArgs {
    #[command(flatten)]
    sample: SampleArgs,

    /// Output JSON path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Animation id (see `glowgrid list`).
    #[arg(long)]
    variant: String,

    /// Frame index; 0 samples the initial state without advancing.
    #[arg(long)]
    frame: u64,

    /// Global hue rotation in degrees.
    #[arg(long, default_value_t = 0.0)]
    hue: f64,

    /// RNG seed, for reproducible digital rain.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Frame(args) => cmd_frame(args),
        Command::Matrix(args) => cmd_matrix(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for id in VariantId::ALL {
        println!("{id}");
    }
    Ok(())
}

fn sample(args: &SampleArgs) -> anyhow::Result<Raster> {
    let id: VariantId = args.variant.parse().with_context(|| {
        let valid: Vec<_> = VariantId::ALL.iter().map(|v| v.as_str()).collect();
        format!("valid animation ids: {}", valid.join(", "))
    })?;

    let mut engine = Engine::new(EngineConfig {
        seed: args.seed,
        ..EngineConfig::default()
    });
    engine.set_hue_shift(args.hue);
    Ok(engine.sample_frame(id, args.frame))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let raster = sample(&args.sample)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &raster.to_rgb_bytes(),
        raster.width(),
        raster.height(),
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::info!(path = %args.out.display(), "wrote frame");
    Ok(())
}

fn cmd_matrix(args: MatrixArgs) -> anyhow::Result<()> {
    let raster = sample(&args.sample)?;
    let json = serde_json::to_string(&raster).context("serialize matrix JSON")?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, &json)
                .with_context(|| format!("write matrix '{}'", path.display()))?;
            tracing::info!(path = %path.display(), "wrote matrix");
        }
        None => println!("{json}"),
    }
    Ok(())
}
