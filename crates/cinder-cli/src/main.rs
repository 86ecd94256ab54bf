//! Cinder CLI - headless driver for the Cinder particle engine

mod canvas;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{presets, render, simulate};

#[derive(Parser)]
#[command(name = "cinder")]
#[command(about = "Fixed-capacity 2D particle engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the particle preset table
    Presets {
        /// TOML file with preset overrides
        #[arg(long)]
        config: Option<String>,
    },

    /// Run a headless simulation and report pool usage
    Simulate {
        /// Particle kind to emit (fire, smoke, magic, blood, spark, bubble, dust, holy)
        #[arg(long, default_value = "fire")]
        kind: String,

        /// Particles spawned on the first frame
        #[arg(long, default_value = "50")]
        count: usize,

        /// Spawn the initial particles as a burst of this radius
        #[arg(long)]
        burst: Option<f32>,

        /// Also run a stream emitter at this many particles per frame
        #[arg(long)]
        stream: Option<f32>,

        /// Number of frames to simulate
        #[arg(long, default_value = "60")]
        frames: u64,

        /// Print a status line every N frames
        #[arg(long, default_value = "10")]
        every: u64,

        /// RNG seed
        #[arg(long, default_value = "1")]
        seed: u32,

        /// TOML file with preset overrides
        #[arg(long)]
        config: Option<String>,
    },

    /// Simulate a demo scene and rasterize the final frame to a PNG image
    Render {
        /// Output image path
        #[arg(short, long, default_value = "particles.png")]
        output: String,

        /// Image width in pixels
        #[arg(long, default_value = "640")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "480")]
        height: u32,

        /// Frames to simulate before capturing
        #[arg(long, default_value = "45")]
        frames: u64,

        /// World-to-screen zoom
        #[arg(long, default_value = "2.0")]
        zoom: f32,

        /// RNG seed
        #[arg(long, default_value = "1")]
        seed: u32,

        /// TOML file with preset overrides
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Presets { config } => presets::run(config.as_deref()),
        Commands::Simulate {
            kind,
            count,
            burst,
            stream,
            frames,
            every,
            seed,
            config,
        } => simulate::run(simulate::SimulateArgs {
            kind,
            count,
            burst,
            stream,
            frames,
            every,
            seed,
            config,
        }),
        Commands::Render {
            output,
            width,
            height,
            frames,
            zoom,
            seed,
            config,
        } => render::run(render::RenderArgs {
            output,
            width,
            height,
            frames,
            zoom,
            seed,
            config,
        }),
    }
}
