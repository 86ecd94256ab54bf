//! Headless simulation command

use super::load_presets;
use anyhow::{Context, Result};
use cinder_particles::{ParticleKind, ParticleSystem};

pub struct SimulateArgs {
    pub kind: String,
    pub count: usize,
    pub burst: Option<f32>,
    pub stream: Option<f32>,
    pub frames: u64,
    pub every: u64,
    pub seed: u32,
    pub config: Option<String>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let kind: ParticleKind = args
        .kind
        .parse()
        .with_context(|| format!("Invalid particle kind '{}'", args.kind))?;
    let presets = load_presets(args.config.as_deref())?;
    let mut system = ParticleSystem::with_presets(presets, args.seed);

    let spawned = match args.burst {
        Some(radius) => system.emit_burst(kind, 0.0, 0.0, args.count, radius),
        None => system.emit(kind, 0.0, 0.0, args.count),
    };
    println!("Spawned {spawned} {kind} particle(s)");

    if let Some(rate) = args.stream {
        match system.emit_stream(kind, 0.0, 0.0, 0.0, 0.0, rate) {
            Some(handle) => println!("Stream {} running at {rate}/frame", handle.index()),
            None => println!("Warning: no free stream slot"),
        }
    }

    let every = args.every.max(1);
    for tick in 1..=args.frames {
        system.update(tick);
        if tick % every == 0 || tick == args.frames {
            println!(
                "frame {:>5}: {:>5} active ({:>5.1}% of pool)",
                tick,
                system.active_count(),
                system.pool_usage() * 100.0
            );
        }
    }

    let stats = system.stats();
    println!();
    println!("Spawned: {}", stats.spawned);
    println!("Dropped: {}", stats.dropped);
    println!("Expired: {}", stats.expired);

    Ok(())
}
