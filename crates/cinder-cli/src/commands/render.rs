//! Headless demo-scene-to-PNG render command

use super::load_presets;
use crate::canvas::Canvas;
use anyhow::{Context, Result};
use cinder_particles::{Camera2D, ParticleKind, ParticleSystem};

pub struct RenderArgs {
    pub output: String,
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    pub zoom: f32,
    pub seed: u32,
    pub config: Option<String>,
}

const BACKGROUND: [u8; 3] = [12, 10, 18];

pub fn run(args: RenderArgs) -> Result<()> {
    let presets = load_presets(args.config.as_deref())?;
    let mut system = ParticleSystem::with_presets(presets, args.seed);

    // Campfire with smoke, a bubbling pool, and a drifting magic trail
    let streams = [
        system.emit_stream(ParticleKind::Fire, 0.0, 40.0, 0.0, 0.0, 3.0),
        system.emit_stream(ParticleKind::Smoke, 0.0, 20.0, 0.0, 0.0, 0.4),
        system.emit_stream(ParticleKind::Bubble, -90.0, 60.0, 0.0, 0.0, 0.5),
        system.emit_stream(ParticleKind::Magic, -100.0, -60.0, 3.0, 0.0, 2.0),
    ];

    for tick in 1..=args.frames {
        if tick == args.frames / 3 {
            system.emit_burst(ParticleKind::Spark, 90.0, 10.0, 120, 6.0);
            system.emit_burst(ParticleKind::Holy, 90.0, -50.0, 60, 20.0);
        }
        if tick == args.frames / 2 {
            system.emit_burst(ParticleKind::Blood, -30.0, 50.0, 40, 4.0);
            system.emit(ParticleKind::Dust, 40.0, 60.0, 30);
        }
        system.update(tick);
    }

    let camera = Camera2D::new(
        -(args.width as f32) * 0.5 / args.zoom,
        -(args.height as f32) * 0.5 / args.zoom,
        args.zoom,
    );
    let mut canvas = Canvas::new(args.width, args.height, BACKGROUND);
    system.render(&mut canvas, &camera);

    canvas
        .image()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    println!(
        "Rendered {} particle(s) after {} frame(s) to {}",
        system.active_count(),
        args.frames,
        args.output
    );
    log::info!(
        "{} of {} stream(s) started, pool usage {:.1}%",
        streams.iter().flatten().count(),
        streams.len(),
        system.pool_usage() * 100.0
    );

    Ok(())
}
