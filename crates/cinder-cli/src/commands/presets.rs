//! Preset table listing

use super::load_presets;
use anyhow::Result;
use cinder_particles::{BlendMode, SizeDecay};

pub fn run(config: Option<&str>) -> Result<()> {
    let table = load_presets(config)?;

    println!(
        "{:<7} {:>5} {:>5} {:>13} {:>6} {:>7} {:>15} {:>5} {:>8} {:>8}",
        "kind", "life", "size", "velocity", "rand", "gravity", "color", "alpha", "decay", "blend"
    );
    for (kind, preset) in table.iter() {
        let [r, g, b] = preset.color.to_u8();
        let decay = match preset.size_decay {
            SizeDecay::Shrink => "shrink",
            SizeDecay::Grow => "grow",
            SizeDecay::Constant => "constant",
        };
        let blend = match preset.blend {
            BlendMode::Additive => "additive",
            BlendMode::Normal => "normal",
        };
        println!(
            "{:<7} {:>5.0} {:>5.1} {:>13} {:>6.2} {:>7.3} {:>15} {:>5.2} {:>8} {:>8}",
            kind.name(),
            preset.life,
            preset.size,
            format!("({:.1}, {:.1})", preset.velocity.x, preset.velocity.y),
            preset.velocity_random,
            preset.gravity,
            format!("({r}, {g}, {b})"),
            preset.alpha,
            decay,
            blend,
        );
    }

    Ok(())
}
