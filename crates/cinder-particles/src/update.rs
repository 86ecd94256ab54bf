//! Per-frame integration of every live particle

use crate::preset::{ParticleKind, PresetTable, SizeDecay};
use crate::store::{ParticleStore, MAX_PARTICLES};
use std::f32::consts::TAU;

/// Three full spiral loops over a magic particle's life
const MAGIC_LOOPS: f32 = 3.0;
const MAGIC_SPIRAL: f32 = 0.1;
/// Four wobbles over a bubble's life
const BUBBLE_WOBBLES: f32 = 4.0;
const BUBBLE_WOBBLE: f32 = 0.05;

/// Age, move and restyle every live particle, freeing any whose life runs
/// out. This is the only place slots are returned to the free list.
/// Returns the number of particles that expired.
pub(crate) fn integrate(store: &mut ParticleStore, presets: &PresetTable) -> usize {
    let mut expired = 0;

    for i in 0..MAX_PARTICLES {
        if !store.alive[i] {
            continue;
        }

        store.life[i] -= 1.0;
        if store.life[i] <= 0.0 {
            store.free(i);
            expired += 1;
            continue;
        }

        let kind = store.kind[i];
        let preset = presets.get(kind);

        store.vy[i] += preset.gravity;
        store.x[i] += store.vx[i];
        store.y[i] += store.vy[i];

        let ratio = store.life[i] / store.max_life[i];
        let age = 1.0 - ratio;
        store.alpha[i] = preset.alpha * ratio;

        match preset.size_decay {
            SizeDecay::Shrink => store.size[i] = store.base_size[i] * ratio,
            SizeDecay::Grow => store.size[i] = store.base_size[i] * (2.0 - ratio),
            SizeDecay::Constant => {}
        }

        match kind {
            ParticleKind::Magic => {
                let phase = age * TAU * MAGIC_LOOPS;
                store.vx[i] += phase.cos() * MAGIC_SPIRAL;
                store.vy[i] += phase.sin() * MAGIC_SPIRAL;
                store.alpha[i] *= 0.6 + 0.4 * (phase * 3.0).sin();
            }
            ParticleKind::Bubble => {
                store.vx[i] += (age * TAU * BUBBLE_WOBBLES).sin() * BUBBLE_WOBBLE;
            }
            ParticleKind::Fire => {
                // red -> orange -> yellow as the flame ages
                store.r[i] = 255.0;
                store.g[i] = 60.0 + 180.0 * age;
                store.b[i] = 60.0 * age;
            }
            ParticleKind::Smoke
            | ParticleKind::Blood
            | ParticleKind::Spark
            | ParticleKind::Dust
            | ParticleKind::Holy => {}
        }
    }

    expired
}
