//! Preset overrides parsed from TOML
//!
//! Each top-level table is named after a particle kind and overrides any
//! subset of that kind's preset fields:
//!
//! ```toml
//! [fire]
//! life = 30
//! color = [255, 90, 10]
//! blend = "additive"
//! ```

use crate::preset::{BlendMode, ParticleKind, Preset, PresetTable, SizeDecay};
use cinder_core::{CinderError, Result, Rgb, Vec2};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetOverride {
    life: Option<f32>,
    size: Option<f32>,
    velocity: Option<[f32; 2]>,
    velocity_random: Option<f32>,
    gravity: Option<f32>,
    color: Option<[f32; 3]>,
    alpha: Option<f32>,
    size_decay: Option<SizeDecay>,
    blend: Option<BlendMode>,
}

impl PresetOverride {
    fn apply(self, preset: &mut Preset) {
        if let Some(v) = self.life {
            preset.life = v;
        }
        if let Some(v) = self.size {
            preset.size = v;
        }
        if let Some(v) = self.velocity {
            preset.velocity = Vec2::from_array(v);
        }
        if let Some(v) = self.velocity_random {
            preset.velocity_random = v;
        }
        if let Some(v) = self.gravity {
            preset.gravity = v;
        }
        if let Some(v) = self.color {
            preset.color = Rgb::from_array(v);
        }
        if let Some(v) = self.alpha {
            preset.alpha = v;
        }
        if let Some(v) = self.size_decay {
            preset.size_decay = v;
        }
        if let Some(v) = self.blend {
            preset.blend = v;
        }
    }
}

impl PresetTable {
    /// Built-in presets with the overrides from `source` applied
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let overrides: BTreeMap<String, PresetOverride> = toml::from_str(source)?;
        let mut table = Self::default();
        for (name, over) in overrides {
            let kind: ParticleKind = name.parse()?;
            let preset = table.get_mut(kind);
            over.apply(preset);
            validate(kind, preset)?;
            log::debug!("overrode preset '{kind}'");
        }
        Ok(table)
    }

    /// Read a preset override file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&source)?;
        log::info!("loaded particle presets from {}", path.display());
        Ok(table)
    }
}

fn validate(kind: ParticleKind, preset: &Preset) -> Result<()> {
    check_positive(kind, "life", preset.life)?;
    check_positive(kind, "size", preset.size)?;
    check_range(kind, "alpha", preset.alpha, 0.0, 1.0)?;
    check_range(kind, "velocity_random", preset.velocity_random, 0.0, f32::MAX)?;
    check_finite(kind, "gravity", preset.gravity)?;
    check_finite(kind, "velocity.x", preset.velocity.x)?;
    check_finite(kind, "velocity.y", preset.velocity.y)?;
    for (channel, value) in ["r", "g", "b"].iter().zip(preset.color.to_array()) {
        check_range(kind, &format!("color.{channel}"), value, 0.0, 255.0)?;
    }
    Ok(())
}

fn check_positive(kind: ParticleKind, field: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        return Ok(());
    }
    Err(CinderError::ValueOutOfRange {
        field: format!("{kind}.{field}"),
        min: f64::from(f32::EPSILON),
        max: f64::from(f32::MAX),
        value: f64::from(value),
    })
}

fn check_finite(kind: ParticleKind, field: &str, value: f32) -> Result<()> {
    check_range(kind, field, value, f32::MIN, f32::MAX)
}

fn check_range(kind: ParticleKind, field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(CinderError::ValueOutOfRange {
        field: format!("{kind}.{field}"),
        min: f64::from(min),
        max: f64::from(max),
        value: f64::from(value),
    })
}
