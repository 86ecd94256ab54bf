//! CLI command implementations

pub mod presets;
pub mod render;
pub mod simulate;

use anyhow::{Context, Result};
use cinder_particles::PresetTable;

/// Built-in presets, or the built-ins with overrides from `config` applied
pub fn load_presets(config: Option<&str>) -> Result<PresetTable> {
    match config {
        Some(path) => PresetTable::load(path)
            .with_context(|| format!("Failed to load preset overrides from {path}")),
        None => Ok(PresetTable::default()),
    }
}
