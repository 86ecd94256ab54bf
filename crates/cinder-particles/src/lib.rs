//! Cinder Particles - fixed-capacity 2D particle system
//!
//! Provides a single pool of short-lived visual particles with:
//! - Struct-of-arrays storage and a free-list allocator with O(1) alloc/free
//! - Point, burst and continuous stream emission driven by per-kind presets
//! - Per-frame integration with kind-specific behaviour (fire, magic, bubble)
//! - Kind-grouped drawing through a host `DrawSurface`, minimizing blend switches
//! - GPU instance packing for instanced draw calls

mod config;
mod emit;
pub mod instance;
pub mod preset;
pub mod rand;
pub mod render;
pub mod store;
pub mod stream;
pub mod system;
mod update;

pub use instance::{InstanceBatch, ParticleInstance};
pub use preset::{BlendMode, ParticleKind, Preset, PresetTable, SizeDecay, KIND_COUNT};
pub use render::{Batch, Camera2D, DrawSurface, RenderBatcher};
pub use store::{ParticleStore, MAX_PARTICLES};
pub use stream::{StreamHandle, MAX_STREAMS};
pub use system::{ParticleStats, ParticleSystem};
