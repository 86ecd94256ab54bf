//! Particle kinds and their per-kind constants

use cinder_core::{CinderError, Rgb, Vec2};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Number of particle kinds
pub const KIND_COUNT: usize = 8;

/// The closed set of particle kinds. Discriminants are the kind ids used for
/// render grouping, so batches come out in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ParticleKind {
    Fire = 0,
    Smoke = 1,
    Magic = 2,
    Blood = 3,
    Spark = 4,
    Bubble = 5,
    Dust = 6,
    Holy = 7,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; KIND_COUNT] = [
        ParticleKind::Fire,
        ParticleKind::Smoke,
        ParticleKind::Magic,
        ParticleKind::Blood,
        ParticleKind::Spark,
        ParticleKind::Bubble,
        ParticleKind::Dust,
        ParticleKind::Holy,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ParticleKind::Fire => "fire",
            ParticleKind::Smoke => "smoke",
            ParticleKind::Magic => "magic",
            ParticleKind::Blood => "blood",
            ParticleKind::Spark => "spark",
            ParticleKind::Bubble => "bubble",
            ParticleKind::Dust => "dust",
            ParticleKind::Holy => "holy",
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParticleKind {
    type Err = CinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CinderError::InvalidEnumValue {
                value: s.to_string(),
                allowed: Self::ALL.iter().map(|k| k.name().to_string()).collect(),
            })
    }
}

/// How a particle's size evolves over its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeDecay {
    Shrink,
    Grow,
    Constant,
}

/// Compositing mode used when drawing a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    Additive,
    Normal,
}

/// Immutable physical and visual constants for one particle kind.
/// Velocities and gravity are in world units per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Lifetime in frames before jitter
    pub life: f32,
    /// Spawn size before jitter
    pub size: f32,
    pub velocity: Vec2,
    /// Each velocity axis gets a uniform offset in `[-velocity_random, velocity_random]`
    pub velocity_random: f32,
    /// Added to vy every frame; negative floats upward
    pub gravity: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub size_decay: SizeDecay,
    pub blend: BlendMode,
}

/// One preset per kind, indexed by kind id
#[derive(Debug, Clone, PartialEq)]
pub struct PresetTable {
    presets: [Preset; KIND_COUNT],
}

impl PresetTable {
    pub fn get(&self, kind: ParticleKind) -> &Preset {
        &self.presets[kind.index()]
    }

    pub(crate) fn get_mut(&mut self, kind: ParticleKind) -> &mut Preset {
        &mut self.presets[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleKind, &Preset)> {
        ParticleKind::ALL.iter().copied().zip(self.presets.iter())
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self { presets: BUILTIN }
    }
}

const BUILTIN: [Preset; KIND_COUNT] = [
    // fire
    Preset {
        life: 40.0,
        size: 4.0,
        velocity: Vec2::new(0.0, -1.2),
        velocity_random: 0.6,
        gravity: -0.02,
        color: Rgb::new(255.0, 60.0, 0.0),
        alpha: 0.9,
        size_decay: SizeDecay::Shrink,
        blend: BlendMode::Additive,
    },
    // smoke
    Preset {
        life: 80.0,
        size: 6.0,
        velocity: Vec2::new(0.0, -0.5),
        velocity_random: 0.3,
        gravity: -0.005,
        color: Rgb::new(90.0, 90.0, 90.0),
        alpha: 0.5,
        size_decay: SizeDecay::Grow,
        blend: BlendMode::Normal,
    },
    // magic
    Preset {
        life: 60.0,
        size: 3.0,
        velocity: Vec2::ZERO,
        velocity_random: 1.0,
        gravity: 0.0,
        color: Rgb::new(170.0, 80.0, 255.0),
        alpha: 1.0,
        size_decay: SizeDecay::Shrink,
        blend: BlendMode::Additive,
    },
    // blood
    Preset {
        life: 35.0,
        size: 2.5,
        velocity: Vec2::ZERO,
        velocity_random: 1.5,
        gravity: 0.15,
        color: Rgb::new(160.0, 10.0, 10.0),
        alpha: 1.0,
        size_decay: SizeDecay::Constant,
        blend: BlendMode::Normal,
    },
    // spark
    Preset {
        life: 20.0,
        size: 2.0,
        velocity: Vec2::ZERO,
        velocity_random: 2.5,
        gravity: 0.08,
        color: Rgb::new(255.0, 230.0, 120.0),
        alpha: 1.0,
        size_decay: SizeDecay::Shrink,
        blend: BlendMode::Additive,
    },
    // bubble
    Preset {
        life: 70.0,
        size: 3.0,
        velocity: Vec2::new(0.0, -0.6),
        velocity_random: 0.2,
        gravity: -0.01,
        color: Rgb::new(140.0, 200.0, 255.0),
        alpha: 0.6,
        size_decay: SizeDecay::Constant,
        blend: BlendMode::Normal,
    },
    // dust
    Preset {
        life: 50.0,
        size: 3.0,
        velocity: Vec2::ZERO,
        velocity_random: 0.4,
        gravity: 0.01,
        color: Rgb::new(160.0, 140.0, 110.0),
        alpha: 0.4,
        size_decay: SizeDecay::Grow,
        blend: BlendMode::Normal,
    },
    // holy
    Preset {
        life: 55.0,
        size: 4.0,
        velocity: Vec2::new(0.0, -0.4),
        velocity_random: 0.5,
        gravity: -0.01,
        color: Rgb::new(255.0, 240.0, 170.0),
        alpha: 0.9,
        size_decay: SizeDecay::Shrink,
        blend: BlendMode::Additive,
    },
];
