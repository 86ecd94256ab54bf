//! Kind-grouped particle drawing
//!
//! Live indices are grouped by kind with a counting sort into a scratch
//! buffer that is allocated once, then drawn so that the surface blend mode
//! changes only at kind boundaries whose blend modes differ.

use crate::preset::{BlendMode, ParticleKind, PresetTable, KIND_COUNT};
use crate::store::{ParticleStore, MAX_PARTICLES};
use cinder_core::{Rgb, Vec2};
use std::ops::Range;

/// Particles whose on-screen side is at or below this are not drawn
pub const MIN_DRAW_SIZE: f32 = 0.1;

/// Opaque 2D drawing target supplied by the host
pub trait DrawSurface {
    /// Change how subsequent fills composite with what is already drawn
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Fill an axis-aligned rectangle in screen space
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [u8; 3], alpha: f32);
}

/// World-to-screen transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Camera2D {
    pub fn new(x: f32, y: f32, zoom: f32) -> Self {
        Self { x, y, zoom }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new((world.x - self.x) * self.zoom, (world.y - self.y) * self.zoom)
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// A contiguous run of grouped indices sharing one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub kind: ParticleKind,
    pub range: Range<usize>,
}

pub struct RenderBatcher {
    /// `[0, MAX_PARTICLES)` gathers live indices, `[MAX_PARTICLES, 2 * MAX_PARTICLES)`
    /// receives them grouped by kind
    scratch: Vec<usize>,
    counts: [usize; KIND_COUNT],
    offsets: [usize; KIND_COUNT],
    total: usize,
}

impl RenderBatcher {
    pub fn new() -> Self {
        Self {
            scratch: vec![0; MAX_PARTICLES * 2],
            counts: [0; KIND_COUNT],
            offsets: [0; KIND_COUNT],
            total: 0,
        }
    }

    /// Counting-sort the live slots of `store` by kind id. Returns the number
    /// of live particles grouped.
    pub fn group(&mut self, store: &ParticleStore) -> usize {
        self.counts = [0; KIND_COUNT];
        let (gather, grouped) = self.scratch.split_at_mut(MAX_PARTICLES);

        let mut total = 0;
        for slot in 0..MAX_PARTICLES {
            if store.alive[slot] {
                gather[total] = slot;
                self.counts[store.kind[slot].index()] += 1;
                total += 1;
            }
        }

        let mut running = 0;
        for (offset, count) in self.offsets.iter_mut().zip(self.counts) {
            *offset = running;
            running += count;
        }

        let mut cursor = self.offsets;
        for &slot in &gather[..total] {
            let k = store.kind[slot].index();
            grouped[cursor[k]] = slot;
            cursor[k] += 1;
        }
        gather[..total].copy_from_slice(&grouped[..total]);

        self.total = total;
        total
    }

    /// Live indices from the last `group` call, contiguous by ascending kind
    pub fn grouped(&self) -> &[usize] {
        &self.scratch[..self.total]
    }

    /// Non-empty per-kind runs from the last `group` call, in kind order
    pub fn batches(&self) -> impl Iterator<Item = Batch> + '_ {
        ParticleKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.counts[kind.index()] > 0)
            .map(|kind| {
                let start = self.offsets[kind.index()];
                Batch {
                    kind,
                    range: start..start + self.counts[kind.index()],
                }
            })
    }

    /// Draw the grouped particles. The blend mode is set lazily before the
    /// first visible particle and changed only when it differs; the surface
    /// is left in normal mode. Does nothing when nothing is live.
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        store: &ParticleStore,
        presets: &PresetTable,
        surface: &mut S,
        camera: &Camera2D,
    ) {
        let mut active: Option<BlendMode> = None;

        for &slot in self.grouped() {
            let side = store.size[slot] * camera.zoom;
            if side <= MIN_DRAW_SIZE {
                continue;
            }

            let blend = presets.get(store.kind[slot]).blend;
            if active != Some(blend) {
                surface.set_blend_mode(blend);
                active = Some(blend);
            }

            let center = camera.world_to_screen(Vec2::new(store.x[slot], store.y[slot]));
            let color = Rgb::new(store.r[slot], store.g[slot], store.b[slot]).to_u8();
            let alpha = store.alpha[slot].clamp(0.0, 1.0);
            let half = side * 0.5;
            surface.fill_rect(center.x - half, center.y - half, side, side, color, alpha);
        }

        if active == Some(BlendMode::Additive) {
            surface.set_blend_mode(BlendMode::Normal);
        }
    }
}

impl Default for RenderBatcher {
    fn default() -> Self {
        Self::new()
    }
}
