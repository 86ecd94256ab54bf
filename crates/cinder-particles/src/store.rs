//! Struct-of-arrays particle storage with a free-list slot allocator
//!
//! Every column is allocated once at `MAX_PARTICLES` entries and never
//! resized. Slots are addressed by index only; `alloc` pops the free stack
//! and `free` pushes onto it, both O(1).

use crate::preset::{ParticleKind, PresetTable};
use crate::rand::ParticleRng;
use cinder_core::{Rgb, Vec2};

/// Fixed pool capacity
pub const MAX_PARTICLES: usize = 2000;

const LIFE_JITTER: f32 = 0.3;
const SIZE_JITTER: f32 = 0.4;

pub struct ParticleStore {
    pub(crate) x: Vec<f32>,
    pub(crate) y: Vec<f32>,
    pub(crate) vx: Vec<f32>,
    pub(crate) vy: Vec<f32>,
    pub(crate) life: Vec<f32>,
    pub(crate) max_life: Vec<f32>,
    pub(crate) size: Vec<f32>,
    /// Jittered spawn size that the decay modes scale from
    pub(crate) base_size: Vec<f32>,
    pub(crate) r: Vec<f32>,
    pub(crate) g: Vec<f32>,
    pub(crate) b: Vec<f32>,
    pub(crate) alpha: Vec<f32>,
    pub(crate) kind: Vec<ParticleKind>,
    pub(crate) alive: Vec<bool>,
    free_list: Vec<usize>,
    free_count: usize,
    live: usize,
}

impl ParticleStore {
    pub fn new() -> Self {
        let mut store = Self {
            x: vec![0.0; MAX_PARTICLES],
            y: vec![0.0; MAX_PARTICLES],
            vx: vec![0.0; MAX_PARTICLES],
            vy: vec![0.0; MAX_PARTICLES],
            life: vec![0.0; MAX_PARTICLES],
            max_life: vec![0.0; MAX_PARTICLES],
            size: vec![0.0; MAX_PARTICLES],
            base_size: vec![0.0; MAX_PARTICLES],
            r: vec![0.0; MAX_PARTICLES],
            g: vec![0.0; MAX_PARTICLES],
            b: vec![0.0; MAX_PARTICLES],
            alpha: vec![0.0; MAX_PARTICLES],
            kind: vec![ParticleKind::Fire; MAX_PARTICLES],
            alive: vec![false; MAX_PARTICLES],
            free_list: vec![0; MAX_PARTICLES],
            free_count: 0,
            live: 0,
        };
        store.reset();
        store
    }

    /// Mark every slot dead and rebuild the full free stack so that slot 0
    /// is handed out first.
    pub fn reset(&mut self) {
        self.alive.fill(false);
        for (i, entry) in self.free_list.iter_mut().enumerate() {
            *entry = MAX_PARTICLES - 1 - i;
        }
        self.free_count = MAX_PARTICLES;
        self.live = 0;
    }

    /// Take a slot off the free stack. Returns `None` without touching any
    /// state when the pool is exhausted.
    pub(crate) fn alloc(&mut self) -> Option<usize> {
        if self.free_count == 0 {
            return None;
        }
        self.free_count -= 1;
        let slot = self.free_list[self.free_count];
        self.alive[slot] = true;
        self.live += 1;
        Some(slot)
    }

    /// Return a live slot to the free stack. Only the expiry check in the
    /// update pass calls this; a second call for the same life cycle would
    /// duplicate the index on the stack.
    pub(crate) fn free(&mut self, slot: usize) {
        debug_assert!(self.alive[slot], "slot {slot} freed twice");
        self.alive[slot] = false;
        self.free_list[self.free_count] = slot;
        self.free_count += 1;
        self.live -= 1;
    }

    /// Write every column of `slot` from the preset for `kind`, with life,
    /// size and velocity jittered.
    pub(crate) fn init_particle(
        &mut self,
        slot: usize,
        kind: ParticleKind,
        x: f32,
        y: f32,
        presets: &PresetTable,
        rng: &mut ParticleRng,
    ) {
        let preset = presets.get(kind);

        self.x[slot] = x;
        self.y[slot] = y;
        self.vx[slot] = preset.velocity.x + rng.spread(preset.velocity_random);
        self.vy[slot] = preset.velocity.y + rng.spread(preset.velocity_random);

        let life = preset.life * rng.range(1.0 - LIFE_JITTER, 1.0 + LIFE_JITTER);
        self.life[slot] = life;
        self.max_life[slot] = life;

        let size = preset.size * rng.range(1.0 - SIZE_JITTER, 1.0 + SIZE_JITTER);
        self.size[slot] = size;
        self.base_size[slot] = size;

        self.r[slot] = preset.color.r;
        self.g[slot] = preset.color.g;
        self.b[slot] = preset.color.b;
        self.alpha[slot] = preset.alpha;
        self.kind[slot] = kind;
    }

    /// Number of live particles
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of entries on the free stack
    pub fn free_count(&self) -> usize {
        self.free_count
    }

    pub fn capacity(&self) -> usize {
        MAX_PARTICLES
    }

    pub fn is_alive(&self, slot: usize) -> bool {
        self.alive.get(slot).copied().unwrap_or(false)
    }

    /// Indices of all live slots in ascending order
    pub fn live_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(i, &alive)| alive.then_some(i))
    }

    pub fn kind(&self, slot: usize) -> ParticleKind {
        self.kind[slot]
    }

    pub fn position(&self, slot: usize) -> Vec2 {
        Vec2::new(self.x[slot], self.y[slot])
    }

    pub fn velocity(&self, slot: usize) -> Vec2 {
        Vec2::new(self.vx[slot], self.vy[slot])
    }

    pub fn life(&self, slot: usize) -> f32 {
        self.life[slot]
    }

    pub fn max_life(&self, slot: usize) -> f32 {
        self.max_life[slot]
    }

    pub fn size(&self, slot: usize) -> f32 {
        self.size[slot]
    }

    pub fn color(&self, slot: usize) -> Rgb {
        Rgb::new(self.r[slot], self.g[slot], self.b[slot])
    }

    pub fn alpha(&self, slot: usize) -> f32 {
        self.alpha[slot]
    }

    /// Entries currently on the free stack, top last
    #[cfg(test)]
    pub(crate) fn free_entries(&self) -> &[usize] {
        &self.free_list[..self.free_count]
    }
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new()
    }
}
