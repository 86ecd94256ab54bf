//! The particle system facade driven once per frame by the host

use crate::emit::spawn;
use crate::instance::{self, InstanceBatch, ParticleInstance};
use crate::preset::PresetTable;
use crate::rand::ParticleRng;
use crate::render::{Camera2D, DrawSurface, RenderBatcher};
use crate::store::{ParticleStore, MAX_PARTICLES};
use crate::stream::StreamPool;
use crate::update;

const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

/// Cumulative spawn/expiry counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleStats {
    pub spawned: u64,
    /// Spawn requests dropped because the pool was full
    pub dropped: u64,
    pub expired: u64,
}

/// Owns the particle pool, stream emitters and render scratch space.
///
/// Call `update` once per frame, then `render` (or `pack_instances`). All
/// methods take `&mut self`, so a system can't be stepped and drawn at the
/// same time.
pub struct ParticleSystem {
    pub(crate) store: ParticleStore,
    pub(crate) presets: PresetTable,
    pub(crate) streams: StreamPool,
    pub(crate) rng: ParticleRng,
    batcher: RenderBatcher,
    stats: ParticleStats,
    last_tick: u64,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::with_presets(PresetTable::default(), DEFAULT_SEED)
    }

    /// Built-in presets with a fixed RNG seed, for reproducible runs
    pub fn with_seed(seed: u32) -> Self {
        Self::with_presets(PresetTable::default(), seed)
    }

    pub fn with_presets(presets: PresetTable, seed: u32) -> Self {
        Self {
            store: ParticleStore::new(),
            presets,
            streams: StreamPool::new(),
            rng: ParticleRng::new(seed),
            batcher: RenderBatcher::new(),
            stats: ParticleStats::default(),
            last_tick: 0,
        }
    }

    /// Advance one frame: streams emit first, then every live particle is
    /// integrated and expired ones are freed. `tick` is recorded only.
    pub fn update(&mut self, tick: u64) {
        self.last_tick = tick;

        let Self {
            store,
            presets,
            streams,
            rng,
            stats,
            ..
        } = self;
        streams.advance(|kind, at| {
            if spawn(store, presets, rng, kind, at.x, at.y).is_some() {
                stats.spawned += 1;
                true
            } else {
                stats.dropped += 1;
                false
            }
        });

        let expired = update::integrate(&mut self.store, &self.presets);
        self.stats.expired += expired as u64;
    }

    /// Draw every live particle, grouped by kind, through `surface`
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, camera: &Camera2D) {
        if self.batcher.group(&self.store) == 0 {
            return;
        }
        self.batcher
            .draw(&self.store, &self.presets, surface, camera);
    }

    /// Group live particles and write them into caller-owned instance and
    /// batch buffers, for hosts that draw with instanced quads.
    pub fn pack_instances(
        &mut self,
        camera: &Camera2D,
        instances: &mut Vec<ParticleInstance>,
        batches: &mut Vec<InstanceBatch>,
    ) {
        self.batcher.group(&self.store);
        instance::pack(
            &self.batcher,
            &self.store,
            &self.presets,
            camera,
            instances,
            batches,
        );
    }

    /// Free every particle and stop every stream
    pub fn clear(&mut self) {
        let live = self.store.live_count();
        let streams = self.streams.active_count();
        self.store.reset();
        self.streams.stop_all();
        log::debug!("cleared {live} particle(s) and {streams} stream(s)");
    }

    pub fn active_count(&self) -> usize {
        self.store.live_count()
    }

    /// Fraction of the pool in use, in [0, 1]
    pub fn pool_usage(&self) -> f32 {
        self.store.live_count() as f32 / MAX_PARTICLES as f32
    }

    pub fn active_streams(&self) -> usize {
        self.streams.active_count()
    }

    pub fn stats(&self) -> ParticleStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ParticleStats::default();
    }

    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    /// Kind-grouped indices from the most recent `render` or `pack_instances`
    pub fn batcher(&self) -> &RenderBatcher {
        &self.batcher
    }

    pub(crate) fn record_spawns(&mut self, spawned: usize, dropped: usize) {
        self.stats.spawned += spawned as u64;
        self.stats.dropped += dropped as u64;
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}
