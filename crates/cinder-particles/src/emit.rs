//! Spawn requests: point emission, radial bursts and continuous streams

use crate::preset::{ParticleKind, PresetTable};
use crate::rand::ParticleRng;
use crate::store::ParticleStore;
use crate::stream::StreamHandle;
use crate::system::ParticleSystem;
use cinder_core::Vec2;

/// Outward speed added to every burst particle
const BURST_SPEED: f32 = 1.5;

/// Allocate and initialize one particle, or `None` if the pool is full
pub(crate) fn spawn(
    store: &mut ParticleStore,
    presets: &PresetTable,
    rng: &mut ParticleRng,
    kind: ParticleKind,
    x: f32,
    y: f32,
) -> Option<usize> {
    let slot = store.alloc()?;
    store.init_particle(slot, kind, x, y, presets, rng);
    Some(slot)
}

impl ParticleSystem {
    /// Spawn up to `count` particles at (x, y). Stops at the first failed
    /// allocation; returns how many were spawned.
    pub fn emit(&mut self, kind: ParticleKind, x: f32, y: f32, count: usize) -> usize {
        let mut spawned = 0;
        while spawned < count {
            if spawn(&mut self.store, &self.presets, &mut self.rng, kind, x, y).is_none() {
                break;
            }
            spawned += 1;
        }
        self.record_spawns(spawned, count - spawned);
        spawned
    }

    /// Spawn up to `count` particles scattered within `radius` of (x, y),
    /// each pushed outward along its own spawn angle.
    pub fn emit_burst(
        &mut self,
        kind: ParticleKind,
        x: f32,
        y: f32,
        count: usize,
        radius: f32,
    ) -> usize {
        let origin = Vec2::new(x, y);
        let mut spawned = 0;
        while spawned < count {
            let angle = self.rng.angle();
            let distance = self.rng.range(0.0, radius);
            let direction = Vec2::from_angle(angle);
            let at = origin + direction * distance;

            let Some(slot) = spawn(&mut self.store, &self.presets, &mut self.rng, kind, at.x, at.y)
            else {
                break;
            };
            self.store.vx[slot] += direction.x * BURST_SPEED;
            self.store.vy[slot] += direction.y * BURST_SPEED;
            spawned += 1;
        }
        self.record_spawns(spawned, count - spawned);
        spawned
    }

    /// Start a continuous emitter at (x, y) drifting by (dx, dy) per frame
    /// and spawning `rate` particles per frame. Returns `None` when every
    /// stream slot is in use.
    pub fn emit_stream(
        &mut self,
        kind: ParticleKind,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        rate: f32,
    ) -> Option<StreamHandle> {
        let handle = self
            .streams
            .start(kind, Vec2::new(x, y), Vec2::new(dx, dy), rate);
        match handle {
            Some(h) => log::debug!("started {kind} stream {} at {rate}/frame", h.index()),
            None => log::debug!("no free stream slot for {kind} stream"),
        }
        handle
    }

    /// Stop a stream. Stale or out-of-range handles are ignored.
    pub fn stop_stream(&mut self, handle: StreamHandle) {
        self.streams.stop(handle);
    }

    /// Move a running stream's emitter. No-op for inactive handles.
    pub fn set_stream_position(&mut self, handle: StreamHandle, x: f32, y: f32) {
        if let Some(emitter) = self.streams.get_mut(handle) {
            emitter.position = Vec2::new(x, y);
        }
    }

    /// Change a running stream's rate, keeping its fractional carry-over
    pub fn set_stream_rate(&mut self, handle: StreamHandle, rate: f32) {
        if let Some(emitter) = self.streams.get_mut(handle) {
            emitter.rate = rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::preset::ParticleKind;
    use crate::store::MAX_PARTICLES;
    use crate::stream::{StreamHandle, MAX_STREAMS};
    use crate::system::ParticleSystem;

    #[test]
    fn emit_spawns_at_point() {
        let mut system = ParticleSystem::with_seed(1);
        assert_eq!(system.emit(ParticleKind::Dust, 4.0, 9.0, 10), 10);
        assert_eq!(system.active_count(), 10);
        for slot in system.store().live_slots() {
            assert_eq!(system.store().position(slot).to_array(), [4.0, 9.0]);
            assert_eq!(system.store().kind(slot), ParticleKind::Dust);
        }
    }

    #[test]
    fn emit_on_full_pool_is_a_no_op() {
        let mut system = ParticleSystem::with_seed(2);
        assert_eq!(system.emit(ParticleKind::Fire, 0.0, 0.0, MAX_PARTICLES), MAX_PARTICLES);
        assert_eq!(system.active_count(), MAX_PARTICLES);

        assert_eq!(system.emit(ParticleKind::Fire, 0.0, 0.0, 5), 0);
        assert_eq!(system.emit_burst(ParticleKind::Spark, 0.0, 0.0, 5, 3.0), 0);
        assert_eq!(system.active_count(), MAX_PARTICLES);
        assert_eq!(system.stats().dropped, 10);
    }

    #[test]
    fn emit_stops_early_when_pool_fills() {
        let mut system = ParticleSystem::with_seed(3);
        system.emit(ParticleKind::Smoke, 0.0, 0.0, MAX_PARTICLES - 3);
        assert_eq!(system.emit(ParticleKind::Smoke, 0.0, 0.0, 10), 3);
        assert_eq!(system.active_count(), MAX_PARTICLES);
        assert_eq!(system.stats().spawned, MAX_PARTICLES as u64);
        assert_eq!(system.stats().dropped, 7);
    }

    #[test]
    fn burst_stays_within_radius_and_pushes_outward() {
        let mut system = ParticleSystem::with_seed(4);
        let radius = 12.0;
        assert_eq!(system.emit_burst(ParticleKind::Blood, 0.0, 0.0, 300, radius), 300);

        let preset = *system.presets().get(ParticleKind::Blood);
        let mut outward = 0;
        for slot in system.store().live_slots() {
            let pos = system.store().position(slot);
            assert!(pos.length() <= radius + 1e-4);

            // the burst impulse dominates the preset's random spread
            let vel = system.store().velocity(slot);
            if pos.length() > 1e-3 && pos.x * vel.x + pos.y * vel.y > 0.0 {
                outward += 1;
            }
            assert!(vel.length() <= 1.5 + preset.velocity_random * 2f32.sqrt() + 1e-4);
        }
        assert!(outward > 200, "only {outward} particles moved outward");
    }

    #[test]
    fn burst_with_zero_radius_spawns_at_origin() {
        let mut system = ParticleSystem::with_seed(5);
        system.emit_burst(ParticleKind::Magic, 3.0, -2.0, 20, 0.0);
        for slot in system.store().live_slots() {
            assert_eq!(system.store().position(slot).to_array(), [3.0, -2.0]);
        }
    }

    #[test]
    fn stream_slots_exhaust_and_recover() {
        let mut system = ParticleSystem::with_seed(6);
        let handles: Vec<StreamHandle> = (0..MAX_STREAMS)
            .map(|_| system.emit_stream(ParticleKind::Holy, 0.0, 0.0, 0.0, 0.0, 0.1).unwrap())
            .collect();
        assert!(system.emit_stream(ParticleKind::Holy, 0.0, 0.0, 0.0, 0.0, 0.1).is_none());

        system.stop_stream(handles[17]);
        let reused = system.emit_stream(ParticleKind::Holy, 0.0, 0.0, 0.0, 0.0, 0.1);
        assert_eq!(reused, Some(handles[17]));
    }

    #[test]
    fn stop_stream_tolerates_bad_handles() {
        let mut system = ParticleSystem::with_seed(7);
        let h = system
            .emit_stream(ParticleKind::Bubble, 0.0, 0.0, 0.0, 0.0, 1.0)
            .unwrap();
        system.stop_stream(h);
        system.stop_stream(h);
        if let Some(bogus) = StreamHandle::from_raw(9_999) {
            system.stop_stream(bogus);
        }
        system.update(0);
        assert_eq!(system.active_count(), 0);
    }

    #[test]
    fn stream_can_be_moved_and_retuned() {
        let mut system = ParticleSystem::with_seed(8);
        let h = system
            .emit_stream(ParticleKind::Dust, 0.0, 0.0, 0.0, 0.0, 0.0)
            .unwrap();
        system.update(0);
        assert_eq!(system.active_count(), 0);

        system.set_stream_rate(h, 2.0);
        system.set_stream_position(h, 50.0, 60.0);
        system.update(1);
        assert_eq!(system.active_count(), 2);

        system.stop_stream(h);
        system.set_stream_rate(h, 10.0);
        system.update(2);
        assert_eq!(system.active_count(), 2);
    }

    #[test]
    fn stopped_handle_refers_to_reused_slot() {
        let mut system = ParticleSystem::with_seed(9);
        let handles: Vec<_> = (0..MAX_STREAMS)
            .map(|_| {
                system
                    .emit_stream(ParticleKind::Dust, 0.0, 0.0, 0.0, 0.0, 0.0)
                    .unwrap()
            })
            .collect();
        let stale = handles[0];
        system.stop_stream(stale);

        let fresh = system
            .emit_stream(ParticleKind::Spark, 0.0, 0.0, 0.0, 0.0, 0.0)
            .unwrap();
        assert_eq!(fresh, stale);

        system.set_stream_rate(stale, 3.0);
        system.update(0);
        assert_eq!(system.active_count(), 3);
        assert!(system
            .store()
            .live_slots()
            .all(|slot| system.store().kind(slot) == ParticleKind::Spark));
    }
}
