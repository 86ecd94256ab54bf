//! Continuous-rate emitters backed by a fixed slot array

use crate::preset::ParticleKind;
use crate::store::MAX_PARTICLES;
use cinder_core::Vec2;

/// Fixed number of stream emitter slots
pub const MAX_STREAMS: usize = 64;

/// Opaque handle to a running stream emitter.
///
/// A handle names an emitter slot and is only valid until `stop_stream`.
/// Once stopped, the slot may be claimed by a later `emit_stream`, and the
/// old handle then refers to that new stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamHandle(usize);

impl StreamHandle {
    /// Rebuild a handle from an integer passed through a host boundary.
    /// Negative values are the "no stream" sentinel.
    pub fn from_raw(raw: i32) -> Option<Self> {
        usize::try_from(raw).ok().map(StreamHandle)
    }

    /// Integer form of an optional handle, `-1` for `None`
    pub fn to_raw(handle: Option<Self>) -> i32 {
        handle
            .and_then(|h| i32::try_from(h.0).ok())
            .unwrap_or(-1)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StreamEmitter {
    pub kind: ParticleKind,
    pub position: Vec2,
    /// Added to `position` every frame
    pub velocity: Vec2,
    /// Particles per frame, fractional rates allowed
    pub rate: f32,
    /// Fractional spawn carry-over
    pub accumulator: f32,
    pub active: bool,
}

impl StreamEmitter {
    const INACTIVE: Self = Self {
        kind: ParticleKind::Fire,
        position: Vec2::ZERO,
        velocity: Vec2::ZERO,
        rate: 0.0,
        accumulator: 0.0,
        active: false,
    };
}

pub struct StreamPool {
    emitters: [StreamEmitter; MAX_STREAMS],
    /// Round-robin scan start
    next: usize,
}

impl StreamPool {
    pub fn new() -> Self {
        Self {
            emitters: [StreamEmitter::INACTIVE; MAX_STREAMS],
            next: 0,
        }
    }

    /// Claim the first inactive slot at or after the cursor. A single pass
    /// over the array; fails fast when every slot is busy.
    pub fn start(
        &mut self,
        kind: ParticleKind,
        position: Vec2,
        velocity: Vec2,
        rate: f32,
    ) -> Option<StreamHandle> {
        let index = (0..MAX_STREAMS)
            .map(|step| (self.next + step) % MAX_STREAMS)
            .find(|&i| !self.emitters[i].active)?;

        self.emitters[index] = StreamEmitter {
            kind,
            position,
            velocity,
            rate,
            accumulator: 0.0,
            active: true,
        };
        self.next = (index + 1) % MAX_STREAMS;
        Some(StreamHandle(index))
    }

    /// Deactivate a stream. Unknown or already stopped handles are ignored.
    pub fn stop(&mut self, handle: StreamHandle) {
        if let Some(emitter) = self.emitters.get_mut(handle.0) {
            emitter.active = false;
        }
    }

    pub fn stop_all(&mut self) {
        for emitter in &mut self.emitters {
            emitter.active = false;
        }
        self.next = 0;
    }

    pub fn get(&self, handle: StreamHandle) -> Option<&StreamEmitter> {
        self.emitters.get(handle.0).filter(|e| e.active)
    }

    pub fn get_mut(&mut self, handle: StreamHandle) -> Option<&mut StreamEmitter> {
        self.emitters.get_mut(handle.0).filter(|e| e.active)
    }

    pub fn active_count(&self) -> usize {
        self.emitters.iter().filter(|e| e.active).count()
    }

    /// Move every active emitter and invoke `spawn` once per whole particle
    /// its accumulator has built up, keeping the fractional remainder.
    /// `spawn` returns `false` once the pool is full, which ends that
    /// emitter's spawning for the frame. At most `MAX_PARTICLES` spawns are
    /// attempted per emitter per frame.
    pub fn advance(&mut self, mut spawn: impl FnMut(ParticleKind, Vec2) -> bool) {
        for emitter in self.emitters.iter_mut().filter(|e| e.active) {
            emitter.position += emitter.velocity;
            emitter.accumulator += emitter.rate;
            if emitter.accumulator < 1.0 {
                continue;
            }

            let whole = emitter.accumulator.floor();
            emitter.accumulator -= whole;
            if !emitter.accumulator.is_finite() {
                emitter.accumulator = 0.0;
            }

            let attempts = if whole >= MAX_PARTICLES as f32 {
                MAX_PARTICLES
            } else {
                whole as usize
            };
            for _ in 0..attempts {
                if !spawn(emitter.kind, emitter.position) {
                    break;
                }
            }
        }
    }
}

impl Default for StreamPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(pool: &mut StreamPool) -> Option<StreamHandle> {
        pool.start(ParticleKind::Smoke, Vec2::ZERO, Vec2::ZERO, 1.0)
    }

    #[test]
    fn slots_fill_then_fail_fast() {
        let mut pool = StreamPool::new();
        for i in 0..MAX_STREAMS {
            assert_eq!(start(&mut pool).map(StreamHandle::index), Some(i));
        }
        assert_eq!(start(&mut pool), None);
        assert_eq!(pool.active_count(), MAX_STREAMS);
    }

    #[test]
    fn cursor_skips_past_reused_slot() {
        let mut pool = StreamPool::new();
        let a = start(&mut pool).unwrap();
        let b = start(&mut pool).unwrap();
        pool.stop(a);
        // cursor is at 2, so slot 0 is not reused until the scan wraps
        let c = start(&mut pool).unwrap();
        assert_eq!(c.index(), 2);
        assert_ne!(c, b);
    }

    #[test]
    fn stop_is_idempotent_and_ignores_bad_handles() {
        let mut pool = StreamPool::new();
        let h = start(&mut pool).unwrap();
        pool.stop(h);
        pool.stop(h);
        pool.stop(StreamHandle(MAX_STREAMS + 10));
        assert_eq!(pool.active_count(), 0);
        assert!(pool.get(h).is_none());
    }

    #[test]
    fn raw_handles_round_trip_with_sentinel() {
        assert_eq!(StreamHandle::from_raw(-1), None);
        let h = StreamHandle::from_raw(5).unwrap();
        assert_eq!(h.index(), 5);
        assert_eq!(StreamHandle::to_raw(Some(h)), 5);
        assert_eq!(StreamHandle::to_raw(None), -1);
    }

    #[test]
    fn advance_moves_emitter_before_spawning() {
        let mut pool = StreamPool::new();
        pool.start(ParticleKind::Spark, Vec2::new(1.0, 1.0), Vec2::new(2.0, 0.0), 2.0);
        let mut spawned = Vec::new();
        pool.advance(|kind, pos| {
            spawned.push((kind, pos));
            true
        });
        assert_eq!(
            spawned,
            vec![
                (ParticleKind::Spark, Vec2::new(3.0, 1.0)),
                (ParticleKind::Spark, Vec2::new(3.0, 1.0)),
            ]
        );
    }

    #[test]
    fn fractional_rate_carries_over() {
        let mut pool = StreamPool::new();
        pool.start(ParticleKind::Dust, Vec2::ZERO, Vec2::ZERO, 0.25);
        let mut count = 0;
        for _ in 0..100 {
            pool.advance(|_, _| {
                count += 1;
                true
            });
        }
        assert_eq!(count, 25);
    }

    #[test]
    fn huge_rates_are_capped_per_frame() {
        for rate in [1.0e8, f32::INFINITY] {
            let mut pool = StreamPool::new();
            pool.start(ParticleKind::Spark, Vec2::ZERO, Vec2::ZERO, rate);
            let mut attempts = 0;
            for _ in 0..3 {
                pool.advance(|_, _| {
                    attempts += 1;
                    true
                });
            }
            assert!(attempts <= 3 * MAX_PARTICLES, "rate {rate}: {attempts} attempts");
            assert!(attempts >= MAX_PARTICLES, "rate {rate}: {attempts} attempts");
        }
    }

    #[test]
    fn full_pool_ends_spawning_for_the_frame() {
        let mut pool = StreamPool::new();
        let h = pool.start(ParticleKind::Dust, Vec2::ZERO, Vec2::ZERO, 10.5).unwrap();
        let mut attempts = 0;
        pool.advance(|_, _| {
            attempts += 1;
            false
        });
        assert_eq!(attempts, 1);
        // the fractional part still carries over
        let carry = pool.get(h).unwrap().accumulator;
        assert!((carry - 0.5).abs() < 1e-6);
    }
}
