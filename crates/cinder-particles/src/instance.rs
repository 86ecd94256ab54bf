//! GPU instance packing for hosts that draw particles with instanced quads

use crate::preset::{BlendMode, PresetTable};
use crate::render::{Camera2D, RenderBatcher, MIN_DRAW_SIZE};
use crate::store::ParticleStore;
use bytemuck::{Pod, Zeroable};
use cinder_core::{Rgb, Vec2};

/// Per-particle instance data. 32 bytes, two vec4 rows.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// xy = screen-space center, z = side length, w unused
    pub pos_size: [f32; 4],
    /// rgba in 0-1
    pub color: [f32; 4],
}

/// A run of instances drawn with one blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceBatch {
    pub blend: BlendMode,
    pub start: u32,
    pub count: u32,
}

/// Fill `instances` and `batches` from the batcher's current grouping.
/// Both vectors are cleared first and keep their capacity between frames.
/// Adjacent kinds that share a blend mode are merged into one batch.
pub(crate) fn pack(
    batcher: &RenderBatcher,
    store: &ParticleStore,
    presets: &PresetTable,
    camera: &Camera2D,
    instances: &mut Vec<ParticleInstance>,
    batches: &mut Vec<InstanceBatch>,
) {
    instances.clear();
    batches.clear();

    for &slot in batcher.grouped() {
        let side = store.size[slot] * camera.zoom;
        if side <= MIN_DRAW_SIZE {
            continue;
        }

        let blend = presets.get(store.kind[slot]).blend;
        match batches.last_mut() {
            Some(batch) if batch.blend == blend => batch.count += 1,
            _ => {
                let start = instances.len() as u32;
                batches.push(InstanceBatch {
                    blend,
                    start,
                    count: 1,
                });
            }
        }

        let center = camera.world_to_screen(Vec2::new(store.x[slot], store.y[slot]));
        let [r, g, b] = Rgb::new(store.r[slot], store.g[slot], store.b[slot]).to_unit();
        instances.push(ParticleInstance {
            pos_size: [center.x, center.y, side, 0.0],
            color: [r, g, b, store.alpha[slot].clamp(0.0, 1.0)],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::ParticleKind;
    use crate::rand::ParticleRng;

    #[test]
    fn instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
        let instances = [ParticleInstance::zeroed(); 3];
        assert_eq!(bytemuck::cast_slice::<_, u8>(&instances[..]).len(), 96);
    }

    #[test]
    fn pack_merges_kinds_sharing_a_blend_mode() {
        use ParticleKind::*;
        let presets = PresetTable::default();
        let mut rng = ParticleRng::new(8);
        let mut store = ParticleStore::new();
        // fire(add) magic(add) smoke(normal) blood(normal) holy(add)
        for kind in [Holy, Blood, Magic, Smoke, Fire, Fire] {
            let slot = store.alloc().unwrap();
            store.init_particle(slot, kind, 1.0, 2.0, &presets, &mut rng);
        }
        let mut batcher = RenderBatcher::new();
        batcher.group(&store);

        let mut instances = Vec::new();
        let mut batches = Vec::new();
        pack(&batcher, &store, &presets, &Camera2D::default(), &mut instances, &mut batches);

        assert_eq!(instances.len(), 6);
        assert_eq!(
            batches,
            vec![
                InstanceBatch { blend: BlendMode::Additive, start: 0, count: 3 },
                InstanceBatch { blend: BlendMode::Normal, start: 3, count: 2 },
                InstanceBatch { blend: BlendMode::Additive, start: 5, count: 1 },
            ]
        );
        for inst in &instances {
            assert_eq!(&inst.pos_size[..2], &[1.0, 2.0]);
            assert!(inst.color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn pack_reuses_buffers() {
        let presets = PresetTable::default();
        let store = ParticleStore::new();
        let mut batcher = RenderBatcher::new();
        batcher.group(&store);

        let mut instances = vec![ParticleInstance::zeroed(); 4];
        let mut batches = vec![InstanceBatch {
            blend: BlendMode::Normal,
            start: 0,
            count: 4,
        }];
        pack(&batcher, &store, &presets, &Camera2D::default(), &mut instances, &mut batches);
        assert!(instances.is_empty());
        assert!(batches.is_empty());
        assert!(instances.capacity() >= 4);
    }
}
