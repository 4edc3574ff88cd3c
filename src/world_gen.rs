//! Seeded entity scatter for a fresh world.

use emberwild_core::{scoped_rng, SimTick};
use emberwild_world::{EntityKind, World, WorldEntity};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// RNG domain for entity placement.
const SCATTER_DOMAIN: u64 = 0x5343_4154_5445_5200;

/// Rejection attempts before a sample is pushed out of the spawn clearing.
const MAX_ATTEMPTS: usize = 32;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Entities are placed in `[-half_extent, half_extent]` on both axes.
    pub half_extent: f32,
    /// Nothing is placed closer than this to the spawn point.
    pub spawn_exclusion: f32,
    pub trees: u32,
    pub fruit_trees: u32,
    pub bushes: u32,
    pub rocks: u32,
    pub water_sources: u32,
    pub fauna: u32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            half_extent: 60.0,
            spawn_exclusion: 6.0,
            trees: 40,
            fruit_trees: 12,
            bushes: 25,
            rocks: 20,
            water_sources: 4,
            fauna: 10,
        }
    }
}

impl WorldGenConfig {
    fn counts(&self) -> [(EntityKind, u32); 6] {
        [
            (EntityKind::Tree, self.trees),
            (EntityKind::FruitTree, self.fruit_trees),
            (EntityKind::Bush, self.bushes),
            (EntityKind::Rock, self.rocks),
            (EntityKind::WaterSource, self.water_sources),
            (EntityKind::Fauna, self.fauna),
        ]
    }

    /// Total entities this config produces.
    pub fn total(&self) -> u32 {
        self.counts().iter().map(|(_, count)| count).sum()
    }
}

/// Scatter entities for `seed`. The same seed and config always produce the same world.
pub fn generate(seed: u64, cfg: &WorldGenConfig) -> World {
    let mut rng = scoped_rng(seed, SCATTER_DOMAIN, SimTick::ZERO);
    let exclusion = cfg.spawn_exclusion.max(0.0);
    let extent = cfg.half_extent.max(exclusion + 1.0);

    let mut entities = Vec::with_capacity(cfg.total() as usize);
    let mut next_id = 1;
    for (kind, count) in cfg.counts() {
        for _ in 0..count {
            let (x, z) = scatter(&mut rng, extent, exclusion);
            entities.push(WorldEntity::new(next_id, kind, x, z));
            next_id += 1;
        }
    }

    debug!(seed, entities = entities.len(), "World generated");
    World::new(entities)
}

fn scatter(rng: &mut StdRng, extent: f32, exclusion: f32) -> (f32, f32) {
    let mut sample = (0.0, 0.0);
    for _ in 0..MAX_ATTEMPTS {
        sample = (rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent));
        if sample.0.hypot(sample.1) >= exclusion {
            return sample;
        }
    }

    let length = sample.0.hypot(sample.1);
    if length <= f32::EPSILON {
        return (exclusion, 0.0);
    }
    let scale = exclusion / length;
    (sample.0 * scale, sample.1 * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_world() {
        let cfg = WorldGenConfig::default();
        assert_eq!(generate(42, &cfg), generate(42, &cfg));
        assert_ne!(generate(42, &cfg), generate(43, &cfg));
    }

    #[test]
    fn counts_and_ids_follow_config() {
        let cfg = WorldGenConfig {
            trees: 3,
            fruit_trees: 0,
            bushes: 2,
            rocks: 1,
            water_sources: 1,
            fauna: 0,
            ..WorldGenConfig::default()
        };
        let world = generate(7, &cfg);
        assert_eq!(world.entities().len(), 7);
        let ids: Vec<u64> = world.entities().iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
        assert_eq!(
            world
                .entities()
                .iter()
                .filter(|e| e.kind == EntityKind::Tree)
                .count(),
            3
        );
    }

    #[test]
    fn spawn_clearing_and_bounds_are_respected() {
        let cfg = WorldGenConfig {
            half_extent: 10.0,
            spawn_exclusion: 8.0,
            trees: 200,
            ..WorldGenConfig::default()
        };
        let world = generate(99, &cfg);
        for entity in world.entities() {
            let p = entity.position;
            assert!(p.x.hypot(p.z) >= 8.0 - 1e-3, "{:?} inside clearing", p);
            assert!(p.x.abs() <= 10.0 && p.z.abs() <= 10.0, "{:?} out of bounds", p);
            assert!(entity.visible);
        }
    }
}
