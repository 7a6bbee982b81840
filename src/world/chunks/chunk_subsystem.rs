use std::collections::HashMap;

use glam::Vec3;

use super::building_gen::{generate_buildings, BuildingData};
use super::districts::{DistrictMap, DistrictType};
use super::road_gen::{generate_roads, RoadSegment};
use super::seeded_rng::{hash_coord, Mulberry32};
use super::tree_gen::{generate_trees, TreeData};
use super::CHUNK_SIZE;
use crate::data::Settings;
use crate::events::{Event, Events};
use crate::helpers::aabb::Aabb;
use crate::helpers::color::hex_rgb;
use crate::helpers::positions::ChunkCoord;
use crate::world::SimTime;

const GROUND_COLOR: u32 = 0x228B22;

/// One resident tile of world content. Created whole by the generation
/// pipeline and immutable afterwards apart from the visit timestamp.
pub struct Chunk {
    pub coord: ChunkCoord,
    pub district: DistrictType,
    pub ground_color: [f32; 3],
    pub roads: Vec<RoadSegment>,
    pub buildings: Vec<BuildingData>,
    pub trees: Vec<TreeData>,
    pub colliders: Vec<Aabb>,
    pub last_visited: SimTime,
}

/// Streams chunks around the player: everything within the view radius is
/// generated synchronously, everything beyond the cache radius is evicted.
/// The gap between the two radii is hysteresis against load/unload
/// thrashing at the boundary.
pub struct ChunkSubsystem {
    seed: u32,
    view_distance: i32,
    cache_distance: i32,
    districts: DistrictMap,
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkSubsystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            seed: settings.world_seed,
            view_distance: settings.view_distance,
            cache_distance: settings.cache_distance.max(settings.view_distance),
            districts: DistrictMap::new(settings.world_seed),
            chunks: HashMap::new(),
        }
    }

    pub fn update(&mut self, player_pos: Vec3, now: SimTime, events: &mut Events) {
        let center = ChunkCoord::from_world(player_pos, CHUNK_SIZE);

        for dz in -self.view_distance..=self.view_distance {
            for dx in -self.view_distance..=self.view_distance {
                let coord = center.offset(dx, dz);
                if let Some(chunk) = self.chunks.get_mut(&coord) {
                    chunk.last_visited = now;
                    continue;
                }

                let chunk = self.generate_chunk(coord, now);
                log::debug!(
                    "loaded chunk ({}, {}): {:?}, {} colliders",
                    coord.x,
                    coord.z,
                    chunk.district,
                    chunk.colliders.len()
                );
                self.chunks.insert(coord, chunk);
                events.send(Event::ChunkLoaded(coord));
            }
        }

        let cache = self.cache_distance;
        let stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|c| (c.x - center.x).abs() > cache || (c.z - center.z).abs() > cache)
            .copied()
            .collect();
        for coord in stale {
            self.chunks.remove(&coord);
            events.send(Event::ChunkUnloaded(coord));
        }
    }

    /// The whole pipeline is pure in `(seed, coord)`: identical inputs
    /// produce identical chunks, in any load order.
    fn generate_chunk(&self, coord: ChunkCoord, now: SimTime) -> Chunk {
        let chunk_seed = hash_coord(coord.x, coord.z, self.seed);
        let mut rng = Mulberry32::new(chunk_seed);

        // First draw tints the ground tile so neighboring chunks don't
        // read as one flat carpet.
        let tint = 0.9 + rng.next() * 0.2;
        let base = hex_rgb(GROUND_COLOR);
        let ground_color = [base[0] * tint, base[1] * tint, base[2] * tint];

        let district = self.districts.district_at(coord);
        let config = district.config();

        let roads = generate_roads(coord, &mut rng);
        let buildings = generate_buildings(coord, &mut rng, &config);
        let trees = generate_trees(coord, district, &mut rng, &buildings);

        let (world_x, world_z) = coord.world_origin(CHUNK_SIZE);
        let mut colliders = Vec::with_capacity(buildings.len() + trees.len());
        colliders.extend(buildings.iter().map(|b| b.collider(world_x, world_z)));
        colliders.extend(trees.iter().map(|t| t.collider(world_x, world_z)));

        Chunk {
            coord,
            district,
            ground_color,
            roads,
            buildings,
            trees,
            colliders,
            last_visited: now,
        }
    }

    /// Colliders of the single chunk containing `pos`. Empty when that
    /// chunk is not resident; nothing is generated on demand here.
    pub fn colliders_at(&self, pos: Vec3) -> &[Aabb] {
        let coord = ChunkCoord::from_world(pos, CHUNK_SIZE);
        self.chunks
            .get(&coord)
            .map(|chunk| chunk.colliders.as_slice())
            .unwrap_or(&[])
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn resident_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn district_at(&self, coord: ChunkCoord) -> DistrictType {
        self.districts.district_at(coord)
    }

    /// Drops every resident chunk, notifying the presentation layer so it
    /// can dispose whatever it built.
    pub fn clear(&mut self, events: &mut Events) {
        for coord in self.chunks.keys() {
            events.send(Event::ChunkUnloaded(*coord));
        }
        self.chunks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsystem() -> ChunkSubsystem {
        ChunkSubsystem::new(&Settings::default())
    }

    fn in_square(coord: ChunkCoord, center: ChunkCoord, radius: i32) -> bool {
        (coord.x - center.x).abs() <= radius && (coord.z - center.z).abs() <= radius
    }

    #[test]
    fn test_first_update_loads_view_square() {
        let mut chunks = subsystem();
        let mut events = Events::new();
        chunks.update(Vec3::new(10.0, 0.0, 10.0), 0.0, &mut events);

        let side = (2 * 3 + 1) as usize;
        assert_eq!(chunks.resident_count(), side * side);
        assert_eq!(events.drain().count(), side * side);
    }

    #[test]
    fn test_residency_tracks_player_between_view_and_cache() {
        let mut chunks = subsystem();
        let mut events = Events::new();

        chunks.update(Vec3::ZERO, 0.0, &mut events);
        // drive two chunks east: new column loads, nothing beyond cache yet
        chunks.update(Vec3::new(2.0 * CHUNK_SIZE, 0.0, 0.0), 1.0, &mut events);

        let center = ChunkCoord::new(2, 0);
        for chunk in chunks.chunks() {
            assert!(in_square(chunk.coord, center, 5));
        }
        // everything inside the view square is resident
        for dz in -3..=3 {
            for dx in -3..=3 {
                assert!(chunks.contains(center.offset(dx, dz)));
            }
        }
        // the trailing edge is kept by the cache radius
        assert!(chunks.contains(ChunkCoord::new(-3, 0)));
    }

    #[test]
    fn test_teleport_evicts_everything_out_of_cache() {
        let mut chunks = subsystem();
        let mut events = Events::new();

        chunks.update(Vec3::ZERO, 0.0, &mut events);
        events.drain().count();

        chunks.update(Vec3::new(100.0 * CHUNK_SIZE, 0.0, 0.0), 1.0, &mut events);

        let center = ChunkCoord::new(100, 0);
        let side = (2 * 3 + 1) as usize;
        assert_eq!(chunks.resident_count(), side * side);
        for chunk in chunks.chunks() {
            assert!(in_square(chunk.coord, center, 3));
        }

        let unloads = events
            .drain()
            .filter(|e| matches!(e, Event::ChunkUnloaded(_)))
            .count();
        assert_eq!(unloads, side * side);
    }

    #[test]
    fn test_generation_is_reproducible_across_instances() {
        let mut a = subsystem();
        let mut b = subsystem();
        let mut events = Events::new();

        a.update(Vec3::ZERO, 0.0, &mut events);
        b.update(Vec3::ZERO, 5.0, &mut events);

        for chunk in a.chunks() {
            let other = b.chunk(chunk.coord).expect("missing chunk");
            assert_eq!(chunk.district, other.district);
            assert_eq!(chunk.roads, other.roads);
            assert_eq!(chunk.buildings, other.buildings);
            assert_eq!(chunk.trees, other.trees);
            assert_eq!(chunk.colliders.len(), other.colliders.len());
        }
    }

    #[test]
    fn test_eviction_and_regeneration_are_identical() {
        let mut chunks = subsystem();
        let mut events = Events::new();

        chunks.update(Vec3::ZERO, 0.0, &mut events);
        let before = chunks.chunk(ChunkCoord::zero()).unwrap().buildings.clone();

        // leave far enough that the origin is evicted, then come back
        chunks.update(Vec3::new(50.0 * CHUNK_SIZE, 0.0, 0.0), 1.0, &mut events);
        assert!(!chunks.contains(ChunkCoord::zero()));
        chunks.update(Vec3::ZERO, 2.0, &mut events);

        let after = &chunks.chunk(ChunkCoord::zero()).unwrap().buildings;
        assert_eq!(&before, after);
    }

    #[test]
    fn test_colliders_at_non_resident_is_empty() {
        let chunks = subsystem();
        assert!(chunks.colliders_at(Vec3::new(1000.0, 0.0, 1000.0)).is_empty());
    }

    #[test]
    fn test_colliders_at_returns_containing_chunk_only() {
        let mut chunks = subsystem();
        let mut events = Events::new();
        chunks.update(Vec3::ZERO, 0.0, &mut events);

        let colliders = chunks.colliders_at(Vec3::new(32.0, 0.0, 32.0));
        let chunk = chunks.chunk(ChunkCoord::zero()).unwrap();
        assert_eq!(colliders.len(), chunk.colliders.len());

        // every building collider lies inside the chunk's world bounds
        for aabb in colliders.iter() {
            assert!(aabb.min.x >= -1.0 && aabb.max.x <= CHUNK_SIZE + 1.0);
            assert!(aabb.min.z >= -1.0 && aabb.max.z <= CHUNK_SIZE + 1.0);
        }
    }

    #[test]
    fn test_clear_unloads_all_with_events() {
        let mut chunks = subsystem();
        let mut events = Events::new();
        chunks.update(Vec3::ZERO, 0.0, &mut events);
        events.drain().count();

        let resident = chunks.resident_count();
        chunks.clear(&mut events);
        assert_eq!(chunks.resident_count(), 0);
        assert_eq!(events.len(), resident);
    }

    #[test]
    fn test_last_visited_refreshes_on_update() {
        let mut chunks = subsystem();
        let mut events = Events::new();
        chunks.update(Vec3::ZERO, 0.0, &mut events);
        chunks.update(Vec3::ZERO, 9.5, &mut events);
        let chunk = chunks.chunk(ChunkCoord::zero()).unwrap();
        assert!((chunk.last_visited - 9.5).abs() < 1e-9);
    }
}
