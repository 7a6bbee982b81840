use super::building_gen::BuildingData;
use super::districts::DistrictType;
use super::seeded_rng::Mulberry32;
use super::{BLOCK_SIZE, CHUNK_SIZE, HALF_ROAD};
use crate::helpers::aabb::Aabb;
use crate::helpers::positions::ChunkCoord;
use glam::{Vec2, Vec3};

/// A tree inside a chunk; `position` is the trunk center, chunk-local.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeData {
    pub position: Vec2,
    pub height: f32,
    pub radius: f32,
}

/// Only the trunk collides; driving through foliage is fine.
const TRUNK_HEIGHT_FRAC: f32 = 0.35;
const TRUNK_RADIUS: f32 = 0.5;

impl TreeData {
    pub fn collider(&self, world_x: f32, world_z: f32) -> Aabb {
        let trunk_height = self.height * TRUNK_HEIGHT_FRAC;
        Aabb::from_center_size(
            Vec3::new(
                world_x + self.position.x,
                trunk_height / 2.0,
                world_z + self.position.y,
            ),
            Vec3::new(TRUNK_RADIUS * 2.0, trunk_height, TRUNK_RADIUS * 2.0),
        )
    }
}

/// Road center lines inside a chunk, including the far boundary owned by
/// the neighbor: trees must keep clear of all three on both axes.
const ROAD_POSITIONS: [f32; 3] = [0.0, BLOCK_SIZE, CHUNK_SIZE];

fn is_in_road(x: f32, z: f32) -> bool {
    for road in ROAD_POSITIONS {
        if (x - road).abs() < HALF_ROAD || (z - road).abs() < HALF_ROAD {
            return true;
        }
    }
    false
}

fn overlaps_building(x: f32, z: f32, radius: f32, buildings: &[BuildingData]) -> bool {
    buildings.iter().any(|b| {
        x + radius > b.position.x
            && x - radius < b.position.x + b.width
            && z + radius > b.position.y
            && z - radius < b.position.y + b.depth
    })
}

/// Scatter trees over the whole chunk, rejection sampled against roads and
/// building footprints. A tree that finds no valid spot in twenty tries is
/// dropped silently; parks just end up a little thinner.
pub fn generate_trees(
    _coord: ChunkCoord,
    district: DistrictType,
    rng: &mut Mulberry32,
    buildings: &[BuildingData],
) -> Vec<TreeData> {
    let (min_trees, max_trees) = match district {
        DistrictType::Park => (20, 40),
        DistrictType::Suburbs => (5, 10),
        DistrictType::Downtown | DistrictType::Industrial => (0, 2),
    };

    let count = min_trees + (rng.next() * (max_trees - min_trees + 1) as f32).floor() as u32;

    let mut trees = Vec::with_capacity(count as usize);
    for _ in 0..count {
        // size first: the radius feeds the placement check
        let height = 6.0 + rng.next() * 8.0;
        let radius = 2.0 + rng.next() * 2.0;

        for _attempt in 0..20 {
            let x = rng.next() * CHUNK_SIZE;
            let z = rng.next() * CHUNK_SIZE;

            if !is_in_road(x, z) && !overlaps_building(x, z, radius, buildings) {
                trees.push(TreeData {
                    position: Vec2::new(x, z),
                    height,
                    radius,
                });
                break;
            }
        }
    }

    trees
}
