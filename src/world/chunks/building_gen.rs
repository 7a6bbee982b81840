use super::districts::DistrictConfig;
use super::seeded_rng::Mulberry32;
use super::{BLOCK_SIZE, BUILDING_SETBACK, HALF_ROAD};
use crate::helpers::aabb::Aabb;
use crate::helpers::color::hex_rgb;
use crate::helpers::positions::ChunkCoord;
use glam::{Vec2, Vec3};

/// A building footprint inside a chunk. `position` is the minimum corner
/// of the footprint, chunk-local; the box stands on the ground plane.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingData {
    pub position: Vec2,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub color: [f32; 3],
}

impl BuildingData {
    #[inline]
    pub fn footprint_overlaps(&self, other: &BuildingData) -> bool {
        self.position.x < other.position.x + other.width
            && self.position.x + self.width > other.position.x
            && self.position.y < other.position.y + other.depth
            && self.position.y + self.depth > other.position.y
    }

    /// World-space collision box: the full footprint from the ground up.
    pub fn collider(&self, world_x: f32, world_z: f32) -> Aabb {
        let min = Vec3::new(world_x + self.position.x, 0.0, world_z + self.position.y);
        let max = min + Vec3::new(self.width, self.height, self.depth);
        Aabb::new(min, max)
    }
}

/// Blocks are addressed by the road corner at their minimum edge.
const BLOCK_CORNERS: [(f32, f32); 4] = [
    (0.0, 0.0),
    (BLOCK_SIZE, 0.0),
    (0.0, BLOCK_SIZE),
    (BLOCK_SIZE, BLOCK_SIZE),
];

/// Scatter buildings over the chunk's 2x2 block grid. Placement is
/// rejection sampled per block: a building that cannot find a free spot in
/// ten tries is dropped, never retried. Overlap is only checked against
/// buildings of the same block; the road corridor between blocks keeps
/// neighbors apart.
pub fn generate_buildings(
    _coord: ChunkCoord,
    rng: &mut Mulberry32,
    config: &DistrictConfig,
) -> Vec<BuildingData> {
    if !config.has_buildings {
        return Vec::new();
    }

    let mut buildings = Vec::new();

    for (block_x, block_z) in BLOCK_CORNERS {
        // Roads are centered on the block boundary lines, so half a road
        // plus the setback is unbuildable on every side.
        let margin = HALF_ROAD + BUILDING_SETBACK;
        let build_min_x = block_x + margin;
        let build_max_x = block_x + BLOCK_SIZE - margin;
        let build_min_z = block_z + margin;
        let build_max_z = block_z + BLOCK_SIZE - margin;

        let buildable_width = build_max_x - build_min_x;
        let buildable_depth = build_max_z - build_min_z;
        if buildable_width < 10.0 || buildable_depth < 10.0 {
            continue;
        }

        let base_count = 4 + (rng.next() * 5.0).floor() as u32;
        let count = (base_count as f32 * config.density).floor() as u32;

        let block_start = buildings.len();

        for _ in 0..count {
            let width = 8.0 + (rng.next() * 9.0).floor();
            let depth = 8.0 + (rng.next() * 9.0).floor();
            let height_range = config.max_height - config.min_height;
            let height = config.min_height + (rng.next() * height_range).floor();

            let base = hex_rgb(config.palette[(rng.next() * config.palette.len() as f32) as usize]);
            let color = [
                (base[0] * (0.9 + rng.next() * 0.2)).min(1.0),
                (base[1] * (0.9 + rng.next() * 0.2)).min(1.0),
                (base[2] * (0.9 + rng.next() * 0.2)).min(1.0),
            ];

            for _attempt in 0..10 {
                let x = build_min_x + rng.next() * (buildable_width - width);
                let z = build_min_z + rng.next() * (buildable_depth - depth);

                let candidate = BuildingData {
                    position: Vec2::new(x, z),
                    width,
                    depth,
                    height,
                    color,
                };

                let overlaps = buildings[block_start..]
                    .iter()
                    .any(|existing| candidate.footprint_overlaps(existing));
                if !overlaps {
                    buildings.push(candidate);
                    break;
                }
            }
        }
    }

    buildings
}
