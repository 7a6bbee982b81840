use super::seeded_rng::Mulberry32;
use super::{BLOCK_SIZE, CHUNK_SIZE};
use crate::helpers::positions::ChunkCoord;
use glam::Vec2;

/// One straight road piece, chunk-local coordinates on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub is_main_road: bool,
}

impl RoadSegment {
    #[inline]
    pub fn is_vertical(&self) -> bool {
        (self.end.y - self.start.y).abs() > (self.end.x - self.start.x).abs()
    }
}

/// Roads form a fixed grid: each chunk emits its own x = {0, 32} and
/// z = {0, 32} lines spanning the full chunk. The x = 64 / z = 64 boundary
/// lines belong to the neighbor with the higher coordinate (its offset 0),
/// so adjacent chunks abut without duplicate or missing segments.
pub fn generate_roads(_coord: ChunkCoord, _rng: &mut Mulberry32) -> Vec<RoadSegment> {
    let mut segments = Vec::with_capacity(4);

    // Horizontal roads, running along X
    for z in [0.0, BLOCK_SIZE] {
        segments.push(RoadSegment {
            start: Vec2::new(0.0, z),
            end: Vec2::new(CHUNK_SIZE, z),
            is_main_road: z == 0.0,
        });
    }

    // Vertical roads, running along Z
    for x in [0.0, BLOCK_SIZE] {
        segments.push(RoadSegment {
            start: Vec2::new(x, 0.0),
            end: Vec2::new(x, CHUNK_SIZE),
            is_main_road: x == 0.0,
        });
    }

    segments
}
