use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Discrete grid coordinate of a chunk. One unit = one chunk.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    #[inline]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, z: 0 }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    #[inline]
    pub fn dist2(&self, other: &ChunkCoord) -> u32 {
        let dx = self.x as i64 - other.x as i64;
        let dz = self.z as i64 - other.z as i64;
        (dx * dx + dz * dz) as u32
    }

    /// Chunk containing a world position (floor division per axis).
    #[inline]
    pub fn from_world(pos: Vec3, chunk_size: f32) -> Self {
        Self {
            x: (pos.x / chunk_size).floor() as i32,
            z: (pos.z / chunk_size).floor() as i32,
        }
    }

    /// World position of this chunk's minimum corner.
    #[inline]
    pub fn world_origin(self, chunk_size: f32) -> (f32, f32) {
        (self.x as f32 * chunk_size, self.z as f32 * chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_world_floors_negative_positions() {
        let size = 64.0;
        assert_eq!(
            ChunkCoord::from_world(Vec3::new(0.0, 0.0, 0.0), size),
            ChunkCoord::new(0, 0)
        );
        assert_eq!(
            ChunkCoord::from_world(Vec3::new(63.9, 0.0, -0.1), size),
            ChunkCoord::new(0, -1)
        );
        assert_eq!(
            ChunkCoord::from_world(Vec3::new(-64.0, 0.0, 128.0), size),
            ChunkCoord::new(-1, 2)
        );
    }

    #[test]
    fn test_world_origin_round_trips() {
        let coord = ChunkCoord::new(-3, 7);
        let (wx, wz) = coord.world_origin(64.0);
        assert_eq!(
            ChunkCoord::from_world(Vec3::new(wx + 0.5, 0.0, wz + 0.5), 64.0),
            coord
        );
    }

    #[test]
    fn test_dist2() {
        let a = ChunkCoord::new(0, 0);
        let b = ChunkCoord::new(3, -4);
        assert_eq!(a.dist2(&b), 25);
    }
}
