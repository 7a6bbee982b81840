use super::simplex::SimplexNoise;
use super::CHUNK_SIZE;
use crate::helpers::positions::ChunkCoord;

/// Zoning classification of a chunk. Derived from the noise field, never
/// stored: the same `(coord, seed)` always classifies the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistrictType {
    Park,
    Suburbs,
    Industrial,
    Downtown,
}

#[derive(Debug, Clone, Copy)]
pub struct DistrictConfig {
    pub min_height: f32,
    pub max_height: f32,
    /// Multiplier on the base building count per block. Zero means none.
    pub density: f32,
    pub palette: &'static [u32],
    pub has_buildings: bool,
}

const DOWNTOWN_PALETTE: [u32; 5] = [
    0x4A90E2, // blue glass
    0x50C878, // emerald glass
    0x5DADE2, // light blue glass
    0x48C9B0, // turquoise glass
    0x3498DB, // dodger blue
];

const SUBURBS_PALETTE: [u32; 5] = [
    0xF5DEB3, // wheat
    0xFFE4B5, // moccasin
    0xFFFACD, // lemon chiffon
    0xFAF0E6, // linen
    0xFFEBCD, // blanched almond
];

const INDUSTRIAL_PALETTE: [u32; 5] = [
    0x808080, 0x696969, 0xA9A9A9, 0xC0C0C0, 0x778899,
];

impl DistrictType {
    pub fn config(self) -> DistrictConfig {
        match self {
            DistrictType::Downtown => DistrictConfig {
                min_height: 40.0,
                max_height: 80.0,
                density: 1.5,
                palette: &DOWNTOWN_PALETTE,
                has_buildings: true,
            },
            DistrictType::Suburbs => DistrictConfig {
                min_height: 8.0,
                max_height: 15.0,
                density: 0.5,
                palette: &SUBURBS_PALETTE,
                has_buildings: true,
            },
            DistrictType::Industrial => DistrictConfig {
                min_height: 15.0,
                max_height: 30.0,
                density: 1.0,
                palette: &INDUSTRIAL_PALETTE,
                has_buildings: true,
            },
            DistrictType::Park => DistrictConfig {
                min_height: 0.0,
                max_height: 0.0,
                density: 0.0,
                palette: &[],
                has_buildings: false,
            },
        }
    }

    /// Strict `<` at every threshold: a combined value of exactly -0.3 is
    /// suburbs, 0.1 is industrial, 0.5 is downtown.
    pub(crate) fn from_noise(combined: f32) -> DistrictType {
        if combined < -0.3 {
            DistrictType::Park
        } else if combined < 0.1 {
            DistrictType::Suburbs
        } else if combined < 0.5 {
            DistrictType::Industrial
        } else {
            DistrictType::Downtown
        }
    }
}

/// Owns the two noise fields districts are sampled from. Keeping the
/// instances here means the permutation shuffle runs once per world, not
/// once per query.
pub struct DistrictMap {
    low: SimplexNoise,
    high: SimplexNoise,
}

const SCALE_LOW: f32 = 0.01;
const SCALE_HIGH: f32 = 0.03;

impl DistrictMap {
    pub fn new(seed: u32) -> Self {
        Self {
            low: SimplexNoise::new(seed),
            high: SimplexNoise::new(seed.wrapping_add(1000)),
        }
    }

    pub fn district_at(&self, coord: ChunkCoord) -> DistrictType {
        let center_x = coord.x as f32 * CHUNK_SIZE + CHUNK_SIZE / 2.0;
        let center_z = coord.z as f32 * CHUNK_SIZE + CHUNK_SIZE / 2.0;

        // Low frequency decides the large zones, high frequency breaks up
        // their edges.
        let low = self.low.noise2(center_x * SCALE_LOW, center_z * SCALE_LOW);
        let high = self
            .high
            .noise2(center_x * SCALE_HIGH, center_z * SCALE_HIGH);

        DistrictType::from_noise(low * 0.7 + high * 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_use_strict_less_than() {
        assert_eq!(DistrictType::from_noise(-0.31), DistrictType::Park);
        assert_eq!(DistrictType::from_noise(-0.3), DistrictType::Suburbs);
        assert_eq!(DistrictType::from_noise(0.0), DistrictType::Suburbs);
        assert_eq!(DistrictType::from_noise(0.1), DistrictType::Industrial);
        assert_eq!(DistrictType::from_noise(0.49), DistrictType::Industrial);
        assert_eq!(DistrictType::from_noise(0.5), DistrictType::Downtown);
        assert_eq!(DistrictType::from_noise(1.0), DistrictType::Downtown);
    }

    #[test]
    fn test_park_config_has_no_buildings() {
        let cfg = DistrictType::Park.config();
        assert!(!cfg.has_buildings);
        assert_eq!(cfg.density, 0.0);
        assert!(cfg.palette.is_empty());
    }

    #[test]
    fn test_downtown_is_tallest() {
        let downtown = DistrictType::Downtown.config();
        let suburbs = DistrictType::Suburbs.config();
        assert!(downtown.min_height > suburbs.max_height);
        assert_eq!(downtown.palette.len(), 5);
    }

    #[test]
    fn test_district_at_is_idempotent() {
        let map = DistrictMap::new(12345);
        for x in -5..5 {
            for z in -5..5 {
                let coord = ChunkCoord::new(x, z);
                assert_eq!(map.district_at(coord), map.district_at(coord));
            }
        }
    }

    #[test]
    fn test_district_field_varies_over_distance() {
        let map = DistrictMap::new(12345);
        let mut seen = std::collections::HashSet::new();
        for x in -40..40 {
            for z in -40..40 {
                seen.insert(map.district_at(ChunkCoord::new(x * 3, z * 3)));
            }
        }
        assert!(seen.len() >= 2, "noise field produced a single district");
    }
}
