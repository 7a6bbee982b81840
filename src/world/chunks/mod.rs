pub mod building_gen;
pub mod chunk_subsystem;
pub mod districts;
pub mod road_gen;
pub mod seeded_rng;
pub mod simplex;
pub mod tree_gen;

/// Side length of one streamed chunk in world units.
pub const CHUNK_SIZE: f32 = 64.0;
/// A chunk holds a 2x2 grid of city blocks separated by roads.
pub const BLOCK_SIZE: f32 = 32.0;
pub const ROAD_WIDTH: f32 = 8.0;
pub const HALF_ROAD: f32 = ROAD_WIDTH / 2.0;
/// Gap between the road edge and the nearest buildable ground.
pub const BUILDING_SETBACK: f32 = 2.0;
