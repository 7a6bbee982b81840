pub mod data;
pub mod events;
pub mod helpers;
pub mod input;
pub mod world;

pub use data::Settings;
pub use events::{Event, Events};
pub use helpers::aabb::Aabb;
pub use helpers::positions::ChunkCoord;
pub use input::InputState;
pub use world::world_core::WorldCore;
