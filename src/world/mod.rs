pub mod cars;
pub mod chunks;
pub mod daynight;
pub mod world_core;

/// Simulation clock in seconds since `WorldCore` creation.
pub type SimTime = f64;
