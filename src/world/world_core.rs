use glam::Vec3;

use super::cars::car_player::PlayerCar;
use super::cars::traffic_subsystem::TrafficSubsystem;
use super::chunks::chunk_subsystem::ChunkSubsystem;
use super::daynight::DayNightCycle;
use super::SimTime;
use crate::data::Settings;
use crate::events::Events;
use crate::input::InputState;

/// A frame hitch should not teleport the player through a building.
const MAX_FRAME_DT: f32 = 0.25;

/// The whole simulation: player vehicle, streamed world, ambient traffic
/// and the day/night clock, stepped once per rendered frame. One logical
/// thread owns all of it; subsystems are plain fields, not globals.
pub struct WorldCore {
    pub settings: Settings,
    pub events: Events,
    pub chunks: ChunkSubsystem,
    pub traffic: TrafficSubsystem,
    pub player: PlayerCar,
    pub daynight: DayNightCycle,
    total_time: SimTime,
}

impl WorldCore {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        Self {
            chunks: ChunkSubsystem::new(&settings),
            traffic: TrafficSubsystem::new(&settings),
            player: PlayerCar::new(),
            daynight: DayNightCycle::new(settings.day_length, settings.start_time_of_day),
            events: Events::new(),
            total_time: 0.0,
            settings,
        }
    }

    /// One simulation frame. `dt` is wall-clock seconds since the last
    /// call, provided by the frame scheduler. Order is fixed: move the
    /// player, stream chunks around the new position, resolve collisions
    /// against the freshly resident geometry, then run traffic and time.
    pub fn step(&mut self, input: &InputState, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.total_time += dt as SimTime;

        self.player.update(input, dt);
        self.chunks
            .update(self.player.pos, self.total_time, &mut self.events);

        let colliders = self.chunks.colliders_at(self.player.pos);
        self.player.resolve_collisions(colliders);

        self.traffic.update(dt, self.total_time, self.player.pos);
        self.daynight.update(dt);
    }

    /// Tear the world down in place: evict all chunks (with unload events
    /// for the presentation layer) and park the traffic pool.
    pub fn teardown(&mut self) {
        self.chunks.clear(&mut self.events);
        self.traffic.clear();
    }

    pub fn total_time(&self) -> SimTime {
        self.total_time
    }

    pub fn player_position(&self) -> Vec3 {
        self.player.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::helpers::positions::ChunkCoord;
    use crate::world::chunks::CHUNK_SIZE;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_first_step_streams_world_around_player() {
        let mut world = WorldCore::new(Settings::default());
        world.step(&InputState::none(), DT);

        let side = (2 * world.settings.view_distance + 1) as usize;
        assert_eq!(world.chunks.resident_count(), side * side);
        assert!(world.traffic.active_count() > 0);

        let loads = world
            .events
            .drain()
            .filter(|e| matches!(e, Event::ChunkLoaded(_)))
            .count();
        assert_eq!(loads, side * side);
    }

    #[test]
    fn test_player_drives_forward_under_input() {
        let mut world = WorldCore::new(Settings::default());
        let input = InputState {
            forward: true,
            ..InputState::none()
        };
        for _ in 0..120 {
            world.step(&input, DT);
        }
        assert!(world.player.pos.z < -5.0);
        assert!(world.player.speed > 0.0);
    }

    #[test]
    fn test_residency_follows_the_player() {
        let mut world = WorldCore::new(Settings::default());
        let input = InputState {
            forward: true,
            ..InputState::none()
        };
        // drive long enough to cross several chunk borders (forward is -z)
        for _ in 0..2000 {
            world.step(&input, DT);
        }

        let center = ChunkCoord::from_world(world.player.pos, CHUNK_SIZE);
        let view = world.settings.view_distance;
        let cache = world.settings.cache_distance;
        for dz in -view..=view {
            for dx in -view..=view {
                assert!(world.chunks.contains(center.offset(dx, dz)));
            }
        }
        for chunk in world.chunks.chunks() {
            assert!((chunk.coord.x - center.x).abs() <= cache);
            assert!((chunk.coord.z - center.z).abs() <= cache);
        }
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut world = WorldCore::new(Settings::default());
        let input = InputState {
            forward: true,
            ..InputState::none()
        };
        // an absurd hitch moves the player at most one clamped frame far
        world.step(&input, 1000.0);
        assert!(world.player.pos.length() < 100.0);
        assert!((world.total_time() - MAX_FRAME_DT as f64).abs() < 1e-9);
    }

    #[test]
    fn test_time_accumulates_and_daynight_advances() {
        let mut world = WorldCore::new(Settings::default());
        let start_phase = world.daynight.time_of_day();
        for _ in 0..60 {
            world.step(&InputState::none(), DT);
        }
        assert!((world.total_time() - 1.0).abs() < 1e-3);
        assert!(world.daynight.time_of_day() > start_phase);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut world = WorldCore::new(Settings::default());
        world.step(&InputState::none(), DT);
        world.events.drain().count();

        let resident = world.chunks.resident_count();
        world.teardown();

        assert_eq!(world.chunks.resident_count(), 0);
        assert_eq!(world.traffic.active_count(), 0);
        let unloads = world
            .events
            .drain()
            .filter(|e| matches!(e, Event::ChunkUnloaded(_)))
            .count();
        assert_eq!(unloads, resident);
    }
}
