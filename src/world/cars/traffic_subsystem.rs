use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::traffic_structs::{LaneAxis, TrafficCar};
use crate::data::Settings;
use crate::helpers::color::hex_rgb;
use crate::helpers::positions::ChunkCoord;
use crate::world::chunks::{BLOCK_SIZE, CHUNK_SIZE, HALF_ROAD};
use crate::world::SimTime;

/// Lateral offsets of the four lanes relative to a chunk origin: one pair
/// around the road line at 0, one pair around the line at 32.
const LANE_OFFSETS: [f32; 4] = [-2.0, 2.0, 30.0, 34.0];

const CAR_COLORS: [u32; 6] = [
    0xC0392B, // red
    0x2980B9, // blue
    0xECF0F1, // white
    0x2C3E50, // dark navy
    0xF1C40F, // taxi yellow
    0x27AE60, // green
];

const MIN_CARS_PER_CHUNK: usize = 2;

/// Two cars share a lane when their lane lines are closer than this.
const LANE_MATCH_WIDTH: f32 = 4.0;
const FOLLOW_SLOW_DISTANCE: f32 = 15.0;
const FOLLOW_STOP_DISTANCE: f32 = 5.0;

const YIELD_APPROACH_DISTANCE: f32 = 10.0;
const YIELD_CROSS_LONGITUDINAL: f32 = 15.0;
const YIELD_CROSS_LATERAL: f32 = 6.0;

const PLAYER_LATERAL: f32 = 6.0;
const PLAYER_SLOW_DISTANCE: f32 = 20.0;
const PLAYER_STOP_DISTANCE: f32 = 10.0;
const HONK_DURATION: SimTime = 0.5;

const THROTTLE_NEAR: f32 = 100.0;
const THROTTLE_FAR: f32 = 200.0;

/// Ambient traffic: a fixed pool of vehicles that follow their assigned
/// lane, queue behind each other, yield at intersections and honk at the
/// player. Slots are reused across spawn/despawn cycles; nothing is
/// allocated after construction.
pub struct TrafficSubsystem {
    cars: Vec<TrafficCar>,
    rng: SmallRng,
    frame: u64,
    view_distance: i32,
    cache_distance: i32,
    throttling: bool,
}

impl TrafficSubsystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            cars: vec![TrafficCar::parked(); settings.traffic_pool_size],
            rng: SmallRng::seed_from_u64(settings.world_seed as u64),
            frame: 0,
            view_distance: settings.view_distance,
            cache_distance: settings.cache_distance.max(settings.view_distance),
            throttling: settings.traffic_throttling,
        }
    }

    pub fn update(&mut self, dt: f32, now: SimTime, player_pos: Vec3) {
        self.frame = self.frame.wrapping_add(1);

        for i in 0..self.cars.len() {
            if !self.cars[i].active {
                continue;
            }

            // Far cars tick on a coarser cadence with a proportionally
            // larger step; the per-slot phase keeps the strides from all
            // landing on the same frame.
            let stride = self.update_stride(&self.cars[i], player_pos);
            if stride > 1 && (self.frame + i as u64) % stride != 0 {
                continue;
            }

            self.step_car(i, dt * stride as f32, now, player_pos);
        }

        self.update_spawning(player_pos);
    }

    fn update_stride(&self, car: &TrafficCar, player_pos: Vec3) -> u64 {
        if !self.throttling {
            return 1;
        }
        let d2 = car.pos.distance_squared(player_pos);
        if d2 > THROTTLE_FAR * THROTTLE_FAR {
            4
        } else if d2 > THROTTLE_NEAR * THROTTLE_NEAR {
            2
        } else {
            1
        }
    }

    /// One behavior-and-movement tick for an active slot. Speed starts
    /// from the car's cruise speed each tick; every rule below can only
    /// lower it, so a full stop is never overridden by a milder rule.
    fn step_car(&mut self, i: usize, dt: f32, now: SimTime, player_pos: Vec3) {
        let mut speed = self.cars[i].base_speed;

        if self.yields_at_intersection(i) {
            speed = 0.0;
        }

        if let Some(gap) = self.gap_to_car_ahead(i) {
            if gap < FOLLOW_SLOW_DISTANCE {
                let follow = if gap < FOLLOW_STOP_DISTANCE {
                    0.0
                } else {
                    self.cars[i].base_speed * (gap - FOLLOW_STOP_DISTANCE)
                        / (FOLLOW_SLOW_DISTANCE - FOLLOW_STOP_DISTANCE)
                };
                speed = speed.min(follow);
            }
        }

        let car = &mut self.cars[i];

        let ahead = car.signed_distance_ahead(player_pos);
        if ahead > 0.0
            && ahead < PLAYER_SLOW_DISTANCE
            && car.lateral_distance_to(player_pos) < PLAYER_LATERAL
        {
            car.honking = true;
            car.honk_time = now;
            speed = if ahead < PLAYER_STOP_DISTANCE {
                0.0
            } else {
                speed * 0.5
            };
        }

        if car.honking && now - car.honk_time > HONK_DURATION {
            car.honking = false;
        }

        car.speed = speed;

        // Movement stays on the lane axis; lanes are never changed.
        let dir = car.axis_dir();
        match car.lane_axis {
            LaneAxis::X => {
                car.pos.x += dir * speed * dt;
                car.rotation = if dir > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
            }
            LaneAxis::Z => {
                car.pos.z += dir * speed * dt;
                car.rotation = if dir > 0.0 { 0.0 } else { PI };
            }
        }
    }

    /// Cross traffic on the X axis has right of way. A Z-axis car closing
    /// in on the crossing of its own road line gives way while any X-axis
    /// car is near that crossing.
    fn yields_at_intersection(&self, i: usize) -> bool {
        let car = &self.cars[i];
        if car.lane_axis != LaneAxis::Z {
            return false;
        }

        // Road lines sit on a global 32-unit grid; the crossing this car
        // can block is the one on the road it drives on.
        let cross_x = (car.pos.x / BLOCK_SIZE).round() * BLOCK_SIZE;
        if (car.pos.x - cross_x).abs() > HALF_ROAD {
            return false;
        }

        let dir = car.axis_dir();
        let cross_z = if dir > 0.0 {
            (car.pos.z / BLOCK_SIZE).ceil() * BLOCK_SIZE
        } else {
            (car.pos.z / BLOCK_SIZE).floor() * BLOCK_SIZE
        };
        let distance = (cross_z - car.pos.z) * dir;
        if distance <= 0.0 || distance > YIELD_APPROACH_DISTANCE {
            return false;
        }

        self.cars.iter().enumerate().any(|(j, other)| {
            j != i
                && other.active
                && other.lane_axis == LaneAxis::X
                && (other.pos.x - cross_x).abs() < YIELD_CROSS_LONGITUDINAL
                && (other.pos.z - cross_z).abs() < YIELD_CROSS_LATERAL
        })
    }

    /// Gap to the nearest active car ahead in the same lane, if any.
    fn gap_to_car_ahead(&self, i: usize) -> Option<f32> {
        let car = &self.cars[i];
        let mut nearest: Option<f32> = None;

        for (j, other) in self.cars.iter().enumerate() {
            if j == i || !other.active || other.lane_axis != car.lane_axis {
                continue;
            }
            if (car.lane_pos - other.lane_pos).abs() >= LANE_MATCH_WIDTH {
                continue;
            }
            let gap = car.signed_distance_ahead(other.pos);
            if gap <= 0.0 {
                continue;
            }
            if nearest.is_none_or(|n| gap < n) {
                nearest = Some(gap);
            }
        }

        nearest
    }

    /// Keep every chunk near the player populated, and park anything that
    /// fell too far behind. Runs every frame regardless of throttling.
    fn update_spawning(&mut self, player_pos: Vec3) {
        let player_chunk = ChunkCoord::from_world(player_pos, CHUNK_SIZE);

        let mut cars_per_chunk: HashMap<ChunkCoord, usize> = HashMap::new();
        for car in self.cars.iter().filter(|c| c.active) {
            *cars_per_chunk
                .entry(ChunkCoord::from_world(car.pos, CHUNK_SIZE))
                .or_insert(0) += 1;
        }

        for dz in -self.view_distance..=self.view_distance {
            for dx in -self.view_distance..=self.view_distance {
                let coord = player_chunk.offset(dx, dz);
                if cars_per_chunk.get(&coord).copied().unwrap_or(0) < MIN_CARS_PER_CHUNK {
                    self.spawn_cars_for_chunk(coord);
                }
            }
        }

        let despawn_distance = self.cache_distance as f32 * CHUNK_SIZE;
        for car in &mut self.cars {
            if car.active && car.pos.distance(player_pos) > despawn_distance {
                car.active = false;
                car.honking = false;
                car.pos = Vec3::new(0.0, -1000.0, 0.0);
            }
        }
    }

    /// Drop 2-4 cars onto random lanes of a chunk. Pool exhaustion just
    /// stops the spawn; fewer cars is an accepted outcome.
    fn spawn_cars_for_chunk(&mut self, coord: ChunkCoord) {
        let count = self.rng.random_range(2..=4);
        let (world_x, world_z) = coord.world_origin(CHUNK_SIZE);

        for _ in 0..count {
            let Some(slot) = self.cars.iter().position(|c| !c.active) else {
                log::debug!("traffic pool exhausted, skipping spawn");
                return;
            };

            let offset = LANE_OFFSETS[self.rng.random_range(0..LANE_OFFSETS.len())];
            // Right-hand traffic: the near-side lane of each road runs in
            // the positive direction, the far side comes back.
            let positive = offset < 0.0 || offset == 30.0;
            let horizontal = self.rng.random_bool(0.5);

            let car = &mut self.cars[slot];
            car.active = true;
            car.honking = false;
            car.honk_time = 0.0;

            if horizontal {
                car.lane_axis = LaneAxis::X;
                car.lane_pos = world_z + offset;
                car.dir = if positive { Vec3::X } else { -Vec3::X };
                car.rotation = if positive { FRAC_PI_2 } else { -FRAC_PI_2 };
                let x = world_x + self.rng.random_range(0.0..CHUNK_SIZE);
                car.pos = Vec3::new(x, 0.5, car.lane_pos);
            } else {
                car.lane_axis = LaneAxis::Z;
                car.lane_pos = world_x + offset;
                car.dir = if positive { Vec3::Z } else { -Vec3::Z };
                car.rotation = if positive { 0.0 } else { PI };
                let z = world_z + self.rng.random_range(0.0..CHUNK_SIZE);
                car.pos = Vec3::new(car.lane_pos, 0.5, z);
            }

            car.base_speed = self.rng.random_range(12.0..18.0);
            car.speed = car.base_speed;
            car.scale = self.rng.random_range(0.8..1.2);
            car.color = hex_rgb(CAR_COLORS[self.rng.random_range(0..CAR_COLORS.len())]);
        }
    }

    /// Active vehicles, for the presentation layer's instance updates.
    pub fn active_cars(&self) -> impl Iterator<Item = &TrafficCar> {
        self.cars.iter().filter(|c| c.active)
    }

    pub fn active_count(&self) -> usize {
        self.cars.iter().filter(|c| c.active).count()
    }

    pub fn pool_size(&self) -> usize {
        self.cars.len()
    }

    /// Park every vehicle; the pool itself stays allocated.
    pub fn clear(&mut self) {
        for car in &mut self.cars {
            *car = TrafficCar::parked();
        }
    }
}
