use crate::helpers::color::{hex_rgb, lerp_rgb};
use glam::Vec3;
use std::f32::consts::TAU;

const DAY_COLOR: u32 = 0x87CEEB; // sky blue
const SUNSET_COLOR: u32 = 0xFF7F50; // coral; dawn reuses it
const NIGHT_COLOR: u32 = 0x0A0A20;

/// Orbit radius for the sun/moon light anchor; high enough to clear the
/// tallest downtown towers.
const SUN_RADIUS: f32 = 150.0;
const SUN_LIFT: f32 = 50.0;

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Day/night clock. `time_of_day` runs in [0,1): 0.25 is noon, 0.75 is
/// midnight. Everything else here is a pure curve over that phase, for
/// the lighting layer to apply however it likes.
pub struct DayNightCycle {
    time_of_day: f32,
    cycle_speed: f32,
}

impl DayNightCycle {
    pub fn new(day_length: f32, start_time_of_day: f32) -> Self {
        Self {
            time_of_day: start_time_of_day.rem_euclid(1.0),
            cycle_speed: 1.0 / day_length.max(1.0),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.time_of_day += self.cycle_speed * dt;
        if self.time_of_day >= 1.0 {
            self.time_of_day -= 1.0;
        }
    }

    #[inline]
    pub fn time_of_day(&self) -> f32 {
        self.time_of_day
    }

    /// Anchor position for the directional light: rises in the east,
    /// peaks overhead at noon, sets in the west.
    pub fn sun_position(&self) -> Vec3 {
        let angle = (self.time_of_day - 0.25) * TAU;
        Vec3::new(
            angle.sin() * SUN_RADIUS,
            angle.cos() * SUN_RADIUS + SUN_LIFT,
            0.0,
        )
    }

    /// Sky color over the day: night → dawn → day → sunset → night, with
    /// smoothstep blends between the keyframes.
    pub fn sky_color(&self) -> [f32; 3] {
        let t = self.time_of_day;
        let day = hex_rgb(DAY_COLOR);
        let sunset = hex_rgb(SUNSET_COLOR);
        let night = hex_rgb(NIGHT_COLOR);

        if t < 0.15 {
            lerp_rgb(night, sunset, smoothstep(0.0, 0.15, t))
        } else if t < 0.25 {
            lerp_rgb(sunset, day, smoothstep(0.15, 0.25, t))
        } else if t < 0.65 {
            day
        } else if t < 0.75 {
            lerp_rgb(day, sunset, smoothstep(0.65, 0.75, t))
        } else if t < 0.85 {
            lerp_rgb(sunset, night, smoothstep(0.75, 0.85, t))
        } else {
            night
        }
    }

    /// Fog matches the sky so the horizon stays seamless.
    pub fn fog_color(&self) -> [f32; 3] {
        self.sky_color()
    }

    /// 0.6 at noon down to 0.2 at midnight, cosine-shaped.
    pub fn ambient_intensity(&self) -> f32 {
        let angle = (self.time_of_day - 0.25) * TAU;
        0.4 + angle.cos() * 0.2
    }

    /// 0.8 at noon down to 0.1 at midnight.
    pub fn directional_intensity(&self) -> f32 {
        let angle = (self.time_of_day - 0.25) * TAU;
        0.45 + angle.cos() * 0.35
    }

    /// Eight-cycle lunar phase so the moon visibly changes night to night.
    pub fn moon_phase(&self) -> f32 {
        (self.time_of_day * 8.0).fract()
    }

    pub fn is_night(&self) -> bool {
        self.time_of_day > 0.8 || self.time_of_day < 0.1
    }
}
