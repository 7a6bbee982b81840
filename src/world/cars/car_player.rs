use super::collision::{check_collision, CollisionHit};
use crate::helpers::aabb::Aabb;
use crate::input::InputState;
use glam::Vec3;

#[derive(Clone, Copy, Debug)]
struct DriveTuning {
    accel: f32,
    max_speed: f32,
    /// Reverse tops out at this fraction of max speed.
    reverse_frac: f32,
    turn_speed: f32,
    /// Multiplicative speed decay, applied every tick no matter what.
    friction: f32,
    /// Below this the speed snaps to exactly zero instead of creeping.
    stop_epsilon: f32,
    /// Stationary cars can't turn; this is the cutoff.
    min_turn_speed: f32,
    restitution: f32,
    /// Extra separation after a push so the same contact doesn't re-fire.
    push_buffer: f32,
}

const DRIVE: DriveTuning = DriveTuning {
    accel: 75.0,
    max_speed: 100.0,
    reverse_frac: 0.5,
    turn_speed: 2.5,
    friction: 0.95,
    stop_epsilon: 0.01,
    min_turn_speed: 0.1,
    restitution: 0.5,
    push_buffer: 0.1,
};

/// The body is 2x1x4; the collision footprint is a 4x4 square so the box
/// stays conservative at any heading without an oriented-box test.
const COLLIDER_SIZE: Vec3 = Vec3::new(4.0, 1.0, 4.0);

/// The player's vehicle. Speed is a signed scalar along the forward axis;
/// the velocity vector is re-derived from heading and speed every tick,
/// never integrated on its own.
#[derive(Debug, Clone)]
pub struct PlayerCar {
    pub pos: Vec3,
    pub rotation_y: f32,
    pub velocity: Vec3,
    pub speed: f32,
}

impl Default for PlayerCar {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerCar {
    pub fn new() -> Self {
        Self {
            pos: Vec3::new(0.0, 0.5, 0.0),
            rotation_y: 0.0,
            velocity: Vec3::ZERO,
            speed: 0.0,
        }
    }

    pub fn update(&mut self, input: &InputState, dt: f32) {
        if input.forward {
            self.speed = (self.speed + DRIVE.accel * dt).min(DRIVE.max_speed);
        } else if input.backward {
            self.speed =
                (self.speed - DRIVE.accel * dt).max(-DRIVE.max_speed * DRIVE.reverse_frac);
        }

        self.speed *= DRIVE.friction;
        if self.speed.abs() < DRIVE.stop_epsilon {
            self.speed = 0.0;
        }

        if self.speed.abs() > DRIVE.min_turn_speed {
            if input.left {
                self.rotation_y += DRIVE.turn_speed * dt;
            }
            if input.right {
                self.rotation_y -= DRIVE.turn_speed * dt;
            }
        }

        // forward is -Z at heading zero
        let forward = Vec3::new(-self.rotation_y.sin(), 0.0, -self.rotation_y.cos());
        self.velocity = forward * self.speed;
        self.pos += self.velocity * dt;
    }

    #[inline]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_center_size(self.pos, COLLIDER_SIZE)
    }

    /// Single-contact resolution against the current chunk's colliders.
    pub fn resolve_collisions(&mut self, colliders: &[Aabb]) {
        if let Some(hit) = check_collision(&self.bounding_box(), colliders) {
            self.apply_bounce(&hit);
        }
    }

    /// Reflect across the push normal, keep half the energy, and move out
    /// of the overlap with a small buffer so we're guaranteed separated.
    pub fn apply_bounce(&mut self, hit: &CollisionHit) {
        let normal = hit.push_dir;
        let reflected = self.velocity - normal * (2.0 * self.velocity.dot(normal));

        self.velocity = reflected * DRIVE.restitution;
        self.velocity.y = 0.0;
        self.speed = self.velocity.length();

        self.pos += normal * (hit.depth + DRIVE.push_buffer);
    }
}
