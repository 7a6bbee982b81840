use crate::world::SimTime;
use glam::Vec3;

/// The axis a traffic car travels on. Assigned at spawn, never changed:
/// traffic has no pathfinding, it just follows its road line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneAxis {
    X,
    Z,
}

/// One pooled traffic vehicle. The pool is a fixed array of these; an
/// inactive slot is free for the next spawn and everything in it is
/// overwritten then.
#[derive(Debug, Clone)]
pub struct TrafficCar {
    pub pos: Vec3,
    /// Unit travel direction; only the sign along `lane_axis` matters.
    pub dir: Vec3,
    /// Yaw for the presentation layer, derived from the travel direction.
    pub rotation: f32,
    pub lane_axis: LaneAxis,
    /// World-space lateral coordinate of the lane line, fixed at spawn.
    pub lane_pos: f32,
    /// Resolved speed this frame, after yielding/following/avoidance.
    pub speed: f32,
    /// Cruise speed this car returns to when nothing is in the way.
    pub base_speed: f32,
    pub scale: f32,
    pub color: [f32; 3],
    pub active: bool,
    pub honking: bool,
    pub honk_time: SimTime,
}

impl TrafficCar {
    /// A free slot: inactive and parked far below the world.
    pub fn parked() -> Self {
        Self {
            pos: Vec3::new(0.0, -1000.0, 0.0),
            dir: Vec3::X,
            rotation: 0.0,
            lane_axis: LaneAxis::X,
            lane_pos: 0.0,
            speed: 0.0,
            base_speed: 0.0,
            scale: 1.0,
            color: [0.0, 0.0, 1.0],
            active: false,
            honking: false,
            honk_time: 0.0,
        }
    }

    /// Coordinate along the travel axis.
    #[inline]
    pub fn axis_pos(&self) -> f32 {
        match self.lane_axis {
            LaneAxis::X => self.pos.x,
            LaneAxis::Z => self.pos.z,
        }
    }

    /// Signed direction of travel along the lane axis (+1 or -1).
    #[inline]
    pub fn axis_dir(&self) -> f32 {
        match self.lane_axis {
            LaneAxis::X => self.dir.x.signum(),
            LaneAxis::Z => self.dir.z.signum(),
        }
    }

    /// Distance from this car to `pos` along the travel axis, positive
    /// when `pos` is ahead of the car.
    #[inline]
    pub fn signed_distance_ahead(&self, pos: Vec3) -> f32 {
        match self.lane_axis {
            LaneAxis::X => (pos.x - self.pos.x) * self.axis_dir(),
            LaneAxis::Z => (pos.z - self.pos.z) * self.axis_dir(),
        }
    }

    /// Sideways offset from this car's travel line to `pos`.
    #[inline]
    pub fn lateral_distance_to(&self, pos: Vec3) -> f32 {
        match self.lane_axis {
            LaneAxis::X => (pos.z - self.pos.z).abs(),
            LaneAxis::Z => (pos.x - self.pos.x).abs(),
        }
    }
}
