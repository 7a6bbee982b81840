use crate::helpers::aabb::Aabb;
use glam::Vec3;

/// How to get out of a collision: unit axis direction pointing away from
/// the collider, and how deep the boxes interpenetrate along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionHit {
    pub push_dir: Vec3,
    pub depth: f32,
}

/// Test a car's box against a chunk's colliders. The first intersecting
/// collider in list order wins; this is a single-contact resolver, the
/// frame after the push deals with whatever is left. The escape axis is
/// the one with the smaller overlap (minimum translation vector), pushed
/// toward the car's side of the collider.
pub fn check_collision(car_box: &Aabb, colliders: &[Aabb]) -> Option<CollisionHit> {
    for collider in colliders {
        if !car_box.intersects(collider) {
            continue;
        }

        let overlap_x = (car_box.max.x - collider.min.x).min(collider.max.x - car_box.min.x);
        let overlap_z = (car_box.max.z - collider.min.z).min(collider.max.z - car_box.min.z);

        let hit = if overlap_x < overlap_z {
            let sign = if car_box.center().x > collider.center().x {
                1.0
            } else {
                -1.0
            };
            CollisionHit {
                push_dir: Vec3::new(sign, 0.0, 0.0),
                depth: overlap_x,
            }
        } else {
            let sign = if car_box.center().z > collider.center().z {
                1.0
            } else {
                -1.0
            };
            CollisionHit {
                push_dir: Vec3::new(0.0, 0.0, sign),
                depth: overlap_z,
            }
        };
        return Some(hit);
    }

    None
}
