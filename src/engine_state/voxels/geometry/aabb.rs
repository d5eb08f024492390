//! # Axis-Aligned Bounding Box Module
//!
//! Provides the immutable [`Aabb`] and its ray intersection test based on the
//! slab method: the ray is clipped against the pair of parallel planes on each
//! axis and the three resulting time intervals are intersected.

use cgmath::{Point3, Vector3};

use super::ray::{HitType, Ray, Time};

/// The result of a successful ray/box intersection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AabbHitRecord {
    /// The world-space point where the ray enters the box
    pub point: Point3<f32>,
    /// The parametric time of `point` along the ray
    pub time: Time,
}

/// An axis-aligned box spanning `min..=max` on every axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its two extreme corners.
    ///
    /// # Arguments
    /// * `min` - The corner with the smallest coordinate on every axis
    /// * `max` - The corner with the largest coordinate on every axis
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Aabb { min, max }
    }

    /// Creates a 1x1x1 box whose minimum corner sits at `min`.
    ///
    /// This is the footprint of a single voxel.
    pub fn unit_at(min: Point3<f32>) -> Self {
        Aabb {
            min,
            max: min + Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// The minimum corner.
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// The maximum corner.
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Returns `true` if `point` lies inside the box or on its surface.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }

    /// Intersects `ray` with the box, restricted to the time window `[t_min, t_max]`.
    ///
    /// An axis on which the ray direction is zero is parallel to that slab: the
    /// ray either lies between the two planes for all time or never does.
    ///
    /// # Returns
    /// - `Some(record)` with the entry time and entry point. If the ray starts
    ///   inside the box the entry time is clamped to `t_min`.
    /// - `None` if the per-axis intervals do not overlap or their overlap lies
    ///   entirely outside `[t_min, t_max]`.
    pub fn hit(&self, ray: &Ray, t_min: Time, t_max: Time) -> Option<AabbHitRecord> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_enter = Time::NEG_INFINITY;
        let mut t_exit = Time::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];

            if d == 0.0 {
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inverse = 1.0 / d;
            let mut t0 = (self.min[axis] - o) * inverse;
            let mut t1 = (self.max[axis] - o) * inverse;
            if inverse < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_exit < t_min || t_enter > t_max {
            return None;
        }

        let time = t_enter.max(t_min);
        Some(AabbHitRecord {
            point: ray.at(time),
            time,
        })
    }

    /// Convenience wrapper around [`Aabb::hit`] that only reports the hit type.
    pub fn hit_type(&self, ray: &Ray, t_min: Time, t_max: Time) -> HitType {
        HitType::of(&self.hit(ray, t_min, t_max))
    }
}
