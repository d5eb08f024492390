//! # Ray Module
//!
//! A half-line in world space together with the hit vocabulary shared by the
//! bounding box and chunk intersection routines.

use cgmath::{Point3, Vector3};

/// Parametric time along a ray.
pub type Time = f32;

/// The outcome of an intersection query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitType {
    /// The ray intersects the target inside the requested time window.
    Hit,
    /// The ray does not intersect the target inside the requested time window.
    Miss,
}

impl HitType {
    /// Classifies the result of an intersection query.
    pub fn of<T>(record: &Option<T>) -> Self {
        match record {
            Some(_) => HitType::Hit,
            None => HitType::Miss,
        }
    }
}

/// A ray described by its origin and direction.
///
/// The direction is not required to be normalized; times reported by the
/// intersection routines are in units of the direction's length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    origin: Point3<f32>,
    direction: Vector3<f32>,
}

impl Ray {
    /// Creates a new ray.
    ///
    /// # Arguments
    /// * `origin` - The point the ray starts from
    /// * `direction` - The direction the ray travels in
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Ray { origin, direction }
    }

    /// The starting point of the ray.
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    /// The direction of the ray.
    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Returns the point reached at parametric time `t`.
    pub fn at(&self, t: Time) -> Point3<f32> {
        self.origin + self.direction * t
    }
}
