//! # Geometry Module
//!
//! Ray and axis-aligned bounding box primitives used for block picking.
//!
//! Both the chunk-level broad test and the per-voxel narrow test go through
//! [`Aabb::hit`], so the slab test is the single source of truth for what a
//! "hit" means in the engine.

pub mod aabb;
pub mod ray;

pub use aabb::{Aabb, AabbHitRecord};
pub use ray::{HitType, Ray, Time};
