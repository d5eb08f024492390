//! # Block Side Module
//!
//! This module defines the six faces of a voxel cube.
//! Ray picks report which face was struck, and block placement uses the
//! face normal to find the voxel in front of it.

use cgmath::{Point3, Vector3};

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Returns the outward unit normal of this face in voxel coordinates.
    pub fn normal(self) -> Vector3<i64> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Determines which face of a unit cube lies closest to `point`.
    ///
    /// # Arguments
    /// * `cube_min` - The minimum corner of the cube
    /// * `point` - A point on (or inside) the cube, typically a ray entry point
    ///
    /// # Returns
    /// The face whose plane is nearest to `point`. Ties resolve in `all()` order.
    pub fn nearest_to(cube_min: Point3<f32>, point: Point3<f32>) -> BlockSide {
        let local = point - cube_min;
        let distances = [
            (BlockSide::FRONT, 1.0 - local.z),
            (BlockSide::BACK, local.z),
            (BlockSide::BOTTOM, local.y),
            (BlockSide::TOP, 1.0 - local.y),
            (BlockSide::LEFT, local.x),
            (BlockSide::RIGHT, 1.0 - local.x),
        ];

        let mut nearest = distances[0];
        for candidate in &distances[1..] {
            if candidate.1.abs() < nearest.1.abs() {
                nearest = *candidate;
            }
        }
        nearest.0
    }
}
