//! # Block Module
//!
//! This module provides the per-voxel data of the engine: the material tag,
//! the cached visibility flag and the faces of a voxel cube.

use block_type::VoxelType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent voxel types compactly.
pub type VoxelTypeSize = u8;

/// Represents a single voxel in a chunk.
///
/// `visible` is derived data: it always equals the result of the chunk's
/// visibility pass for the current occupancy, and is `false` whenever the
/// voxel is `EMPTY`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    /// The material of this voxel.
    pub voxel_type: VoxelType,
    /// Whether the voxel borders at least one empty voxel inside its chunk.
    pub visible: bool,
}

impl Voxel {
    /// An empty, invisible voxel.
    pub const EMPTY: Voxel = Voxel {
        voxel_type: VoxelType::EMPTY,
        visible: false,
    };

    /// Creates a new voxel of the specified type.
    ///
    /// Visibility starts out `false`; it is filled in by the next visibility pass.
    pub fn new(voxel_type: VoxelType) -> Self {
        Voxel {
            voxel_type,
            visible: false,
        }
    }

    /// Returns `true` if the voxel holds no material.
    pub fn is_empty(&self) -> bool {
        !self.voxel_type.is_solid()
    }
}
