//! # Voxel Type Module
//!
//! This module defines the material tags a voxel can carry.
//! It provides conversion from the compact integer form used for block slot
//! selection.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::VoxelTypeSize;

/// Enumerates all possible voxel materials in the world.
///
/// `EMPTY` means "no solid material": such a voxel is never drawn, never hit
/// by a ray and never visible. The `FromPrimitive` derive allows conversion
/// from integers, which is how block slots are selected.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VoxelType {
    /// No material.
    #[default]
    EMPTY,

    /// The surface layer placed on top of every terrain column.
    GRASS,

    /// The fill material below the surface.
    STONE,

    /// A debug material used to mark positions in the world.
    MARKER,
}

impl VoxelType {
    /// Converts a `VoxelTypeSize` to a `VoxelType`.
    ///
    /// # Returns
    /// The corresponding `VoxelType`, or `None` if the value names no type.
    pub fn from_int(vtype: VoxelTypeSize) -> Option<Self> {
        FromPrimitive::from_u8(vtype)
    }

    /// Returns `true` for every type except `EMPTY`.
    pub fn is_solid(self) -> bool {
        self != VoxelType::EMPTY
    }
}
