//! # Voxel Palette Module
//!
//! Maps each voxel type to the drawable used to render it.

use std::collections::HashMap;

use crate::engine_state::rendering::Drawable;

use super::block::block_type::VoxelType;

/// A lookup table from voxel type to drawable resource.
#[derive(Default)]
pub struct VoxelPalette {
    entries: HashMap<VoxelType, Box<dyn Drawable>>,
}

impl VoxelPalette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        VoxelPalette {
            entries: HashMap::new(),
        }
    }

    /// Registers `drawable` for `voxel_type`, replacing any previous entry.
    pub fn insert(&mut self, voxel_type: VoxelType, drawable: Box<dyn Drawable>) {
        self.entries.insert(voxel_type, drawable);
    }

    /// Builder-style variant of [`VoxelPalette::insert`].
    pub fn with(mut self, voxel_type: VoxelType, drawable: Box<dyn Drawable>) -> Self {
        self.insert(voxel_type, drawable);
        self
    }

    /// Looks up the drawable registered for `voxel_type`.
    pub fn look_up(&self, voxel_type: VoxelType) -> Option<&dyn Drawable> {
        self.entries.get(&voxel_type).map(|drawable| drawable.as_ref())
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for VoxelPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxelPalette")
            .field("types", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
