//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! fixed-size blocks of voxel data. It includes terrain generation, visibility
//! culling, ray picking and block editing.
//!
//! ## Storage
//!
//! The dimensions of a chunk are const generic parameters, so every chunk of a
//! given type holds exactly `WIDTH * HEIGHT * DEPTH` voxels. The voxels live in a
//! boxed slice allocated once at construction and never resized, laid out with
//! x varying fastest, then y, then z:
//!
//! ```text
//! index(x, y, z) = x + WIDTH * y + WIDTH * HEIGHT * z
//! ```
//!
//! ## Placement
//!
//! A chunk is anchored at a 2D origin `(world_x, world_z)`; its voxels occupy
//! `world_x..world_x + WIDTH`, `0..HEIGHT`, `world_z..world_z + DEPTH`.

use cgmath::{Point3, Vector2, Vector3};
use log::{debug, trace};

use super::block::block_type::VoxelType;
use super::block::Voxel;
use super::geometry::Aabb;

mod chunk_drawing;
mod chunk_generation;
mod chunk_intersection;
pub mod chunk_iteration;
mod chunk_visibility;

pub use chunk_intersection::ChunkHitRecord;

/// The edge length, in voxels, of the cubic chunks used by the world.
pub const CHUNK_DIMENSION: usize = 16;

/// A chunk with the same edge length on every axis.
pub type CubicChunk<const SIZE: usize> = Chunk<SIZE, SIZE, SIZE>;

/// Represents a `WIDTH x HEIGHT x DEPTH` collection of voxels in the world.
///
/// Chunks are the unit of terrain generation, visibility culling and picking.
/// Each chunk knows its world origin and the bounding box it covers.
pub struct Chunk<const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> {
    /// The world-space `(x, z)` offset of the chunk's minimum corner.
    origin: Vector2<f32>,

    /// The box covering every voxel of the chunk, fixed at construction.
    aabb: Aabb,

    /// Flattened voxel storage of length `VOLUME`, see [`Chunk::index`].
    voxels: Box<[Voxel]>,
}

impl<const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> Chunk<WIDTH, HEIGHT, DEPTH> {
    /// The number of voxels in a chunk.
    pub const VOLUME: usize = WIDTH * HEIGHT * DEPTH;

    /// Creates a new, completely empty chunk.
    ///
    /// # Arguments
    /// * `origin` - The world-space `(x, z)` offset of the chunk
    pub fn empty(origin: Vector2<f32>) -> Self {
        let min = Point3::new(origin.x, 0.0, origin.y);
        let max = min + Vector3::new(WIDTH as f32, HEIGHT as f32, DEPTH as f32);

        Chunk {
            origin,
            aabb: Aabb::new(min, max),
            voxels: vec![Voxel::EMPTY; Self::VOLUME].into_boxed_slice(),
        }
    }

    /// The world-space `(x, z)` offset of the chunk.
    pub fn origin(&self) -> Vector2<f32> {
        self.origin
    }

    /// The bounding box of the chunk.
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Returns `true` if `(x, y, z)` lies inside the chunk.
    pub fn in_bounds(x: usize, y: usize, z: usize) -> bool {
        x < WIDTH && y < HEIGHT && z < DEPTH
    }

    /// Flattens in-bounds chunk coordinates into an index into the voxel array.
    ///
    /// This is a bijection from `[0, WIDTH) x [0, HEIGHT) x [0, DEPTH)` onto
    /// `[0, VOLUME)`; [`Chunk::coords_of`] is its inverse.
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(Self::in_bounds(x, y, z));
        x + WIDTH * y + WIDTH * HEIGHT * z
    }

    /// Expands a voxel array index back into chunk coordinates.
    pub fn coords_of(index: usize) -> Point3<usize> {
        debug_assert!(index < Self::VOLUME);
        Point3::new(
            index % WIDTH,
            (index / WIDTH) % HEIGHT,
            index / (WIDTH * HEIGHT),
        )
    }

    /// Gets the voxel at the specified chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` if the coordinates are out of bounds.
    pub fn voxel_at(&self, x: usize, y: usize, z: usize) -> Option<&Voxel> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        Some(&self.voxels[Self::index(x, y, z)])
    }

    /// All voxels in index order.
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Counts the voxels currently flagged visible.
    pub fn visible_count(&self) -> usize {
        self.voxels.iter().filter(|voxel| voxel.visible).count()
    }

    /// The world-space position of the minimum corner of the voxel at `(x, y, z)`.
    pub fn voxel_world_min(&self, x: usize, y: usize, z: usize) -> Point3<f32> {
        self.aabb.min() + Vector3::new(x as f32, y as f32, z as f32)
    }

    /// Removes the block at `(x, y, z)`.
    ///
    /// Visibility is recomputed for the removed voxel's neighborhood before
    /// returning.
    ///
    /// # Returns
    /// `false`, leaving the chunk untouched, if the coordinates are out of
    /// bounds or the voxel is already empty; `true` otherwise.
    pub fn remove_block(&mut self, x: usize, y: usize, z: usize) -> bool {
        if !Self::in_bounds(x, y, z) {
            trace!("Remove at ({}, {}, {}) is out of bounds", x, y, z);
            return false;
        }

        let voxel = &mut self.voxels[Self::index(x, y, z)];
        if voxel.is_empty() {
            return false;
        }

        debug!(
            "Removing {:?} at ({}, {}, {}) in chunk at {:?}",
            voxel.voxel_type, x, y, z, self.origin
        );
        *voxel = Voxel::EMPTY;
        self.update_visibility_around(x, y, z);

        true
    }

    /// Places a block of `voxel_type` at `(x, y, z)`.
    ///
    /// # Returns
    /// `false`, leaving the chunk untouched, if the coordinates are out of
    /// bounds, the voxel is already occupied, or `voxel_type` is `EMPTY`;
    /// `true` otherwise.
    pub fn place_block(&mut self, x: usize, y: usize, z: usize, voxel_type: VoxelType) -> bool {
        if !voxel_type.is_solid() || !Self::in_bounds(x, y, z) {
            trace!("Rejected placing {:?} at ({}, {}, {})", voxel_type, x, y, z);
            return false;
        }

        let voxel = &mut self.voxels[Self::index(x, y, z)];
        if !voxel.is_empty() {
            return false;
        }

        debug!(
            "Placing {:?} at ({}, {}, {}) in chunk at {:?}",
            voxel_type, x, y, z, self.origin
        );
        *voxel = Voxel {
            voxel_type,
            visible: true,
        };
        self.update_visibility_around(x, y, z);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::heightmap::FlatHeightmap;

    type SmallChunk = Chunk<4, 5, 3>;

    #[test]
    fn index_covers_volume_exactly_once() {
        let mut seen = vec![false; SmallChunk::VOLUME];
        for z in 0..3 {
            for y in 0..5 {
                for x in 0..4 {
                    let index = SmallChunk::index(x, y, z);
                    assert!(!seen[index]);
                    seen[index] = true;
                    assert_eq!(SmallChunk::coords_of(index), Point3::new(x, y, z));
                }
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn aabb_spans_origin_and_dimensions() {
        let chunk = SmallChunk::empty(Vector2::new(8.0, 12.0));
        assert_eq!(chunk.aabb().min(), Point3::new(8.0, 0.0, 12.0));
        assert_eq!(chunk.aabb().max(), Point3::new(12.0, 5.0, 15.0));
    }

    #[test]
    fn remove_on_empty_or_out_of_bounds_fails() {
        let mut chunk = SmallChunk::empty(Vector2::new(0.0, 0.0));
        assert!(!chunk.remove_block(0, 0, 0));
        assert!(!chunk.remove_block(4, 0, 0));
        assert!(!chunk.remove_block(0, 5, 0));
        assert!(!chunk.remove_block(0, 0, 3));
    }

    #[test]
    fn place_then_remove() {
        let mut chunk = SmallChunk::empty(Vector2::new(0.0, 0.0));
        assert!(chunk.place_block(1, 2, 1, VoxelType::MARKER));

        let voxel = chunk.voxel_at(1, 2, 1).unwrap();
        assert_eq!(voxel.voxel_type, VoxelType::MARKER);
        assert!(voxel.visible);

        assert!(!chunk.place_block(1, 2, 1, VoxelType::STONE));
        assert!(chunk.remove_block(1, 2, 1));
        assert_eq!(*chunk.voxel_at(1, 2, 1).unwrap(), Voxel::EMPTY);
    }

    #[test]
    fn placing_empty_is_rejected() {
        let mut chunk = SmallChunk::empty(Vector2::new(0.0, 0.0));
        assert!(!chunk.place_block(0, 0, 0, VoxelType::EMPTY));
        assert!(!chunk.place_block(9, 0, 0, VoxelType::STONE));
    }

    #[test]
    fn failed_edit_leaves_voxels_untouched() {
        let mut chunk = CubicChunk::<8>::empty(Vector2::new(0.0, 0.0));
        chunk.generate(&FlatHeightmap::new(0.5));
        let before = chunk.voxels().to_vec();

        // Above the surface, already empty
        assert!(!chunk.remove_block(3, 7, 3));
        // Below the surface, already occupied
        assert!(!chunk.place_block(3, 1, 3, VoxelType::STONE));

        assert_eq!(chunk.voxels(), &before[..]);
    }

    #[test]
    fn removal_exposes_neighbors() {
        let mut chunk = CubicChunk::<8>::empty(Vector2::new(0.0, 0.0));
        chunk.generate(&FlatHeightmap::new(0.5));

        // Deep stone is hidden until the voxel above it is dug out.
        assert!(!chunk.voxel_at(3, 2, 3).unwrap().visible);
        assert!(chunk.remove_block(3, 3, 3));
        assert!(chunk.remove_block(3, 4, 3));
        assert!(chunk.voxel_at(3, 2, 3).unwrap().visible);
        assert!(chunk.voxel_at(2, 3, 3).unwrap().visible);
    }
}
