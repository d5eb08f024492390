//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing all non-empty voxels in a
//! chunk together with their chunk-relative positions.
//!
//! Voxels are visited in storage order (x fastest, then y, then z), which is the
//! order draw calls are emitted in.

use cgmath::Point3;

use crate::engine_state::voxels::block::Voxel;

use super::Chunk;

/// An iterator over all non-empty voxels in a chunk.
///
/// The iterator walks the flattened voxel array, skipping empty voxels, and
/// expands each visited index back into chunk coordinates.
pub struct ChunkVoxelIterator<'a, const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk<WIDTH, HEIGHT, DEPTH>,
    /// Next index in the voxel array to inspect
    current_offset: usize,
}

impl<'a, const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize>
    ChunkVoxelIterator<'a, WIDTH, HEIGHT, DEPTH>
{
    /// Creates a new `ChunkVoxelIterator` positioned before the first voxel.
    pub fn new(chunk_ref: &'a Chunk<WIDTH, HEIGHT, DEPTH>) -> Self {
        ChunkVoxelIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl<'a, const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> Iterator
    for ChunkVoxelIterator<'a, WIDTH, HEIGHT, DEPTH>
{
    type Item = (Point3<usize>, &'a Voxel);

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: &'a Chunk<WIDTH, HEIGHT, DEPTH> = self.chunk_ref;
        let voxels = &chunk.voxels;

        while self.current_offset < voxels.len() {
            let index = self.current_offset;
            self.current_offset += 1;

            let voxel = &voxels[index];
            if !voxel.is_empty() {
                return Some((Chunk::<WIDTH, HEIGHT, DEPTH>::coords_of(index), voxel));
            }
        }

        None
    }
}

impl<const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> Chunk<WIDTH, HEIGHT, DEPTH> {
    /// Iterates every non-empty voxel with its chunk-relative position.
    pub fn solid_voxels(&self) -> ChunkVoxelIterator<'_, WIDTH, HEIGHT, DEPTH> {
        ChunkVoxelIterator::new(self)
    }

    /// Iterates every voxel currently flagged visible with its position.
    pub fn visible_voxels(&self) -> impl Iterator<Item = (Point3<usize>, &Voxel)> {
        self.solid_voxels().filter(|(_, voxel)| voxel.visible)
    }
}
