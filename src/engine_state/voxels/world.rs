//! # World Module
//!
//! This module provides the `World` struct which owns a fixed square grid of
//! chunks and decides which of them are drawn.
//!
//! ## Layout
//!
//! The world is an `N x N` grid of cubic chunks with edge length `CHUNK_SIZE`.
//! Grid cell `(col, row)` lives at flat index `row * N + col` and covers world
//! x in `col * CHUNK_SIZE..(col + 1) * CHUNK_SIZE` and world z in
//! `row * CHUNK_SIZE..(row + 1) * CHUNK_SIZE`. Every chunk is generated when the
//! world is built and the grid never grows or shrinks afterwards.
//!
//! ## Visible Set
//!
//! The chunk under the camera is the *active* chunk. The visible set is the
//! active chunk plus its existing grid neighbors (up to 8). This is a radius-1
//! adjacency approximation, not frustum culling: camera orientation plays no
//! part. Both are stored as indices into the chunk grid.

use std::time::Instant;

use cgmath::{Point3, Vector2};
use log::{debug, info};

use super::block::block_type::VoxelType;
use super::chunk::{ChunkHitRecord, CubicChunk};
use super::geometry::{Ray, Time};
use super::heightmap::Heightmap;
use super::palette::VoxelPalette;
use crate::engine_state::rendering::UniformSink;

/// Grid offsets of the eight neighbors of a cell, row by row.
const NEIGHBOR_DIRECTIONS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A voxel struck by a world-level pick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldHitRecord {
    /// Flat grid index of the chunk containing the voxel
    pub chunk_index: usize,
    /// The hit as reported by that chunk
    pub record: ChunkHitRecord,
}

/// Represents a voxel world composed of a square grid of chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::heightmap::FlatHeightmap;
/// use voxel_sandbox::engine_state::voxels::palette::VoxelPalette;
/// use voxel_sandbox::engine_state::voxels::world::World;
///
/// let mut world = World::<16>::new(3, Box::new(FlatHeightmap::new(0.5)), VoxelPalette::new());
/// world.update_visible_set(Point3::new(24.0, 20.0, 24.0));
///
/// assert_eq!(world.active_chunk_index(), 4);
/// assert_eq!(world.visible_chunk_indices().len(), 9);
/// ```
pub struct World<const CHUNK_SIZE: usize> {
    /// Number of chunks along each side of the grid
    grid_size: usize,
    /// All chunks in row-major grid order
    chunks: Box<[CubicChunk<CHUNK_SIZE>]>,
    /// Drawables for each voxel type
    palette: VoxelPalette,
    /// Terrain source the chunks were generated from
    heightmap: Box<dyn Heightmap>,
    /// Index of the chunk nearest the last queried camera position
    active_chunk: usize,
    /// Indices of the chunks eligible for drawing
    visible_chunks: Vec<usize>,
}

impl<const CHUNK_SIZE: usize> World<CHUNK_SIZE> {
    /// Creates a new world and generates the terrain of every chunk.
    ///
    /// Construction blocks until all `grid_size²` chunks are generated and
    /// their visibility computed. The active chunk starts at grid cell (0, 0)
    /// and the visible set starts empty.
    ///
    /// # Arguments
    /// * `grid_size` - Number of chunks along each side; values below 1 are raised to 1
    /// * `heightmap` - Terrain source
    /// * `palette` - Drawables for each voxel type
    pub fn new(grid_size: usize, heightmap: Box<dyn Heightmap>, palette: VoxelPalette) -> Self {
        let grid_size = grid_size.max(1);
        let start = Instant::now();

        let chunks: Box<[CubicChunk<CHUNK_SIZE>]> = (0..grid_size * grid_size)
            .map(|index| {
                let (col, row) = (index % grid_size, index / grid_size);
                let mut chunk = CubicChunk::<CHUNK_SIZE>::empty(Vector2::new(
                    (col * CHUNK_SIZE) as f32,
                    (row * CHUNK_SIZE) as f32,
                ));
                chunk.generate(heightmap.as_ref());
                chunk
            })
            .collect();

        info!(
            "Generated {}x{} world of {}³ chunks in {:?}",
            grid_size,
            grid_size,
            CHUNK_SIZE,
            start.elapsed()
        );

        World {
            grid_size,
            chunks,
            palette,
            heightmap,
            active_chunk: 0,
            visible_chunks: Vec::new(),
        }
    }

    /// Number of chunks along each side of the grid.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// All chunks in row-major grid order.
    pub fn chunks(&self) -> &[CubicChunk<CHUNK_SIZE>] {
        &self.chunks
    }

    /// The chunk at flat grid index `index`.
    pub fn chunk(&self, index: usize) -> Option<&CubicChunk<CHUNK_SIZE>> {
        self.chunks.get(index)
    }

    /// The palette used for drawing.
    pub fn palette(&self) -> &VoxelPalette {
        &self.palette
    }

    /// The terrain source the world was generated from.
    pub fn heightmap(&self) -> &dyn Heightmap {
        self.heightmap.as_ref()
    }

    /// Returns the `(col, row)` grid cell containing `position`.
    ///
    /// # Returns
    /// `None` if the position lies outside the grid on x or z.
    pub fn grid_cell_of(&self, position: Point3<f32>) -> Option<(usize, usize)> {
        let col = (position.x / CHUNK_SIZE as f32).floor();
        let row = (position.z / CHUNK_SIZE as f32).floor();
        let extent = self.grid_size as f32;

        if !(0.0..extent).contains(&col) || !(0.0..extent).contains(&row) {
            return None;
        }
        Some((col as usize, row as usize))
    }

    /// Returns the flat index of the chunk containing `position`, if any.
    pub fn chunk_index_at(&self, position: Point3<f32>) -> Option<usize> {
        self.grid_cell_of(position)
            .map(|(col, row)| row * self.grid_size + col)
    }

    /// Height of the highest solid voxel in the column at integer world `(x, z)`.
    ///
    /// # Returns
    /// `None` if the column lies outside the world or holds no solid voxel.
    pub fn column_top(&self, x: i64, z: i64) -> Option<usize> {
        let (index, local) = self.locate(Point3::new(x, 0, z))?;
        let chunk = &self.chunks[index];
        (0..CHUNK_SIZE).rev().find(|&y| {
            chunk
                .voxel_at(local.x, y, local.z)
                .is_some_and(|voxel| !voxel.is_empty())
        })
    }

    /// Makes the chunk under `camera_position` the active chunk.
    ///
    /// Positions outside the grid are clamped onto the nearest edge cell, so the
    /// active chunk is always a valid grid index.
    ///
    /// # Returns
    /// The flat index of the new active chunk.
    pub fn select_active_chunk(&mut self, camera_position: Point3<f32>) -> usize {
        let last = self.grid_size as i64 - 1;
        // NaN casts to 0
        let col = (camera_position.x / CHUNK_SIZE as f32).floor() as i64;
        let row = (camera_position.z / CHUNK_SIZE as f32).floor() as i64;
        let (clamped_col, clamped_row) = (col.clamp(0, last), row.clamp(0, last));

        if (clamped_col, clamped_row) != (col, row) {
            debug!(
                "Camera at {:?} is outside the world, clamped to cell ({}, {})",
                camera_position, clamped_col, clamped_row
            );
        }

        self.active_chunk = clamped_row as usize * self.grid_size + clamped_col as usize;
        self.active_chunk
    }

    /// Flat index of the active chunk.
    pub fn active_chunk_index(&self) -> usize {
        self.active_chunk
    }

    /// The active chunk.
    pub fn active_chunk(&self) -> &CubicChunk<CHUNK_SIZE> {
        &self.chunks[self.active_chunk]
    }

    /// Computes the grid neighbors of the chunk anchored at `origin`.
    ///
    /// # Returns
    /// Flat indices of the existing neighbors among the eight surrounding
    /// cells: 3 at a grid corner, 5 along a grid edge, 8 in the interior.
    pub fn compute_neighbors(&self, origin: Vector2<f32>) -> Vec<usize> {
        let col = (origin.x / CHUNK_SIZE as f32).floor() as i64;
        let row = (origin.y / CHUNK_SIZE as f32).floor() as i64;
        let size = self.grid_size as i64;

        NEIGHBOR_DIRECTIONS
            .iter()
            .map(|(dx, dy)| (col + dx, row + dy))
            .filter(|&(nx, ny)| (0..size).contains(&nx) && (0..size).contains(&ny))
            .map(|(nx, ny)| (ny * size + nx) as usize)
            .collect()
    }

    /// Rebuilds the visible set around `camera_position`.
    ///
    /// Re-selects the active chunk, then sets the visible set to its neighbors
    /// followed by the active chunk itself.
    pub fn update_visible_set(&mut self, camera_position: Point3<f32>) {
        let active = self.select_active_chunk(camera_position);
        let mut visible = self.compute_neighbors(self.chunks[active].origin());
        visible.push(active);
        self.visible_chunks = visible;
    }

    /// Flat indices of the chunks in the visible set.
    pub fn visible_chunk_indices(&self) -> &[usize] {
        &self.visible_chunks
    }

    /// The chunks in the visible set.
    pub fn visible_chunks(&self) -> impl Iterator<Item = &CubicChunk<CHUNK_SIZE>> {
        self.visible_chunks.iter().map(|&index| &self.chunks[index])
    }

    /// Finds the voxel hit by `ray` among the visible chunks.
    ///
    /// Falls back to the active chunk alone while the visible set has not been
    /// built. The closest hit by Euclidean distance from the ray origin wins.
    pub fn hit(&self, ray: &Ray, t_min: Time, t_max: Time) -> Option<WorldHitRecord> {
        let candidates: &[usize] = if self.visible_chunks.is_empty() {
            std::slice::from_ref(&self.active_chunk)
        } else {
            &self.visible_chunks
        };

        candidates
            .iter()
            .filter_map(|&chunk_index| {
                self.chunks[chunk_index]
                    .hit(ray, t_min, t_max)
                    .map(|record| WorldHitRecord {
                        chunk_index,
                        record,
                    })
            })
            .min_by(|a, b| a.record.distance.total_cmp(&b.record.distance))
    }

    /// Resolves integer world coordinates to a chunk index and local coordinates.
    fn locate(&self, position: Point3<i64>) -> Option<(usize, Point3<usize>)> {
        let size = CHUNK_SIZE as i64;
        if size == 0 || position.y < 0 {
            return None;
        }

        let col = position.x.div_euclid(size);
        let row = position.z.div_euclid(size);
        let grid = self.grid_size as i64;
        if !(0..grid).contains(&col) || !(0..grid).contains(&row) {
            return None;
        }

        let local = Point3::new(
            position.x.rem_euclid(size) as usize,
            position.y as usize,
            position.z.rem_euclid(size) as usize,
        );
        Some(((row * grid + col) as usize, local))
    }

    /// Removes the block at integer world coordinates `position`.
    ///
    /// # Returns
    /// `false` if the position lies outside the world or holds no block.
    pub fn remove_block_at(&mut self, position: Point3<i64>) -> bool {
        match self.locate(position) {
            Some((index, local)) => self.chunks[index].remove_block(local.x, local.y, local.z),
            None => false,
        }
    }

    /// Places a block of `voxel_type` at integer world coordinates `position`.
    ///
    /// # Returns
    /// `false` if the position lies outside the world, is already occupied, or
    /// `voxel_type` is `EMPTY`.
    pub fn place_block_at(&mut self, position: Point3<i64>, voxel_type: VoxelType) -> bool {
        match self.locate(position) {
            Some((index, local)) => {
                self.chunks[index].place_block(local.x, local.y, local.z, voxel_type)
            }
            None => false,
        }
    }

    /// Draws every visible voxel of every chunk in the visible set.
    ///
    /// Order follows the visible set, then storage order within each chunk.
    ///
    /// # Returns
    /// The number of draw calls issued.
    pub fn draw(&self, sink: &mut dyn UniformSink) -> usize {
        self.visible_chunks()
            .map(|chunk| chunk.draw(&self.palette, sink))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::engine_state::voxels::heightmap::FlatHeightmap;

    fn flat_world(grid_size: usize) -> World<16> {
        World::<16>::new(grid_size, Box::new(FlatHeightmap::new(0.5)), VoxelPalette::new())
    }

    fn origin_of(world: &World<16>, col: usize, row: usize) -> Vector2<f32> {
        world.chunk(row * world.grid_size() + col).unwrap().origin()
    }

    #[test]
    fn chunks_are_laid_out_row_major() {
        let world = flat_world(3);
        assert_eq!(world.chunks().len(), 9);
        assert_eq!(origin_of(&world, 0, 0), Vector2::new(0.0, 0.0));
        assert_eq!(origin_of(&world, 2, 0), Vector2::new(32.0, 0.0));
        assert_eq!(origin_of(&world, 1, 2), Vector2::new(16.0, 32.0));
    }

    #[test]
    fn keeps_its_heightmap() {
        let world = flat_world(1);
        assert_eq!(world.heightmap().at(Vector3::new(3.0, 7.0, 0.0)), 0.5);
    }

    #[test]
    fn neighbor_counts_on_five_by_five_grid() {
        let world = flat_world(5);
        assert_eq!(world.compute_neighbors(origin_of(&world, 0, 0)).len(), 3);
        assert_eq!(world.compute_neighbors(origin_of(&world, 2, 0)).len(), 5);
        assert_eq!(world.compute_neighbors(origin_of(&world, 2, 2)).len(), 8);
        assert_eq!(world.compute_neighbors(origin_of(&world, 4, 4)).len(), 3);
        assert_eq!(world.compute_neighbors(origin_of(&world, 0, 3)).len(), 5);
    }

    #[test]
    fn corner_neighbors_are_the_adjacent_cells() {
        let world = flat_world(5);
        let mut neighbors = world.compute_neighbors(origin_of(&world, 0, 0));
        neighbors.sort();
        assert_eq!(neighbors, vec![1, 5, 6]);
    }

    #[test]
    fn single_chunk_world_has_no_neighbors() {
        let mut world = flat_world(1);
        world.update_visible_set(Point3::new(8.0, 20.0, 8.0));
        assert_eq!(world.visible_chunk_indices(), &[0]);
    }

    #[test]
    fn active_chunk_follows_camera() {
        let mut world = flat_world(5);
        assert_eq!(world.select_active_chunk(Point3::new(40.0, 10.0, 20.0)), 7);
        assert_eq!(world.active_chunk().origin(), Vector2::new(32.0, 16.0));
    }

    #[test]
    fn out_of_grid_camera_is_clamped() {
        let mut world = flat_world(5);
        assert_eq!(world.select_active_chunk(Point3::new(-30.0, 0.0, -1.0)), 0);
        assert_eq!(world.select_active_chunk(Point3::new(500.0, 0.0, 500.0)), 24);
        assert_eq!(world.select_active_chunk(Point3::new(500.0, 0.0, 3.0)), 4);
        assert_eq!(world.select_active_chunk(Point3::new(f32::NAN, 0.0, 17.0)), 5);
        assert_eq!(world.chunk_index_at(Point3::new(500.0, 0.0, 3.0)), None);
    }

    #[test]
    fn visible_set_is_active_plus_neighbors() {
        let mut world = flat_world(5);
        world.update_visible_set(Point3::new(40.0, 10.0, 40.0));

        let mut visible = world.visible_chunk_indices().to_vec();
        assert_eq!(*visible.last().unwrap(), 12);
        visible.sort();
        assert_eq!(visible, vec![6, 7, 8, 11, 12, 13, 16, 17, 18]);

        world.update_visible_set(Point3::new(1.0, 10.0, 1.0));
        assert_eq!(world.visible_chunks().count(), 4);
    }

    #[test]
    fn hit_prefers_closest_chunk() {
        let mut world = flat_world(3);
        world.update_visible_set(Point3::new(24.0, 20.0, 24.0));

        // Looking along +x just above the grass: the first pillar wins.
        assert!(world.place_block_at(Point3::new(20, 9, 24), VoxelType::MARKER));
        assert!(world.place_block_at(Point3::new(40, 9, 24), VoxelType::MARKER));

        let ray = Ray::new(Point3::new(10.0, 9.5, 24.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = world.hit(&ray, 0.0, 100.0).unwrap();
        assert_eq!(hit.chunk_index, 4);
        assert_eq!(hit.record.world_voxel, Point3::new(20, 9, 24));
    }

    #[test]
    fn column_top_tracks_edits() {
        let mut world = flat_world(2);
        assert_eq!(world.column_top(20, 5), Some(8));
        assert!(world.place_block_at(Point3::new(20, 9, 5), VoxelType::STONE));
        assert_eq!(world.column_top(20, 5), Some(9));
        assert_eq!(world.column_top(-3, 5), None);
    }

    #[test]
    fn world_edits_resolve_chunk_from_coordinates() {
        let mut world = flat_world(2);
        assert!(world.remove_block_at(Point3::new(17, 8, 3)));
        assert!(world.chunk(1).unwrap().voxel_at(1, 8, 3).unwrap().is_empty());

        assert!(!world.remove_block_at(Point3::new(-1, 8, 3)));
        assert!(!world.remove_block_at(Point3::new(32, 8, 3)));
        assert!(!world.place_block_at(Point3::new(3, -1, 3), VoxelType::STONE));
        assert!(!world.place_block_at(Point3::new(3, 16, 3), VoxelType::STONE));
        assert!(world.place_block_at(Point3::new(3, 9, 20), VoxelType::STONE));
        assert_eq!(
            world.chunk(2).unwrap().voxel_at(3, 9, 4).unwrap().voxel_type,
            VoxelType::STONE
        );
    }
}
