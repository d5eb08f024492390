//! # Chunk Generation Module
//!
//! Fills a chunk with heightmap-driven terrain.
//!
//! Each `(x, z)` column samples the heightmap at its world position and is
//! filled bottom-up: stone below the column height, grass at it, empty above.
//! A column may rise at most one voxel above the columns already generated at
//! `x - 1` and `z - 1`, which keeps single-column cliffs out of the terrain.

use cgmath::Vector3;
use log::trace;

use crate::engine_state::voxels::block::{block_type::VoxelType, Voxel};
use crate::engine_state::voxels::heightmap::Heightmap;

use super::Chunk;

impl<const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> Chunk<WIDTH, HEIGHT, DEPTH> {
    /// Generates terrain for the whole chunk and runs a full visibility pass.
    ///
    /// The heightmap is sampled at `(origin.x + x, origin.z + z, 0)` so that
    /// neighboring chunks continue each other's terrain.
    ///
    /// # Arguments
    /// * `heightmap` - The deterministic height source
    pub fn generate(&mut self, heightmap: &dyn Heightmap) {
        if HEIGHT == 0 {
            return;
        }

        let mut column_heights = vec![0usize; WIDTH * DEPTH];

        for x in 0..WIDTH {
            for z in 0..DEPTH {
                let sample = heightmap.at(Vector3::new(
                    self.origin.x + x as f32,
                    self.origin.y + z as f32,
                    0.0,
                ));
                let mut height = Self::sample_to_height(sample);

                if x > 0 {
                    height = height.min(column_heights[(x - 1) + WIDTH * z] + 1);
                }
                if z > 0 {
                    height = height.min(column_heights[x + WIDTH * (z - 1)] + 1);
                }
                column_heights[x + WIDTH * z] = height;

                self.fill_column(x, z, height);
            }
        }

        trace!(
            "Generated chunk at {:?}, tallest column {}",
            self.origin,
            column_heights.iter().max().copied().unwrap_or(0)
        );

        self.update_visibility();
    }

    /// Scales a heightmap sample into `[0, HEIGHT)`.
    ///
    /// Samples outside `[0, 1]` are clamped; non-finite samples map to zero.
    pub fn sample_to_height(sample: f32) -> usize {
        if !sample.is_finite() {
            return 0;
        }
        let scaled = (sample.clamp(0.0, 1.0) * HEIGHT as f32) as usize;
        scaled.min(HEIGHT.saturating_sub(1))
    }

    /// Fills a single column: stone below `height`, grass at it, empty above.
    fn fill_column(&mut self, x: usize, z: usize, height: usize) {
        for y in 0..HEIGHT {
            let voxel_type = match y.cmp(&height) {
                std::cmp::Ordering::Less => VoxelType::STONE,
                std::cmp::Ordering::Equal => VoxelType::GRASS,
                std::cmp::Ordering::Greater => VoxelType::EMPTY,
            };
            self.voxels[Self::index(x, y, z)] = Voxel::new(voxel_type);
        }
    }
}
