//! # Chunk Drawing Module
//!
//! Emits one model transform and one draw call per visible voxel.

use cgmath::Vector3;
use log::debug;

use crate::engine_state::rendering::{MatrixUniform, UniformSink, MODEL_UNIFORM_NAME};
use crate::engine_state::voxels::palette::VoxelPalette;

use super::Chunk;

impl<const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> Chunk<WIDTH, HEIGHT, DEPTH> {
    /// Draws every visible voxel of the chunk.
    ///
    /// For each visible voxel, in storage order, a translation to the voxel's
    /// world position is bound under [`MODEL_UNIFORM_NAME`] and the palette's
    /// drawable for the voxel type is invoked. Voxels whose type has no palette
    /// entry are skipped.
    ///
    /// # Returns
    /// The number of draw calls issued.
    pub fn draw(&self, palette: &VoxelPalette, sink: &mut dyn UniformSink) -> usize {
        let mut draw_calls = 0;

        for (position, voxel) in self.visible_voxels() {
            let Some(drawable) = palette.look_up(voxel.voxel_type) else {
                debug!("No drawable registered for {:?}", voxel.voxel_type);
                continue;
            };

            let translation = Vector3::new(
                self.origin.x + position.x as f32,
                position.y as f32,
                self.origin.y + position.z as f32,
            );
            sink.set_uniform(MODEL_UNIFORM_NAME, &MatrixUniform::from_translation(translation));
            drawable.draw();
            draw_calls += 1;
        }

        draw_calls
    }
}
