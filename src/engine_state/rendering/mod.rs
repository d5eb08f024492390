//! Rendering seam for the voxel engine.
//!
//! The engine does not own a graphics API. It produces one model transform
//! per visible voxel and hands it to a [`UniformSink`], then asks the
//! [`Drawable`] registered for the voxel's type to issue its draw call. Window
//! handling, shaders and textures live behind these two traits.

mod uniform;

pub use uniform::MatrixUniform;

/// The name under which per-voxel model transforms are emitted.
pub const MODEL_UNIFORM_NAME: &str = "model";
/// The name under which the camera view matrix is emitted once per frame.
pub const VIEW_UNIFORM_NAME: &str = "view";

/// Something that can issue the draw calls for one voxel mesh.
pub trait Drawable {
    /// Issues the draw call(s) using whatever uniforms are currently bound.
    fn draw(&self);
}

/// Accepts named 4x4 matrix uniforms ahead of each draw.
pub trait UniformSink {
    /// Binds `uniform` under `name` for the draw calls that follow.
    fn set_uniform(&mut self, name: &str, uniform: &MatrixUniform);
}
