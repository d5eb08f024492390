//! GPU-layout matrix uniform.

use cgmath::{Matrix4, SquareMatrix, Vector3};

/// A 4x4 column-major matrix ready to be copied into a uniform buffer.
///
/// cgmath types can't be handed to bytemuck directly, so the matrix is kept
/// as a plain `[[f32; 4]; 4]` array.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatrixUniform {
    matrix: [[f32; 4]; 4],
}

impl MatrixUniform {
    /// Creates a uniform holding the identity matrix.
    pub fn new() -> Self {
        Self {
            matrix: Matrix4::identity().into(),
        }
    }

    /// Creates a uniform translating by `offset`.
    pub fn from_translation(offset: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::from_translation(offset).into(),
        }
    }

    /// Creates a uniform holding `matrix`.
    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        Self {
            matrix: matrix.into(),
        }
    }

    /// Returns the matrix as a cgmath type.
    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix.into()
    }

    /// Returns the translation part of the matrix.
    pub fn translation(&self) -> Vector3<f32> {
        let column = self.matrix[3];
        Vector3::new(column[0], column[1], column[2])
    }

    /// Views the uniform as raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for MatrixUniform {
    fn default() -> Self {
        Self::new()
    }
}
