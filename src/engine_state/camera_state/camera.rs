//! # Camera Implementation
//!
//! The camera is owned and moved by the host application; the engine only
//! reads its position and looking direction to pick the active chunk and to
//! cast block-picking rays.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

use crate::engine_state::voxels::geometry::Ray;

/// Safe limit for pitch to prevent gimbal lock
const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians
/// - `pitch`: Vertical rotation (around X axis) in radians, kept within ±π/2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    yaw: Rad<f32>,
    /// Vertical rotation (around X axis) in radians
    pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw; zero looks along positive X
    /// * `pitch` - Initial pitch; positive looks up
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: Rad(0.0),
            pitch: Rad(0.0),
        };
        camera.set_orientation(yaw, pitch);
        camera
    }

    /// Replaces yaw and pitch, clamping pitch short of straight up or down.
    pub fn set_orientation<Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(&mut self, yaw: Y, pitch: P) {
        self.yaw = yaw.into();
        self.pitch = Rad(pitch.into().0.clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2));
    }

    /// Horizontal rotation in radians.
    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    /// Vertical rotation in radians.
    pub fn pitch(&self) -> Rad<f32> {
        self.pitch
    }

    /// Gets the camera's normalized forward direction vector.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// The ray from the camera position along its forward direction.
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}
