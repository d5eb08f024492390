//! # Camera State
//!
//! The engine's view of the camera: a position plus a looking direction.
//! Input handling and projection live with the host application.

pub mod camera;

pub use camera::Camera;
