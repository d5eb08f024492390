//! # Voxel Core
//!
//! This module contains the voxel world itself: storage, terrain generation,
//! visibility culling, ray picking and block editing.
//!
//! ## Architecture
//!
//! * **Block**: Voxel types, the per-voxel record and the faces of a voxel cube
//! * **Geometry**: Rays and axis-aligned boxes used for picking
//! * **Heightmap**: Deterministic terrain height sources
//! * **Palette**: Maps voxel types to drawables
//! * **Chunk**: Fixed-size 3D arrays of voxels with their own generation,
//!   visibility and picking
//! * **World**: A fixed grid of chunks with active-chunk and visible-set tracking
//!
//! ## Data Flow
//!
//! 1. The world picks the active chunk from the camera position
//! 2. The active chunk and its grid neighbors form the visible set
//! 3. Each visible chunk emits one draw call per visible voxel
//! 4. Block edits go camera → ray → hit → remove/place → visibility update
//!
//! ## Threading
//!
//! Everything here runs synchronously on the calling thread. Nothing is shared
//! across threads and no locking is done.

pub mod block;
pub mod chunk;
pub mod geometry;
pub mod heightmap;
pub mod palette;
pub mod world;
