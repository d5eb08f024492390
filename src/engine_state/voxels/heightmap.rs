//! # Heightmap Module
//!
//! Terrain height sources consumed by chunk generation.
//!
//! A heightmap is a pure, deterministic function from a position to a sample
//! in `[0, 1]`. Chunk generation scales the sample into the chunk's height
//! range; it also guards against samples that stray outside `[0, 1]`, since
//! implementations are not trusted to honor the range.

use cgmath::Vector3;
use noise::{NoiseFn, Perlin};

/// Default scaling factor applied to world coordinates before sampling noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.1;

/// A deterministic terrain height source.
pub trait Heightmap {
    /// Samples the height at `position`.
    ///
    /// Chunk generation passes `(world_x, world_z, 0)`.
    ///
    /// # Returns
    /// A value that should lie in `[0, 1]`.
    fn at(&self, position: Vector3<f32>) -> f32;
}

/// Natural-looking rolling terrain driven by Perlin noise.
pub struct PerlinHeightmap {
    perlin: Perlin,
    scale_factor: f64,
}

impl PerlinHeightmap {
    /// Creates a new Perlin heightmap.
    ///
    /// # Arguments
    /// * `seed` - The noise seed; equal seeds produce equal terrain
    /// * `scale_factor` - Scaling applied to positions before sampling
    pub fn new(seed: u32, scale_factor: f64) -> Self {
        PerlinHeightmap {
            perlin: Perlin::new(seed),
            scale_factor,
        }
    }
}

impl Heightmap for PerlinHeightmap {
    fn at(&self, position: Vector3<f32>) -> f32 {
        let sample = self.perlin.get([
            position.x as f64 * self.scale_factor,
            position.y as f64 * self.scale_factor,
            position.z as f64 * self.scale_factor,
        ]);
        // Perlin output is centered on zero in [-1, 1]
        ((sample + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

/// A heightmap returning the same level everywhere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlatHeightmap {
    level: f32,
}

impl FlatHeightmap {
    /// Creates a flat heightmap at `level`.
    pub fn new(level: f32) -> Self {
        FlatHeightmap { level }
    }
}

impl Heightmap for FlatHeightmap {
    fn at(&self, _position: Vector3<f32>) -> f32 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perlin_is_deterministic_and_in_range() {
        let a = PerlinHeightmap::new(7, PERLIN_SCALE_FACTOR);
        let b = PerlinHeightmap::new(7, PERLIN_SCALE_FACTOR);

        for i in 0..64 {
            let position = Vector3::new(i as f32 * 1.7, i as f32 * 0.3, 0.0);
            let sample = a.at(position);
            assert_eq!(sample, b.at(position));
            assert!((0.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn flat_returns_level() {
        let flat = FlatHeightmap::new(0.25);
        assert_eq!(flat.at(Vector3::new(100.0, -3.0, 0.0)), 0.25);
    }
}
