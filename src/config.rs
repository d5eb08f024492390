//! # World Configuration
//!
//! Runtime settings for building a world and running a session, loaded from a
//! JSON file. Every field has a default, so an empty object (or no file at
//! all) yields a playable world.
//!
//! ```json
//! {
//!     "grid_size": 5,
//!     "terrain": { "kind": "perlin", "seed": 42, "scale": 0.1 },
//!     "camera": { "position": [8.0, 20.0, 8.0], "yaw_degrees": 45.0, "pitch_degrees": -60.0 },
//!     "interaction": { "reach": 6.0, "place_type": "stone" },
//!     "session": { "frames": 120 }
//! }
//! ```
//!
//! The chunk edge length is not configurable; it is the compile-time
//! [`CHUNK_DIMENSION`](crate::engine_state::voxels::chunk::CHUNK_DIMENSION).

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::block_type::VoxelType;
use crate::engine_state::voxels::heightmap::{
    FlatHeightmap, Heightmap, PerlinHeightmap, PERLIN_SCALE_FACTOR,
};

/// Largest accepted `grid_size`. Every chunk is generated up front, so the
/// world holds `grid_size²` chunks in memory at once.
pub const MAX_GRID_SIZE: usize = 64;

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of chunks along each side of the square world grid
    pub grid_size: usize,
    /// Terrain source
    pub terrain: TerrainConfig,
    /// Starting camera placement
    pub camera: CameraConfig,
    /// Block picking settings
    pub interaction: InteractionConfig,
    /// Headless session settings
    pub session: SessionConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            terrain: TerrainConfig::default(),
            camera: CameraConfig::default(),
            interaction: InteractionConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Which heightmap generates the terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TerrainConfig {
    /// Rolling Perlin-noise hills.
    Perlin {
        /// Noise seed; `None` picks a random seed at startup
        #[serde(default)]
        seed: Option<u32>,
        /// Scaling applied to world positions before sampling
        #[serde(default = "default_perlin_scale")]
        scale: f64,
    },
    /// The same height everywhere.
    Flat {
        /// Height sample in `[0, 1]`
        #[serde(default = "default_flat_level")]
        level: f32,
    },
}

fn default_perlin_scale() -> f64 {
    PERLIN_SCALE_FACTOR
}

fn default_flat_level() -> f32 {
    0.5
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig::Perlin {
            seed: None,
            scale: PERLIN_SCALE_FACTOR,
        }
    }
}

/// Starting camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space position
    pub position: [f32; 3],
    /// Horizontal rotation in degrees; zero looks along positive X
    pub yaw_degrees: f32,
    /// Vertical rotation in degrees; negative looks down
    pub pitch_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [8.0, 20.0, 8.0],
            yaw_degrees: 45.0,
            pitch_degrees: -60.0,
        }
    }
}

/// Block picking settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// How far along the view ray blocks can be picked
    pub reach: f32,
    /// The type placed by the place action until another slot is selected
    pub place_type: VoxelType,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            reach: 6.0,
            place_type: VoxelType::STONE,
        }
    }
}

/// Headless session settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of frames to simulate
    pub frames: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { frames: 120 }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: WorldConfig =
            serde_json::from_str(json).context("Failed to parse world configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration file at `path`.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.grid_size == 0 {
            bail!("grid_size must be at least 1");
        }
        if self.grid_size > MAX_GRID_SIZE {
            bail!(
                "grid_size must be at most {}, got {}",
                MAX_GRID_SIZE,
                self.grid_size
            );
        }

        match self.terrain {
            TerrainConfig::Perlin { scale, .. } if !(scale.is_finite() && scale > 0.0) => {
                bail!("terrain scale must be a positive number, got {}", scale);
            }
            TerrainConfig::Flat { level } if !level.is_finite() => {
                bail!("terrain level must be finite, got {}", level);
            }
            _ => {}
        }

        if !self.camera.position.iter().all(|c| c.is_finite())
            || !self.camera.yaw_degrees.is_finite()
            || !self.camera.pitch_degrees.is_finite()
        {
            bail!("camera placement must be finite");
        }

        if !(self.interaction.reach.is_finite() && self.interaction.reach > 0.0) {
            bail!(
                "interaction reach must be a positive number, got {}",
                self.interaction.reach
            );
        }

        if !self.interaction.place_type.is_solid() {
            bail!("interaction place_type cannot be empty");
        }

        Ok(())
    }

    /// Builds the heightmap described by `terrain`.
    ///
    /// A Perlin terrain without a seed gets a random one, which is logged so
    /// the world can be reproduced.
    pub fn build_heightmap(&self) -> Box<dyn Heightmap> {
        match self.terrain {
            TerrainConfig::Perlin { seed, scale } => {
                let seed = seed.unwrap_or_else(|| fastrand::u32(..));
                info!("Perlin terrain with seed {} and scale {}", seed, scale);
                Box::new(PerlinHeightmap::new(seed, scale))
            }
            TerrainConfig::Flat { level } => {
                info!("Flat terrain at level {}", level);
                Box::new(FlatHeightmap::new(level))
            }
        }
    }
}
