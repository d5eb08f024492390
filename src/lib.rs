#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A small voxel world built from a square grid of fixed-size chunks.
//!
//! Terrain is generated from a heightmap, each voxel knows whether it is
//! exposed to air, and the camera picks blocks with a ray to dig them out or
//! build on them. Drawing goes through a pair of traits, so the engine works
//! the same against a real renderer or a headless counter.
//!
//! ## Key Modules
//!
//! * `config` - JSON world configuration
//! * `engine_state` - The world, camera, player input and drawing
//! * `session` - A headless frame loop for exercising the engine
//!
//! ## Usage
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     voxel_sandbox::run()
//! }
//! ```
//!
//! The optional first argument is the path of a JSON configuration file; see
//! [`config`] for its layout. Log output is controlled through `RUST_LOG`.

use std::path::PathBuf;

use log::info;

use config::WorldConfig;

pub mod config;
pub mod engine_state;
pub mod session;

/// Initializes logging, loads the configuration and runs a headless session.
///
/// # Errors
/// Fails if the configuration file named on the command line cannot be read
/// or is invalid.
pub fn run() -> anyhow::Result<()> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            WorldConfig::load_from_path(&path)?
        }
        None => {
            info!("No configuration file given, using defaults");
            WorldConfig::default()
        }
    };

    let summary = session::run_session(&config);
    info!("{:?}", summary);

    Ok(())
}
