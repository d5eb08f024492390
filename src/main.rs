//! # Voxel Sandbox Entry Point
//!
//! Calls into the library's `run()` function, which builds a world and
//! drives a headless session over it.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() -> anyhow::Result<()> {
    voxel_sandbox::run()
}
