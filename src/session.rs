//! # Headless Session
//!
//! Drives an [`EngineState`] for a fixed number of frames without a window.
//! The camera sweeps diagonally across the grid while turning, hovering a few
//! voxels above the terrain. Halfway through, it looks straight down and
//! removes the block below it, then places the selected type on the next
//! frame. Draws go to counting stand-ins, so the session reports how much
//! would have been drawn.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use cgmath::{Deg, Point3};
use log::{info, trace};

use crate::config::WorldConfig;
use crate::engine_state::camera_state::Camera;
use crate::engine_state::rendering::{Drawable, MatrixUniform, UniformSink, MODEL_UNIFORM_NAME};
use crate::engine_state::voxels::block::block_type::VoxelType;
use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;
use crate::engine_state::voxels::palette::VoxelPalette;
use crate::engine_state::voxels::world::World;
use crate::engine_state::{EngineState, PlayerAction};

/// Height the camera keeps above the top block of the column below it.
const HOVER_HEIGHT: f32 = 3.0;

/// A drawable that only counts how often it is drawn.
#[derive(Clone, Debug, Default)]
pub struct CountingDrawable {
    draws: Rc<Cell<usize>>,
}

impl CountingDrawable {
    /// Creates a drawable incrementing `draws` on every draw.
    pub fn new(draws: Rc<Cell<usize>>) -> Self {
        Self { draws }
    }
}

impl Drawable for CountingDrawable {
    fn draw(&self) {
        self.draws.set(self.draws.get() + 1);
    }
}

/// A uniform sink that counts model uploads and keeps the last view matrix.
#[derive(Debug, Default)]
pub struct CountingSink {
    /// Number of model uniforms uploaded
    pub model_uploads: usize,
    /// The most recent view uniform
    pub last_view: Option<MatrixUniform>,
}

impl UniformSink for CountingSink {
    fn set_uniform(&mut self, name: &str, uniform: &MatrixUniform) {
        if name == MODEL_UNIFORM_NAME {
            self.model_uploads += 1;
        } else {
            self.last_view = Some(*uniform);
        }
    }
}

/// What a session did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames simulated
    pub frames: u32,
    /// Drawable invocations across all frames
    pub draw_calls: usize,
    /// Model uniforms uploaded across all frames
    pub model_uploads: usize,
    /// Blocks removed by the player
    pub blocks_removed: usize,
    /// Blocks placed by the player
    pub blocks_placed: usize,
    /// Active chunk after the last frame
    pub final_active_chunk: usize,
}

/// Builds the engine described by `config`, drawing every solid type with
/// `drawable`.
pub fn build_engine(
    config: &WorldConfig,
    drawable: &CountingDrawable,
) -> EngineState<CHUNK_DIMENSION> {
    let palette = [VoxelType::GRASS, VoxelType::STONE, VoxelType::MARKER]
        .into_iter()
        .fold(VoxelPalette::new(), |palette, voxel_type| {
            palette.with(voxel_type, Box::new(drawable.clone()))
        });

    let world = World::<CHUNK_DIMENSION>::new(config.grid_size, config.build_heightmap(), palette);
    let camera = Camera::new(
        Point3::from(config.camera.position),
        Deg(config.camera.yaw_degrees),
        Deg(config.camera.pitch_degrees),
    );

    EngineState::new(
        world,
        camera,
        config.interaction.reach,
        config.interaction.place_type,
    )
}

/// Runs a headless session as described by `config`.
pub fn run_session(config: &WorldConfig) -> SessionSummary {
    let draws = Rc::new(Cell::new(0));
    let mut engine = build_engine(config, &CountingDrawable::new(draws.clone()));
    let mut sink = CountingSink::default();

    let frames = config.session.frames;
    let pick_frame = frames / 2;
    let extent = (engine.world().grid_size() * CHUNK_DIMENSION) as f32;
    let start = Instant::now();

    for frame in 0..frames {
        let progress = frame as f32 / frames.saturating_sub(1).max(1) as f32;
        // Stay inside the last column instead of stepping off the far edge.
        let across = (progress * extent).min(extent - 0.5);
        let ground = engine
            .world()
            .column_top(across as i64, across as i64)
            .map_or(0.0, |top| top as f32 + 1.0);

        engine.move_camera_to(Point3::new(across, ground + HOVER_HEIGHT, across));
        let yaw = Deg(config.camera.yaw_degrees + 360.0 * progress);

        let actions = if frame == pick_frame {
            engine.camera.set_orientation(yaw, Deg(-90.0));
            PlayerAction {
                remove_block: true,
                ..PlayerAction::default()
            }
        } else if frame == pick_frame + 1 {
            engine.camera.set_orientation(yaw, Deg(-90.0));
            PlayerAction {
                place_block: true,
                ..PlayerAction::default()
            }
        } else {
            engine
                .camera
                .set_orientation(yaw, Deg(config.camera.pitch_degrees));
            PlayerAction::default()
        };

        engine.set_player_actions(actions);
        engine.update();
        engine.process_input();
        let frame_draws = engine.render(&mut sink);

        trace!(
            "Frame {} at {:?}: active chunk {}, {} draws",
            frame,
            engine.camera.position,
            engine.world().active_chunk_index(),
            frame_draws
        );
    }

    let stats = engine.stats();
    let summary = SessionSummary {
        frames,
        draw_calls: draws.get(),
        model_uploads: sink.model_uploads,
        blocks_removed: stats.blocks_removed,
        blocks_placed: stats.blocks_placed,
        final_active_chunk: engine.world().active_chunk_index(),
    };

    info!(
        "Session finished in {:?}: {} frames, {} draw calls, {} removed, {} placed",
        start.elapsed(),
        summary.frames,
        summary.draw_calls,
        summary.blocks_removed,
        summary.blocks_placed
    );

    summary
}
