//! # Engine State Module
//!
//! The core engine module that ties the voxel world, the camera and player
//! input together.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - The first-person camera used for culling and picking
//! * `rendering` - Drawing abstractions and uniform data
//! * `voxels` - Voxel data, chunks, and world generation
//!
//! ## Frame Loop
//!
//! A host drives the engine once per frame:
//!
//! 1. [`EngineState::set_player_actions`] records this frame's input
//! 2. [`EngineState::update`] refreshes the active chunk and visible set
//! 3. [`EngineState::process_input`] applies block selection and edits
//! 4. [`EngineState::render`] uploads the view matrix and draws visible voxels
//!
//! Picking always runs against the visible set around the camera's current
//! position: `process_input` refreshes it before casting, so a host that
//! moves the camera and processes input before calling `update` still picks
//! from the right chunks.

use cgmath::Point3;
use log::{debug, warn};

use camera_state::Camera;
use rendering::{MatrixUniform, UniformSink, VIEW_UNIFORM_NAME};
use voxels::{
    block::{block_type::VoxelType, VoxelTypeSize},
    geometry::Ray,
    world::{World, WorldHitRecord},
};

pub mod camera_state;
pub mod rendering;
pub mod voxels;

/// Running totals of the edits the player has made.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Blocks successfully removed
    pub blocks_removed: usize,
    /// Blocks successfully placed
    pub blocks_placed: usize,
}

/// The main state container for the voxel engine
///
/// Owns the world and the camera, and turns player actions into picks and
/// edits against the world.
///
/// # Examples
///
/// ```
/// use cgmath::{Deg, Point3};
/// use voxel_sandbox::engine_state::{EngineState, PlayerAction};
/// use voxel_sandbox::engine_state::camera_state::Camera;
/// use voxel_sandbox::engine_state::voxels::block::block_type::VoxelType;
/// use voxel_sandbox::engine_state::voxels::heightmap::FlatHeightmap;
/// use voxel_sandbox::engine_state::voxels::palette::VoxelPalette;
/// use voxel_sandbox::engine_state::voxels::world::World;
///
/// let world = World::<16>::new(1, Box::new(FlatHeightmap::new(0.5)), VoxelPalette::new());
/// let camera = Camera::new(Point3::new(8.5, 12.0, 8.5), Deg(0.0), Deg(-90.0));
/// let mut engine = EngineState::new(world, camera, 6.0, VoxelType::STONE);
///
/// engine.update();
/// engine.set_player_actions(PlayerAction {
///     remove_block: true,
///     ..PlayerAction::default()
/// });
/// engine.process_input();
///
/// assert_eq!(engine.stats().blocks_removed, 1);
/// ```
pub struct EngineState<const CHUNK_SIZE: usize> {
    /// The camera the world is viewed and picked through
    pub camera: Camera,
    /// Player actions pending for the next `process_input`
    pub player_actions: PlayerAction,
    /// The voxel world containing all chunk data
    world: World<CHUNK_SIZE>,
    /// Maximum pick distance along the view ray
    reach: f32,
    /// Type placed by the place action
    selected_type: VoxelType,
    stats: EngineStats,
}

impl<const CHUNK_SIZE: usize> EngineState<CHUNK_SIZE> {
    /// Creates a new engine state around an already generated world.
    ///
    /// # Arguments
    ///
    /// * `world` - The voxel world
    /// * `camera` - The starting camera
    /// * `reach` - Maximum pick distance; negative or non-finite values disable picking
    /// * `selected_type` - Initial placement type; `EMPTY` falls back to `STONE`
    pub fn new(mut world: World<CHUNK_SIZE>, camera: Camera, reach: f32, selected_type: VoxelType) -> Self {
        let selected_type = if selected_type.is_solid() {
            selected_type
        } else {
            warn!("Cannot select {:?} for placement, using STONE", selected_type);
            VoxelType::STONE
        };

        world.update_visible_set(camera.position);

        Self {
            camera,
            player_actions: PlayerAction::default(),
            world,
            reach: if reach.is_finite() { reach.max(0.0) } else { 0.0 },
            selected_type,
            stats: EngineStats::default(),
        }
    }

    /// The voxel world.
    pub fn world(&self) -> &World<CHUNK_SIZE> {
        &self.world
    }

    /// Mutable access to the voxel world.
    pub fn world_mut(&mut self) -> &mut World<CHUNK_SIZE> {
        &mut self.world
    }

    /// Maximum pick distance along the view ray.
    pub fn reach(&self) -> f32 {
        self.reach
    }

    /// The type the place action currently places.
    pub fn selected_type(&self) -> VoxelType {
        self.selected_type
    }

    /// Edit totals since construction.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Sets the actions for the next call to [`EngineState::process_input`].
    ///
    /// # Arguments
    /// * `actions` - This frame's player actions
    pub fn set_player_actions(&mut self, actions: PlayerAction) {
        self.player_actions = actions;
    }

    /// The ray block picks are cast along.
    pub fn pick_ray(&self) -> Ray {
        self.camera.view_ray()
    }

    /// Finds the block the camera is looking at, within reach.
    pub fn pick(&self) -> Option<WorldHitRecord> {
        self.world.hit(&self.pick_ray(), 0.0, self.reach)
    }

    /// Applies and consumes the pending player actions.
    ///
    /// The visible set is rebuilt from the current camera position before any
    /// pick, so edits never target chunks selected for an earlier position.
    ///
    /// Slot selection is applied first. Removal takes precedence over
    /// placement when both are requested in the same frame; each edit targets
    /// the block under the view ray. Placement puts the selected type into the
    /// cell on the struck face's side of the picked block.
    pub fn process_input(&mut self) {
        let actions = std::mem::take(&mut self.player_actions);

        if let Some(slot) = actions.select_slot {
            self.select_slot(slot);
        }

        if !actions.remove_block && !actions.place_block {
            return;
        }

        // The camera may have moved since the last update.
        self.update();

        let Some(hit) = self.pick() else {
            debug!("Nothing within reach of {:?}", self.camera.position);
            return;
        };

        if actions.remove_block {
            if self.world.remove_block_at(hit.record.world_voxel) {
                self.stats.blocks_removed += 1;
            }
        } else {
            let target = hit.record.adjacent_world_voxel();
            if self.world.place_block_at(target, self.selected_type) {
                self.stats.blocks_placed += 1;
            } else {
                debug!("Cannot place {:?} at {:?}", self.selected_type, target);
            }
        }
    }

    /// Selects the placement type by its integer slot.
    ///
    /// # Returns
    /// `false`, keeping the current selection, if `slot` names no type or
    /// names `EMPTY`.
    pub fn select_slot(&mut self, slot: VoxelTypeSize) -> bool {
        match VoxelType::from_int(slot) {
            Some(voxel_type) if voxel_type.is_solid() => {
                debug!("Selected {:?} for placement", voxel_type);
                self.selected_type = voxel_type;
                true
            }
            _ => {
                warn!("Block slot {} cannot be placed", slot);
                false
            }
        }
    }

    /// Refreshes the active chunk and visible set from the camera position.
    pub fn update(&mut self) {
        self.world.update_visible_set(self.camera.position);
    }

    /// Renders the current frame
    ///
    /// Sets the view uniform from the camera, then draws every visible voxel
    /// of the visible set.
    ///
    /// # Returns
    /// The number of draw calls issued.
    pub fn render(&self, sink: &mut dyn UniformSink) -> usize {
        sink.set_uniform(
            VIEW_UNIFORM_NAME,
            &MatrixUniform::from_matrix(self.camera.calc_matrix()),
        );
        self.world.draw(sink)
    }

    /// Moves the camera to `position`.
    pub fn move_camera_to(&mut self, position: Point3<f32>) {
        self.camera.position = position;
    }
}

/// Represents player actions derived from input
///
/// Actions are one-shot: [`EngineState::process_input`] consumes them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerAction {
    /// Remove the block under the view ray
    pub remove_block: bool,
    /// Place the selected type against the block under the view ray
    pub place_block: bool,
    /// Switch the placement type to this block slot
    pub select_slot: Option<VoxelTypeSize>,
}
