use approx::assert_relative_eq;
use cgmath::{Deg, Point3, Vector2, Vector3};
use voxel_sandbox::config::WorldConfig;
use voxel_sandbox::engine_state::camera_state::Camera;
use voxel_sandbox::engine_state::voxels::block::block_side::BlockSide;
use voxel_sandbox::engine_state::voxels::block::block_type::VoxelType;
use voxel_sandbox::engine_state::voxels::chunk::CubicChunk;
use voxel_sandbox::engine_state::voxels::geometry::{HitType, Ray};
use voxel_sandbox::engine_state::voxels::heightmap::FlatHeightmap;
use voxel_sandbox::engine_state::voxels::palette::VoxelPalette;
use voxel_sandbox::engine_state::voxels::world::World;
use voxel_sandbox::engine_state::{EngineState, PlayerAction};
use voxel_sandbox::session::run_session;

fn flat_chunk() -> CubicChunk<16> {
    let mut chunk = CubicChunk::<16>::empty(Vector2::new(0.0, 0.0));
    chunk.generate(&FlatHeightmap::new(0.5));
    chunk
}

#[test]
fn flat_chunk_has_grass_surface() {
    let chunk = flat_chunk();
    for x in 0..16 {
        for z in 0..16 {
            assert_eq!(chunk.voxel_at(x, 8, z).unwrap().voxel_type, VoxelType::GRASS);
            assert_eq!(chunk.voxel_at(x, 7, z).unwrap().voxel_type, VoxelType::STONE);
            assert!(chunk.voxel_at(x, 9, z).unwrap().is_empty());
        }
    }
}

#[test]
fn downward_ray_hits_surface_then_dig() {
    let mut chunk = flat_chunk();
    let ray = Ray::new(Point3::new(8.5, 30.0, 8.5), Vector3::new(0.0, -1.0, 0.0));

    let hit = chunk.hit(&ray, 0.0, 100.0).unwrap();
    assert_eq!(hit.voxel, Point3::new(8, 8, 8));
    assert_eq!(hit.face, BlockSide::TOP);
    assert_relative_eq!(hit.distance, 21.0);
    assert_eq!(chunk.aabb().hit_type(&ray, 0.0, 100.0), HitType::Hit);

    assert!(chunk.remove_block(8, 8, 8));
    assert!(chunk.voxel_at(8, 7, 8).unwrap().visible);

    let hit = chunk.hit(&ray, 0.0, 100.0).unwrap();
    assert_eq!(hit.voxel, Point3::new(8, 7, 8));
    assert_relative_eq!(hit.distance, 22.0);
}

#[test]
fn single_chunk_world_picks_surface_from_above() {
    let mut world = World::<16>::new(1, Box::new(FlatHeightmap::new(0.5)), VoxelPalette::new());
    world.update_visible_set(Point3::new(8.5, 30.0, 8.5));
    assert_eq!(world.visible_chunk_indices(), &[0]);

    let ray = Ray::new(Point3::new(8.5, 30.0, 8.5), Vector3::new(0.0, -1.0, 0.0));
    let hit = world.hit(&ray, 0.0, 100.0).unwrap();
    assert_eq!(hit.chunk_index, 0);
    assert_eq!(hit.record.voxel, Point3::new(8, 8, 8));
    assert_eq!(hit.record.world_voxel, Point3::new(8, 8, 8));
    assert_eq!(hit.record.face, BlockSide::TOP);

    let chunk = world.chunk(0).unwrap();
    for x in 0..16 {
        for z in 0..16 {
            assert_eq!(world.column_top(x, z), Some(8));
            assert_eq!(
                chunk.voxel_at(x as usize, 0, z as usize).unwrap().voxel_type,
                VoxelType::STONE
            );
        }
    }
}

#[test]
fn ray_above_the_chunk_misses() {
    let chunk = flat_chunk();
    let ray = Ray::new(Point3::new(-5.0, 40.0, 8.0), Vector3::new(1.0, 0.0, 0.0));
    assert!(chunk.hit(&ray, 0.0, 100.0).is_none());
}

#[test]
fn building_across_a_chunk_border() {
    let world = World::<16>::new(2, Box::new(FlatHeightmap::new(0.5)), VoxelPalette::new());
    // At the east edge of chunk 0, looking east, slightly below the grass line.
    let camera = Camera::new(Point3::new(12.5, 9.5, 4.5), Deg(0.0), Deg(0.0));
    let mut engine = EngineState::new(world, camera, 6.0, VoxelType::STONE);
    engine.update();

    // Put a pillar in chunk 1 and build against its west face, back in chunk 0.
    assert!(engine
        .world_mut()
        .place_block_at(Point3::new(16, 9, 4), VoxelType::MARKER));
    engine.set_player_actions(PlayerAction {
        place_block: true,
        ..PlayerAction::default()
    });
    engine.process_input();

    assert_eq!(engine.stats().blocks_placed, 1);
    assert_eq!(
        engine.world().chunk(0).unwrap().voxel_at(15, 9, 4).unwrap().voxel_type,
        VoxelType::STONE
    );
}

#[test]
fn configured_session_runs() {
    let config = WorldConfig::from_json_str(
        r#"{
            "grid_size": 3,
            "terrain": { "kind": "perlin", "seed": 7 },
            "session": { "frames": 10 }
        }"#,
    )
    .unwrap();

    let summary = run_session(&config);
    assert_eq!(summary.frames, 10);
    assert_eq!(summary.blocks_removed, 1);
    assert!(summary.draw_calls > 0);
    assert_eq!(summary.final_active_chunk, 8);
}
