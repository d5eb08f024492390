//! # Chunk Intersection Module
//!
//! Ray picking against the voxels of a chunk.
//!
//! The ray is first tested against the chunk's bounding box; on a hit every
//! solid voxel is tested against its own unit box. This is a brute-force scan
//! over the chunk volume, which is fine at click rate but not per frame.

use cgmath::{MetricSpace, Point3};
use log::trace;

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::geometry::{Aabb, Ray, Time};

use super::Chunk;

/// Describes the voxel struck by a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChunkHitRecord {
    /// Chunk-relative index of the struck voxel
    pub voxel: Point3<usize>,
    /// Integer world coordinates of the struck voxel
    pub world_voxel: Point3<i64>,
    /// The world-space point where the ray enters the voxel
    pub point: Point3<f32>,
    /// Parametric time of `point` along the ray
    pub time: Time,
    /// Euclidean distance from the ray origin to `point`
    pub distance: f32,
    /// The face of the voxel the ray entered through
    pub face: BlockSide,
}

impl ChunkHitRecord {
    /// Integer world coordinates of the voxel in front of the struck face.
    ///
    /// This is where a block placed against the hit should go. It may belong
    /// to a neighboring chunk.
    pub fn adjacent_world_voxel(&self) -> Point3<i64> {
        self.world_voxel + self.face.normal()
    }

    /// Chunk-relative index of the voxel in front of the struck face.
    ///
    /// # Returns
    /// `None` if that voxel lies below zero on some axis. Indices past the far
    /// edge of the chunk are returned as-is and rejected by the edit methods.
    pub fn adjacent_voxel(&self) -> Option<Point3<usize>> {
        let normal = self.face.normal();
        Some(Point3::new(
            self.voxel.x.checked_add_signed(normal.x as isize)?,
            self.voxel.y.checked_add_signed(normal.y as isize)?,
            self.voxel.z.checked_add_signed(normal.z as isize)?,
        ))
    }
}

impl<const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> Chunk<WIDTH, HEIGHT, DEPTH> {
    /// Finds the solid voxel hit by `ray` within `[t_min, t_max]`.
    ///
    /// Among all voxels the ray intersects, the one whose entry point is closest
    /// to the ray origin in Euclidean distance wins. Ties keep the voxel visited
    /// first in storage order.
    ///
    /// # Returns
    /// `None` if the ray misses the chunk or every solid voxel in it.
    pub fn hit(&self, ray: &Ray, t_min: Time, t_max: Time) -> Option<ChunkHitRecord> {
        self.aabb.hit(ray, t_min, t_max)?;

        let mut closest: Option<ChunkHitRecord> = None;

        for (position, _) in self.solid_voxels() {
            let cube_min = self.voxel_world_min(position.x, position.y, position.z);
            let Some(record) = Aabb::unit_at(cube_min).hit(ray, t_min, t_max) else {
                continue;
            };

            let distance = ray.origin().distance(record.point);
            if closest.map_or(true, |best| distance < best.distance) {
                closest = Some(ChunkHitRecord {
                    voxel: position,
                    world_voxel: Point3::new(
                        self.origin.x.floor() as i64 + position.x as i64,
                        position.y as i64,
                        self.origin.y.floor() as i64 + position.z as i64,
                    ),
                    point: record.point,
                    time: record.time,
                    distance,
                    face: BlockSide::nearest_to(cube_min, record.point),
                });
            }
        }

        if let Some(record) = &closest {
            trace!(
                "Ray from {:?} hit voxel {:?} ({:?} face) at distance {}",
                ray.origin(),
                record.voxel,
                record.face,
                record.distance
            );
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cgmath::{Point3, Vector2, Vector3};

    use super::*;
    use crate::engine_state::voxels::block::block_type::VoxelType;
    use crate::engine_state::voxels::chunk::CubicChunk;
    use crate::engine_state::voxels::heightmap::FlatHeightmap;

    fn flat_chunk(origin: Vector2<f32>) -> CubicChunk<16> {
        let mut chunk = CubicChunk::<16>::empty(origin);
        chunk.generate(&FlatHeightmap::new(0.5));
        chunk
    }

    #[test]
    fn downward_ray_hits_surface_voxel() {
        let chunk = flat_chunk(Vector2::new(0.0, 0.0));
        let ray = Ray::new(Point3::new(8.5, 30.0, 8.5), Vector3::new(0.0, -1.0, 0.0));

        let record = chunk.hit(&ray, 0.0, 100.0).expect("ray points at the ground");
        assert_eq!(record.voxel, Point3::new(8, 8, 8));
        assert_eq!(record.face, BlockSide::TOP);
        assert_relative_eq!(record.distance, 21.0);
        assert_eq!(record.adjacent_voxel(), Some(Point3::new(8, 9, 8)));
    }

    #[test]
    fn ray_missing_chunk_box_misses() {
        let chunk = flat_chunk(Vector2::new(0.0, 0.0));
        let ray = Ray::new(Point3::new(40.0, 30.0, 8.5), Vector3::new(0.0, -1.0, 0.0));
        assert!(chunk.hit(&ray, 0.0, 100.0).is_none());
    }

    #[test]
    fn ray_through_empty_space_misses() {
        let chunk = flat_chunk(Vector2::new(0.0, 0.0));
        // Skims horizontally through the empty layers above the grass.
        let ray = Ray::new(Point3::new(-5.0, 12.5, 3.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(chunk.hit(&ray, 0.0, 100.0).is_none());
    }

    #[test]
    fn short_reach_misses_distant_ground() {
        let chunk = flat_chunk(Vector2::new(0.0, 0.0));
        let ray = Ray::new(Point3::new(8.5, 30.0, 8.5), Vector3::new(0.0, -1.0, 0.0));
        assert!(chunk.hit(&ray, 0.0, 6.0).is_none());
    }

    #[test]
    fn offset_chunk_reports_world_coordinates() {
        let chunk = flat_chunk(Vector2::new(32.0, 16.0));
        let ray = Ray::new(Point3::new(35.5, 12.0, 20.5), Vector3::new(0.0, -1.0, 0.0));

        let record = chunk.hit(&ray, 0.0, 100.0).unwrap();
        assert_eq!(record.voxel, Point3::new(3, 8, 4));
        assert_eq!(record.world_voxel, Point3::new(35, 8, 20));
        assert_eq!(record.adjacent_world_voxel(), Point3::new(35, 9, 20));
    }

    #[test]
    fn side_hit_picks_nearest_voxel_and_face() {
        let mut chunk = CubicChunk::<16>::empty(Vector2::new(0.0, 0.0));
        chunk.place_block(5, 3, 5, VoxelType::STONE);
        chunk.place_block(9, 3, 5, VoxelType::STONE);

        let ray = Ray::new(Point3::new(14.0, 3.5, 5.5), Vector3::new(-1.0, 0.0, 0.0));
        let record = chunk.hit(&ray, 0.0, 100.0).unwrap();
        assert_eq!(record.voxel, Point3::new(9, 3, 5));
        assert_eq!(record.face, BlockSide::RIGHT);
        assert_eq!(record.adjacent_voxel(), Some(Point3::new(10, 3, 5)));
    }

    #[test]
    fn adjacent_voxel_below_zero_is_none() {
        let mut chunk = CubicChunk::<16>::empty(Vector2::new(0.0, 0.0));
        chunk.place_block(0, 3, 5, VoxelType::STONE);

        let ray = Ray::new(Point3::new(-4.0, 3.5, 5.5), Vector3::new(1.0, 0.0, 0.0));
        let record = chunk.hit(&ray, 0.0, 100.0).unwrap();
        assert_eq!(record.face, BlockSide::LEFT);
        assert_eq!(record.adjacent_voxel(), None);
        assert_eq!(record.adjacent_world_voxel(), Point3::new(-1, 3, 5));
    }
}
