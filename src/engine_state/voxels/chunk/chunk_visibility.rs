//! # Chunk Visibility Module
//!
//! Decides which voxels need drawing.
//!
//! A solid voxel is visible iff at least one of its 26 neighbors inside the
//! same chunk is empty. Neighbors outside the chunk are ignored rather than
//! looked up in the adjacent chunk, so a solid voxel on a chunk face whose only
//! empty neighbor lies across that face stays hidden. The top layer of a
//! completely filled column, or a wall left standing at a chunk border after
//! digging, is affected by this.

use super::Chunk;

impl<const WIDTH: usize, const HEIGHT: usize, const DEPTH: usize> Chunk<WIDTH, HEIGHT, DEPTH> {
    /// Recomputes the visibility flag of every voxel in the chunk.
    ///
    /// Cost is `VOLUME * 26` neighbor reads.
    pub fn update_visibility(&mut self) {
        for index in 0..Self::VOLUME {
            let position = Self::coords_of(index);
            self.voxels[index].visible = self.is_exposed(position.x, position.y, position.z);
        }
    }

    /// Recomputes visibility for `(x, y, z)` and its in-bounds neighbors only.
    ///
    /// Visibility of a voxel depends on nothing but the occupancy of its
    /// neighborhood, so after changing a single voxel this leaves every flag in
    /// the chunk identical to what [`Chunk::update_visibility`] would produce.
    pub(super) fn update_visibility_around(&mut self, x: usize, y: usize, z: usize) {
        for (nx, ny, nz) in Self::neighborhood(x, y, z).chain(std::iter::once((x, y, z))) {
            let visible = self.is_exposed(nx, ny, nz);
            self.voxels[Self::index(nx, ny, nz)].visible = visible;
        }
    }

    /// Returns `true` if the voxel is solid and touches an empty in-bounds neighbor.
    fn is_exposed(&self, x: usize, y: usize, z: usize) -> bool {
        if self.voxels[Self::index(x, y, z)].is_empty() {
            return false;
        }

        Self::neighborhood(x, y, z)
            .any(|(nx, ny, nz)| self.voxels[Self::index(nx, ny, nz)].is_empty())
    }

    /// Iterates the in-bounds members of the 26-neighborhood of `(x, y, z)`.
    fn neighborhood(
        x: usize,
        y: usize,
        z: usize,
    ) -> impl Iterator<Item = (usize, usize, usize)> {
        const OFFSETS: [isize; 3] = [-1, 0, 1];

        OFFSETS
            .into_iter()
            .flat_map(|dx| {
                OFFSETS
                    .into_iter()
                    .flat_map(move |dy| OFFSETS.into_iter().map(move |dz| (dx, dy, dz)))
            })
            .filter(|&offset| offset != (0, 0, 0))
            .filter_map(move |(dx, dy, dz)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                let nz = z.checked_add_signed(dz)?;
                Self::in_bounds(nx, ny, nz).then_some((nx, ny, nz))
            })
    }
}
