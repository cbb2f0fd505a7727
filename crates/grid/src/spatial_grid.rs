use bevy::prelude::*;

use crate::cell::CellData;
use crate::coords::{self, CellBounds};
use crate::settings::GridSettings;
use crate::storage::CellArray;

/// A fixed-size 3D grid of cell records placed at `origin` in world space.
///
/// Building one (`SpatialGrid::new`) is the single initialization pass: every
/// cell record exists and has been initialized by the time the value is
/// returned. Dimensions never change afterwards.
#[derive(Resource)]
pub struct SpatialGrid<C: CellData> {
    cell_size: Vec3,
    origin: Vec3,
    cells: CellArray<C>,
}

impl<C: CellData> SpatialGrid<C> {
    pub fn new(settings: &GridSettings, origin: Vec3) -> Self {
        let dimensions = settings.resolved_dimensions();
        let cells = CellArray::build(dimensions);
        info!(
            "Spatial grid initialized: {}x{}x{} ({} cells), cell size {:?}, origin {:?}",
            dimensions.x,
            dimensions.y,
            dimensions.z,
            cells.len(),
            settings.cell_size,
            origin
        );
        Self {
            cell_size: settings.cell_size,
            origin,
            cells,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn dimensions(&self) -> UVec3 {
        self.cells.dimensions()
    }

    #[inline]
    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Move the grid origin. Only the anchor sync system should call this.
    pub(crate) fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cells(&self) -> &CellArray<C> {
        &self.cells
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec3) -> bool {
        self.cells.in_bounds(cell)
    }

    #[inline]
    pub fn cell(&self, cell: IVec3) -> Option<&C> {
        self.cells.get(cell)
    }

    #[inline]
    pub fn cell_mut(&mut self, cell: IVec3) -> Option<&mut C> {
        self.cells.get_mut(cell)
    }

    // -----------------------------------------------------------------------
    // Coordinate conversions
    // -----------------------------------------------------------------------

    #[inline]
    pub fn cell_to_local(&self, cell: IVec3) -> Vec3 {
        coords::cell_to_local(cell)
    }

    #[inline]
    pub fn cell_to_world(&self, cell: IVec3) -> Vec3 {
        coords::local_to_world(coords::cell_to_local(cell), self.origin)
    }

    #[inline]
    pub fn local_to_cell(&self, local: Vec3) -> IVec3 {
        coords::local_to_cell(local, self.cell_size)
    }

    /// Note: the origin is not subtracted first, so this matches
    /// `local_to_cell` applied to the raw world position.
    #[inline]
    pub fn world_to_cell(&self, world: Vec3) -> IVec3 {
        coords::local_to_cell(world, self.cell_size)
    }

    #[inline]
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        coords::local_to_world(local, self.origin)
    }

    #[inline]
    pub fn world_to_local(&self, world: Vec3) -> Vec3 {
        coords::world_to_local(world, self.origin)
    }

    #[inline]
    pub fn bounds_local(&self, cell: IVec3) -> CellBounds {
        coords::bounds_local(cell, self.cell_size)
    }

    #[inline]
    pub fn cell_offset(&self) -> Vec3 {
        coords::cell_offset(self.cell_size)
    }

    #[inline]
    pub fn grid_center(&self) -> Vec3 {
        coords::grid_center(self.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::GridTile;

    fn grid(dimensions: UVec3, cell_size: Vec3, origin: Vec3) -> SpatialGrid<GridTile> {
        SpatialGrid::new(&GridSettings::new(dimensions, cell_size), origin)
    }

    #[test]
    fn test_two_cube_example() {
        let grid = grid(UVec3::splat(2), Vec3::ONE, Vec3::ZERO);
        assert_eq!(grid.cell_count(), 8);
        assert_eq!(grid.grid_center(), Vec3::ONE);
        assert_eq!(grid.cell_to_world(IVec3::ONE), Vec3::ONE);
    }

    #[test]
    fn test_unset_dimensions_default_to_ten() {
        let grid = grid(UVec3::ZERO, Vec3::ONE, Vec3::ZERO);
        assert_eq!(grid.dimensions(), UVec3::splat(10));
        assert_eq!(grid.cell_count(), 1000);
    }

    #[test]
    fn test_every_cell_initialized_with_its_index() {
        let grid = grid(UVec3::new(3, 2, 4), Vec3::new(2.0, 1.0, 0.5), Vec3::ZERO);
        assert_eq!(grid.cell_count(), 3 * 2 * 4);
        for (index, tile) in grid.cells().iter() {
            assert!(tile.initialized);
            assert_eq!(tile.position, index.as_vec3());
        }
    }

    #[test]
    fn test_world_cell_roundtrip_unit_cells() {
        let grid = grid(UVec3::new(4, 3, 5), Vec3::ONE, Vec3::ZERO);
        for (index, _) in grid.cells().iter() {
            assert_eq!(grid.world_to_cell(grid.cell_to_world(index)), index);
        }
    }

    #[test]
    fn test_world_cell_roundtrip_breaks_for_non_unit_cells() {
        let grid = grid(UVec3::splat(4), Vec3::splat(2.0), Vec3::ZERO);
        let c = IVec3::new(1, 2, 3);
        assert_ne!(grid.world_to_cell(grid.cell_to_world(c)), c);
        assert_eq!(grid.world_to_cell(grid.cell_to_world(c)), IVec3::new(2, 4, 6));
    }

    #[test]
    fn test_grid_center_ignores_cell_size_and_origin() {
        let a = grid(UVec3::new(6, 4, 2), Vec3::ONE, Vec3::ZERO);
        let b = grid(UVec3::new(6, 4, 2), Vec3::new(3.0, 0.5, 2.0), Vec3::new(100.0, -5.0, 7.0));
        assert_eq!(a.grid_center(), Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(b.grid_center(), a.grid_center());
    }

    #[test]
    fn test_origin_applies_to_world_conversions() {
        let origin = Vec3::new(10.0, 0.0, -4.0);
        let grid = grid(UVec3::splat(2), Vec3::ONE, origin);
        assert_eq!(grid.cell_to_world(IVec3::new(1, 0, 1)), Vec3::new(11.0, 0.0, -3.0));
        assert_eq!(grid.local_to_world(Vec3::ZERO), origin);
        assert_eq!(grid.world_to_local(origin), Vec3::ZERO);
        // world_to_cell does not subtract the origin.
        assert_eq!(grid.world_to_cell(Vec3::new(11.5, 0.0, -3.5)), IVec3::new(11, 0, -4));
        assert_eq!(grid.local_to_cell(Vec3::new(1.5, 0.0, 0.5)), IVec3::new(1, 0, 0));
    }

    #[test]
    fn test_bounds_local_matches_cell_and_size() {
        let cell_size = Vec3::new(2.0, 1.0, 3.0);
        let grid = grid(UVec3::splat(3), cell_size, Vec3::new(4.0, 4.0, 4.0));
        for (index, _) in grid.cells().iter() {
            let bounds = grid.bounds_local(index);
            assert_eq!(bounds.center, index.as_vec3());
            assert_eq!(bounds.size, cell_size);
        }
    }

    #[test]
    fn test_cell_offset() {
        let grid = grid(UVec3::ONE, Vec3::new(1.0, 2.0, 4.0), Vec3::ZERO);
        assert_eq!(grid.cell_offset(), Vec3::new(0.5, 1.0, 2.0));
    }

    #[test]
    fn test_cell_lookup() {
        let mut grid = grid(UVec3::splat(2), Vec3::ONE, Vec3::ZERO);
        assert!(grid.in_bounds(IVec3::ONE));
        assert!(!grid.in_bounds(IVec3::splat(2)));
        assert_eq!(grid.cell(IVec3::new(1, 0, 1)).map(|t| t.position), Some(Vec3::new(1.0, 0.0, 1.0)));
        assert!(grid.cell(IVec3::new(-1, 0, 0)).is_none());

        if let Some(tile) = grid.cell_mut(IVec3::ZERO) {
            tile.position = Vec3::splat(9.0);
        }
        assert_eq!(grid.cell(IVec3::ZERO).map(|t| t.position), Some(Vec3::splat(9.0)));
    }

    #[test]
    fn test_zero_cell_size_propagates_silently() {
        let grid = grid(UVec3::splat(2), Vec3::ZERO, Vec3::ZERO);
        assert_eq!(grid.world_to_cell(Vec3::new(5.0, 5.0, 5.0)), IVec3::ZERO);
        assert_eq!(grid.cell_offset(), Vec3::ZERO);
    }
}
