//! Coordinate-space arithmetic shared by `SpatialGrid` and the debug overlay.
//!
//! Four spaces are involved:
//!   - **cell**: integer index `(x, y, z)` into the grid,
//!   - **local**: float position relative to the grid origin,
//!   - **world**: local + origin,
//!   - **bounds**: the axis-aligned box of one cell.
//!
//! The position-to-cell direction multiplies by `cell_size` before flooring,
//! while the cell-to-position direction is a plain cast. The two are only
//! inverses of each other when `cell_size == Vec3::ONE`.

use bevy::prelude::*;

/// Axis-aligned box described by its center and full size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl CellBounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    /// Half of `size`.
    pub fn extents(&self) -> Vec3 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents()
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents()
    }

    /// Inclusive on both faces.
    pub fn contains(&self, point: Vec3) -> bool {
        let (min, max) = (self.min(), self.max());
        point.cmpge(min).all() && point.cmple(max).all()
    }
}

#[inline]
pub fn cell_to_local(cell: IVec3) -> Vec3 {
    cell.as_vec3()
}

#[inline]
pub fn local_to_cell(local: Vec3, cell_size: Vec3) -> IVec3 {
    (local * cell_size).floor().as_ivec3()
}

#[inline]
pub fn local_to_world(local: Vec3, origin: Vec3) -> Vec3 {
    local + origin
}

#[inline]
pub fn world_to_local(world: Vec3, origin: Vec3) -> Vec3 {
    world - origin
}

#[inline]
pub fn bounds_local(cell: IVec3, cell_size: Vec3) -> CellBounds {
    CellBounds::new(cell_to_local(cell), cell_size)
}

#[inline]
pub fn cell_offset(cell_size: Vec3) -> Vec3 {
    cell_size / 2.0
}

#[inline]
pub fn grid_center(dimensions: UVec3) -> Vec3 {
    dimensions.as_vec3() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_local_is_cast() {
        assert_eq!(cell_to_local(IVec3::new(3, -2, 7)), Vec3::new(3.0, -2.0, 7.0));
    }

    #[test]
    fn test_local_to_cell_floors() {
        assert_eq!(local_to_cell(Vec3::new(0.9, 1.0, 2.5), Vec3::ONE), IVec3::new(0, 1, 2));
        // Negative positions floor toward -inf, not toward zero.
        assert_eq!(local_to_cell(Vec3::new(-0.1, -1.0, -1.5), Vec3::ONE), IVec3::new(-1, -1, -2));
    }

    #[test]
    fn test_local_to_cell_multiplies_by_cell_size() {
        let cell = local_to_cell(Vec3::new(3.0, 3.0, 3.0), Vec3::new(2.0, 0.5, 1.0));
        assert_eq!(cell, IVec3::new(6, 1, 3));
    }

    #[test]
    fn test_local_world_roundtrip() {
        let origin = Vec3::new(5.0, -1.0, 2.5);
        let local = Vec3::new(1.25, 4.0, -3.0);
        let world = local_to_world(local, origin);
        assert_eq!(world, Vec3::new(6.25, 3.0, -0.5));
        assert_eq!(world_to_local(world, origin), local);
    }

    #[test]
    fn test_cell_offset_is_half_size() {
        assert_eq!(cell_offset(Vec3::new(2.0, 1.0, 0.5)), Vec3::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn test_grid_center_is_half_dimensions() {
        assert_eq!(grid_center(UVec3::new(2, 2, 2)), Vec3::ONE);
        assert_eq!(grid_center(UVec3::new(5, 3, 10)), Vec3::new(2.5, 1.5, 5.0));
    }

    #[test]
    fn test_bounds_center_and_size() {
        let bounds = bounds_local(IVec3::new(1, 2, 3), Vec3::new(2.0, 2.0, 4.0));
        assert_eq!(bounds.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.size, Vec3::new(2.0, 2.0, 4.0));
        assert_eq!(bounds.extents(), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(bounds.min(), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(bounds.max(), Vec3::new(2.0, 3.0, 5.0));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = CellBounds::new(Vec3::ZERO, Vec3::ONE);
        assert!(bounds.contains(Vec3::ZERO));
        assert!(bounds.contains(Vec3::splat(0.5)));
        assert!(!bounds.contains(Vec3::new(0.51, 0.0, 0.0)));
    }

    #[test]
    fn test_zero_cell_size_is_unguarded() {
        // 0 * x = 0 for finite x, so a zero axis collapses every position onto cell 0.
        let cell = local_to_cell(Vec3::new(7.0, 7.0, 7.0), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(cell.y, 0);
        // Infinite positions on a zero axis produce NaN, which saturates to 0 on cast.
        let cell = local_to_cell(Vec3::new(0.0, f32::INFINITY, 0.0), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(cell.y, 0);
    }
}
