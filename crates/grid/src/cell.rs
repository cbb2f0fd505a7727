use bevy::prelude::*;

/// Per-cell record owned by a `SpatialGrid`.
///
/// The grid builds one record per cell with `Default::default()` and calls
/// `initialize` on it exactly once, passing the cell's own index as a position.
/// Nothing else about the record is interpreted by the grid.
pub trait CellData: Default + Send + Sync + 'static {
    fn initialize(&mut self, position: Vec3);
}

/// Stock cell record: remembers where it was placed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridTile {
    pub position: Vec3,
    pub initialized: bool,
}

impl CellData for GridTile {
    fn initialize(&mut self, position: Vec3) {
        self.position = position;
        self.initialized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_tile_default_is_uninitialized() {
        let tile = GridTile::default();
        assert!(!tile.initialized);
        assert_eq!(tile.position, Vec3::ZERO);
    }

    #[test]
    fn test_grid_tile_initialize_records_position() {
        let mut tile = GridTile::default();
        tile.initialize(Vec3::new(1.0, 2.0, 3.0));
        assert!(tile.initialized);
        assert_eq!(tile.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
