use std::marker::PhantomData;

use bevy::prelude::*;

pub mod cell;
pub mod config;
pub mod coords;
pub mod registry;
pub mod settings;
pub mod settings_error;
pub mod spatial_grid;
pub mod storage;

pub use cell::{CellData, GridTile};
pub use coords::CellBounds;
pub use registry::{DuplicateGridRejected, GridAnchor, GridReady, GridRegistry, Registration};
pub use settings::GridSettings;
pub use settings_error::SettingsError;
pub use spatial_grid::SpatialGrid;
pub use storage::CellArray;

/// Marker resource that, when present, stops `spawn_configured_anchor` from
/// placing a grid at startup. Used by tests that spawn anchors themselves.
#[derive(Resource)]
pub struct SkipAnchorSpawn;

/// System sets for the grid lifecycle, in execution order within `PreUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GridSet {
    /// Anchors are released, registered, and synced; the grid resource is
    /// present (or removed) after this set.
    Lifecycle,
}

/// Spawn one anchor at the world origin from the `GridSettings` resource.
pub fn spawn_configured_anchor(
    mut commands: Commands,
    settings: Res<GridSettings>,
    skip: Option<Res<SkipAnchorSpawn>>,
) {
    if skip.is_some() {
        return;
    }
    commands.spawn((
        Name::new("SpatialGridAnchor"),
        GridAnchor::new(*settings),
        Transform::default(),
    ));
}

/// Core grid plugin, generic over the per-cell record type.
pub struct SpatialGridPlugin<C: CellData = GridTile> {
    _marker: PhantomData<fn() -> C>,
}

impl<C: CellData> Default for SpatialGridPlugin<C> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C: CellData> Plugin for SpatialGridPlugin<C> {
    fn build(&self, app: &mut App) {
        app.init_resource::<GridSettings>()
            .init_resource::<GridRegistry>()
            .add_event::<DuplicateGridRejected>()
            .add_event::<GridReady<C>>()
            .add_systems(Startup, spawn_configured_anchor)
            .add_systems(
                PreUpdate,
                (
                    registry::release_removed_anchors::<C>,
                    registry::register_grid_anchors::<C>,
                    registry::sync_grid_origin::<C>,
                )
                    .chain()
                    .in_set(GridSet::Lifecycle),
            );
    }
}
