//! Active-grid registration.
//!
//! A grid is placed by spawning an entity with `GridAnchor` and a `Transform`.
//! The first anchor to appear becomes the active grid: its settings are used
//! to build the `SpatialGrid<C>` resource and its world-space position becomes
//! the grid origin, parents included. Any anchor added while one is active is rejected with a warning and
//! despawned; the active grid is left untouched.

use std::marker::PhantomData;

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;

use crate::cell::CellData;
use crate::settings::GridSettings;
use crate::spatial_grid::SpatialGrid;

/// Marks the entity that places a grid in the world.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Transform)]
pub struct GridAnchor {
    pub settings: GridSettings,
}

impl GridAnchor {
    pub fn new(settings: GridSettings) -> Self {
        Self { settings }
    }
}

/// Outcome of `GridRegistry::register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The entity is now the active grid.
    Accepted,
    /// The entity was already the active grid.
    AlreadyActive,
    /// Another grid is active; the entity must be torn down.
    Rejected { active: Entity },
}

/// Tracks which anchor entity owns the active grid.
#[derive(Resource, Debug, Default)]
pub struct GridRegistry {
    active: Option<Entity>,
}

impl GridRegistry {
    /// The active grid's anchor entity, or `None` before any grid is registered.
    pub fn active(&self) -> Option<Entity> {
        self.active
    }

    pub fn register(&mut self, entity: Entity) -> Registration {
        match self.active {
            None => {
                self.active = Some(entity);
                Registration::Accepted
            }
            Some(active) if active == entity => Registration::AlreadyActive,
            Some(active) => Registration::Rejected { active },
        }
    }

    /// Clear the active slot if `entity` holds it. Returns whether it did.
    pub fn release(&mut self, entity: Entity) -> bool {
        if self.active == Some(entity) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

/// Sent once for every anchor rejected because a grid was already active.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateGridRejected {
    /// The despawned anchor.
    pub rejected: Entity,
    /// The anchor that stays active.
    pub active: Entity,
}

/// Sent when a grid becomes active and its `SpatialGrid` resource is inserted.
#[derive(Event, Debug)]
pub struct GridReady<C: CellData> {
    pub anchor: Entity,
    _marker: PhantomData<fn() -> C>,
}

impl<C: CellData> GridReady<C> {
    pub fn new(anchor: Entity) -> Self {
        Self {
            anchor,
            _marker: PhantomData,
        }
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// World-space position of an anchor, walking its parent chain.
///
/// Computed from `Transform`s directly so it is correct on the frame the
/// anchor is spawned, before transform propagation has run.
fn anchor_world_position(transforms: &TransformHelper, entity: Entity) -> Vec3 {
    match transforms.compute_global_transform(entity) {
        Ok(global) => global.translation(),
        Err(e) => {
            warn!("Spatial grid anchor {:?} has no usable transform: {:?}", entity, e);
            Vec3::ZERO
        }
    }
}

/// Register newly added anchors, building the grid for the first one and
/// tearing down every later one.
pub fn register_grid_anchors<C: CellData>(
    mut commands: Commands,
    mut registry: ResMut<GridRegistry>,
    anchors: Query<(Entity, &GridAnchor), Added<GridAnchor>>,
    transforms: TransformHelper,
    mut rejected: EventWriter<DuplicateGridRejected>,
    mut ready: EventWriter<GridReady<C>>,
) {
    for (entity, anchor) in &anchors {
        match registry.register(entity) {
            Registration::Accepted => {
                let origin = anchor_world_position(&transforms, entity);
                let grid = SpatialGrid::<C>::new(&anchor.settings, origin);
                commands.insert_resource(grid);
                ready.send(GridReady::new(entity));
            }
            Registration::AlreadyActive => {}
            Registration::Rejected { active } => {
                warn!(
                    "Tried to instantiate additional spatial grid {:?}; {:?} is already active",
                    entity, active
                );
                commands.entity(entity).despawn_recursive();
                rejected.send(DuplicateGridRejected {
                    rejected: entity,
                    active,
                });
            }
        }
    }
}

/// Tear down the grid when its anchor goes away.
pub fn release_removed_anchors<C: CellData>(
    mut commands: Commands,
    mut registry: ResMut<GridRegistry>,
    mut removed: RemovedComponents<GridAnchor>,
) {
    for entity in removed.read() {
        if registry.release(entity) {
            info!("Spatial grid anchor {:?} removed, dropping grid", entity);
            commands.remove_resource::<SpatialGrid<C>>();
        }
    }
}

/// Keep the grid origin at the active anchor's world position. Runs every
/// frame so a moved parent is picked up as well as a moved anchor.
pub fn sync_grid_origin<C: CellData>(
    registry: Res<GridRegistry>,
    grid: Option<ResMut<SpatialGrid<C>>>,
    transforms: TransformHelper,
) {
    let (Some(active), Some(mut grid)) = (registry.active(), grid) else {
        return;
    };
    let origin = anchor_world_position(&transforms, active);
    if grid.origin() != origin {
        grid.set_origin(origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_accepted() {
        let mut registry = GridRegistry::default();
        assert_eq!(registry.active(), None);
        let e = Entity::from_raw(1);
        assert_eq!(registry.register(e), Registration::Accepted);
        assert_eq!(registry.active(), Some(e));
    }

    #[test]
    fn test_second_registration_rejected() {
        let mut registry = GridRegistry::default();
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);
        registry.register(first);
        assert_eq!(
            registry.register(second),
            Registration::Rejected { active: first }
        );
        assert_eq!(registry.active(), Some(first));
    }

    #[test]
    fn test_reregistering_active_is_noop() {
        let mut registry = GridRegistry::default();
        let e = Entity::from_raw(7);
        registry.register(e);
        assert_eq!(registry.register(e), Registration::AlreadyActive);
        assert_eq!(registry.active(), Some(e));
    }

    #[test]
    fn test_release_only_clears_active() {
        let mut registry = GridRegistry::default();
        let first = Entity::from_raw(1);
        let other = Entity::from_raw(2);
        registry.register(first);
        assert!(!registry.release(other));
        assert_eq!(registry.active(), Some(first));
        assert!(registry.release(first));
        assert_eq!(registry.active(), None);
        assert_eq!(registry.register(other), Registration::Accepted);
    }
}
