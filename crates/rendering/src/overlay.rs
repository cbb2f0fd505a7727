//! Debug wireframe for the active grid.
//!
//! Draws the floor lattice at y = 0, a marker sphere on each of the eight
//! corners of the grid volume, and one on the grid center. Geometry is built
//! by pure functions so it can be checked without a renderer; the gizmo system
//! only forwards it. Nothing here mutates the grid.

use bevy::prelude::*;

use grid::config::MARKER_RADIUS;
use grid::{CellData, SpatialGrid};

/// Translucent red used for lines and markers.
pub const OVERLAY_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 0.5);

/// Whether the grid wireframe is drawn. Toggled with `G`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOverlayState {
    pub enabled: bool,
}

impl Default for GridOverlayState {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Floor lattice line segments.
///
/// Lines are shifted by `(origin + cell_size)` on x/z and back by `cell_size`
/// per line, so with unit cells they land on cell edges starting at the
/// origin. Produces `(dim.x + 1) + (dim.z + 1)` segments.
pub fn floor_lines(dimensions: UVec3, cell_size: Vec3, origin: Vec3) -> Vec<(Vec3, Vec3)> {
    let offset = (origin + cell_size) * Vec3::new(1.0, 0.0, 1.0);
    let (x_max, z_max) = (dimensions.x as f32, dimensions.z as f32);
    let (x_cell, z_cell) = (cell_size.x, cell_size.z);
    let height = 0.0;

    let mut lines = Vec::with_capacity((dimensions.x + dimensions.z + 2) as usize);
    for i in 0..=dimensions.x {
        let i = i as f32;
        lines.push((
            Vec3::new(i - x_cell, height, -z_cell) + offset,
            Vec3::new(i - x_cell, height, z_max - z_cell) + offset,
        ));
    }
    for j in 0..=dimensions.z {
        let j = j as f32;
        lines.push((
            Vec3::new(-x_cell, height, j - z_cell) + offset,
            Vec3::new(x_max - x_cell, height, j - z_cell) + offset,
        ));
    }
    lines
}

/// The eight corners of the box `[0, dimensions]`, in local space.
pub fn corner_markers(dimensions: UVec3) -> [Vec3; 8] {
    let d = dimensions.as_vec3();
    [
        Vec3::ZERO,
        d,
        Vec3::new(0.0, 0.0, d.z),
        Vec3::new(0.0, d.y, 0.0),
        Vec3::new(d.x, 0.0, 0.0),
        Vec3::new(0.0, d.y, d.z),
        Vec3::new(d.x, 0.0, d.z),
        Vec3::new(d.x, d.y, 0.0),
    ]
}

/// All marker positions (corners, then center) in world space.
///
/// Markers go through `local_to_world` so they follow the anchor like the
/// lattice does, instead of staying at raw local coordinates.
pub fn marker_positions<C: CellData>(grid: &SpatialGrid<C>) -> Vec<Vec3> {
    corner_markers(grid.dimensions())
        .into_iter()
        .chain(std::iter::once(grid.grid_center()))
        .map(|local| grid.local_to_world(local))
        .collect()
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn draw_grid_overlay<C: CellData>(
    state: Res<GridOverlayState>,
    grid: Option<Res<SpatialGrid<C>>>,
    mut gizmos: Gizmos,
) {
    if !state.enabled {
        return;
    }
    let Some(grid) = grid else {
        return;
    };

    for (from, to) in floor_lines(grid.dimensions(), grid.cell_size(), grid.origin()) {
        gizmos.line(from, to, OVERLAY_COLOR);
    }
    for pos in marker_positions(&*grid) {
        gizmos.sphere(Isometry3d::from_translation(pos), MARKER_RADIUS, OVERLAY_COLOR);
    }
}

pub fn toggle_grid_overlay(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<GridOverlayState>) {
    if keys.just_pressed(KeyCode::KeyG) {
        state.enabled = !state.enabled;
        info!(
            "Grid overlay {}",
            if state.enabled { "enabled" } else { "disabled" }
        );
    }
}
