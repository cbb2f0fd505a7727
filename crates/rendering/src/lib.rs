use std::marker::PhantomData;

use bevy::prelude::*;

pub mod camera;
pub mod floor;
pub mod overlay;

use grid::{CellData, GridTile, SpatialGrid};
use overlay::GridOverlayState;

/// Debug visualization for the active grid: gizmo wireframe, floor plane,
/// and a viewer camera. Requires `grid::SpatialGridPlugin<C>`.
pub struct GridRenderingPlugin<C: CellData = GridTile> {
    _marker: PhantomData<fn() -> C>,
}

impl<C: CellData> Default for GridRenderingPlugin<C> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C: CellData> Plugin for GridRenderingPlugin<C> {
    fn build(&self, app: &mut App) {
        app.init_resource::<GridOverlayState>()
            .add_systems(Startup, (camera::setup_camera, setup_lighting))
            .add_systems(
                Update,
                (
                    camera::focus_on_new_grid::<C>,
                    camera::frame_grid_on_key::<C>,
                    camera::camera_pan_keyboard::<C>,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    floor::spawn_floor_marker::<C>.run_if(resource_added::<SpatialGrid<C>>),
                    overlay::toggle_grid_overlay,
                    overlay::draw_grid_overlay::<C>.after(overlay::toggle_grid_overlay),
                ),
            );
    }
}

const AMBIENT_BRIGHTNESS: f32 = 300.0;
const SUN_ILLUMINANCE: f32 = 10_000.0;
/// Point the sun shines from, toward the world origin.
const SUN_FROM: Vec3 = Vec3::new(0.5, 1.0, 0.8);

/// Soft ambient fill plus one unshadowed directional light.
fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
    });
    commands.spawn((
        Name::new("GridSun"),
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(SUN_FROM).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
