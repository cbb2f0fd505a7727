use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use grid::config::SETTINGS_PATH_ENV;
use grid::{GridReady, GridSettings, GridTile, SpatialGrid, SpatialGridPlugin};
use rendering::GridRenderingPlugin;

fn main() {
    let settings = match std::env::var(SETTINGS_PATH_ENV) {
        Ok(path) => GridSettings::load_or_default(path),
        Err(_) => GridSettings::default(),
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Spatial Grid".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(settings)
    .add_plugins((
        SpatialGridPlugin::<GridTile>::default(),
        GridRenderingPlugin::<GridTile>::default(),
    ))
    .add_systems(Update, report_grid_ready);

    app.run();
}

fn report_grid_ready(
    mut ready: EventReader<GridReady<GridTile>>,
    grid: Option<Res<SpatialGrid<GridTile>>>,
) {
    for event in ready.read() {
        let Some(grid) = grid.as_ref() else {
            continue;
        };
        info!(
            "Grid anchored at {:?}: {} cells, center {:?}. G toggles the overlay.",
            event.anchor,
            grid.cell_count(),
            grid.local_to_world(grid.grid_center())
        );
    }
}
