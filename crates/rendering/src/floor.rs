use bevy::prelude::*;

use grid::{CellData, SpatialGrid};

const FLOOR_COLOR: Color = Color::srgb(0.35, 0.37, 0.4);

/// Marker component on the flat floor plane spawned under the grid.
#[derive(Component)]
pub struct FloorMarker;

/// Placement of the floor plane: centered under the grid on x/z at y = 0,
/// scaled so a unit plane spans `dimensions.x` by `dimensions.z`. The grid
/// origin's x/z is added so the plane stays under a moved anchor.
pub fn floor_marker_transform<C: CellData>(grid: &SpatialGrid<C>) -> Transform {
    let center = grid.grid_center() + grid.origin();
    let dims = grid.dimensions().as_vec3();
    Transform::from_translation(center * Vec3::new(1.0, 0.0, 1.0))
        .with_scale(Vec3::new(dims.x, 1.0, dims.z))
}

/// Spawn the floor plane once the grid resource exists. Any floor left over
/// from a previous grid is removed first.
pub fn spawn_floor_marker<C: CellData>(
    mut commands: Commands,
    grid: Res<SpatialGrid<C>>,
    existing: Query<Entity, With<FloorMarker>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let mesh = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: FLOOR_COLOR,
        perceptual_roughness: 1.0,
        ..default()
    });

    commands.spawn((
        FloorMarker,
        Name::new("GridFloor"),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        floor_marker_transform(&*grid),
    ));
}
