use bevy::math::{UVec3, Vec3};

pub const DEFAULT_DIMENSIONS: UVec3 = UVec3::new(10, 10, 10);
pub const DEFAULT_CELL_SIZE: Vec3 = Vec3::ONE;

/// Environment variable the viewer reads to locate a settings JSON file.
pub const SETTINGS_PATH_ENV: &str = "GRID_SETTINGS";

/// Radius of the corner and center marker spheres, in world units.
pub const MARKER_RADIUS: f32 = 0.1;
