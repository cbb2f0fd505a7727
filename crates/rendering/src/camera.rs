//! Viewer camera orbiting the active grid.
//!
//! WASD/arrows pan the focus across the grid footprint, right-drag orbits,
//! the wheel zooms, and `F` frames the whole grid again. When a grid is
//! active the focus never leaves its footprint on the ground plane.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use grid::{CellData, GridReady, SpatialGrid};

/// Focus speed in world units per second at `REFERENCE_DISTANCE`.
const PAN_SPEED: f32 = 10.0;
const REFERENCE_DISTANCE: f32 = 25.0;
const ZOOM_STEP: f32 = 0.15;
const PIXELS_PER_LINE: f32 = 100.0;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 500.0;
/// 5 degrees.
const MIN_PITCH: f32 = std::f32::consts::PI / 36.0;
/// 85 degrees.
const MAX_PITCH: f32 = std::f32::consts::PI * 17.0 / 36.0;
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Camera orbiting a focus point at a fixed distance.
#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub focus: Vec3,
    /// Radians around +Y.
    pub yaw: f32,
    /// Radians above the ground plane, kept in `[MIN_PITCH, MAX_PITCH]`.
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 35.0_f32.to_radians(),
            distance: REFERENCE_DISTANCE,
        }
    }
}

impl OrbitCamera {
    /// Camera position on the sphere around `focus`.
    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.focus + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    /// Rotate by a mouse delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Zoom by wheel lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * (1.0 - lines * ZOOM_STEP)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Center on the grid and back off far enough to see all of it.
    pub fn frame<C: CellData>(&mut self, grid: &SpatialGrid<C>) {
        self.focus = grid.local_to_world(grid.grid_center());
        self.distance = framing_distance(grid.dimensions());
    }
}

/// Camera distance that keeps a grid of the given dimensions in view.
pub fn framing_distance(dimensions: UVec3) -> f32 {
    (dimensions.as_vec3().length() * 1.5).clamp(MIN_DISTANCE, MAX_DISTANCE)
}

/// The grid's x/z extent in world space as `(min, max)`.
pub fn grid_footprint<C: CellData>(grid: &SpatialGrid<C>) -> (Vec2, Vec2) {
    let min = grid.local_to_world(Vec3::ZERO);
    let max = grid.local_to_world(grid.dimensions().as_vec3());
    (Vec2::new(min.x, min.z), Vec2::new(max.x, max.z))
}

/// Keep `focus` over the footprint; height is left alone.
pub fn clamp_to_footprint(focus: Vec3, (min, max): (Vec2, Vec2)) -> Vec3 {
    Vec3::new(focus.x.clamp(min.x, max.x), focus.y, focus.z.clamp(min.y, max.y))
}

/// Screen-relative pan direction from WASD/arrow keys. `y` is negative for
/// "forward".
fn pan_direction(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut dir = Vec2::ZERO;
    for (a, b, step) in [
        (KeyCode::KeyW, KeyCode::ArrowUp, Vec2::NEG_Y),
        (KeyCode::KeyS, KeyCode::ArrowDown, Vec2::Y),
        (KeyCode::KeyA, KeyCode::ArrowLeft, Vec2::NEG_X),
        (KeyCode::KeyD, KeyCode::ArrowRight, Vec2::X),
    ] {
        if keys.pressed(a) || keys.pressed(b) {
            dir += step;
        }
    }
    dir.normalize_or_zero()
}

/// Turn a screen-relative direction into an x/z ground offset for a camera
/// looking from `yaw`.
pub fn ground_pan(yaw: f32, dir: Vec2) -> Vec2 {
    Vec2::from_angle(-yaw).rotate(dir)
}

fn scroll_lines(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y,
        MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((Camera3d::default(), orbit.transform()));
    commands.insert_resource(orbit);
}

/// Frame the grid whenever one becomes active.
pub fn focus_on_new_grid<C: CellData>(
    mut ready: EventReader<GridReady<C>>,
    grid: Option<Res<SpatialGrid<C>>>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if ready.read().last().is_none() {
        return;
    }
    if let Some(grid) = grid {
        orbit.frame(&*grid);
    }
}

/// `F`: frame the active grid again.
pub fn frame_grid_on_key<C: CellData>(
    keys: Res<ButtonInput<KeyCode>>,
    grid: Option<Res<SpatialGrid<C>>>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if !keys.just_pressed(KeyCode::KeyF) {
        return;
    }
    if let Some(grid) = grid {
        orbit.frame(&*grid);
    }
}

pub fn camera_pan_keyboard<C: CellData>(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    grid: Option<Res<SpatialGrid<C>>>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let dir = pan_direction(&keys);
    if dir == Vec2::ZERO {
        return;
    }
    let step = PAN_SPEED * (orbit.distance / REFERENCE_DISTANCE) * time.delta_secs();
    let offset = ground_pan(orbit.yaw, dir) * step;
    let mut focus = orbit.focus + Vec3::new(offset.x, 0.0, offset.y);
    if let Some(grid) = grid {
        focus = clamp_to_footprint(focus, grid_footprint(&*grid));
    }
    orbit.focus = focus;
}

/// Right-drag orbits around the focus.
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    if buttons.pressed(MouseButton::Right) && delta != Vec2::ZERO {
        orbit.rotate(delta);
    }
}

pub fn camera_zoom(mut wheel: EventReader<MouseWheel>, mut orbit: ResMut<OrbitCamera>) {
    let lines: f32 = wheel.read().map(scroll_lines).sum();
    if lines != 0.0 {
        orbit.zoom(lines);
    }
}

pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    for mut transform in &mut cameras {
        *transform = orbit.transform();
    }
}
