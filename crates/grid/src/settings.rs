//! Grid configuration: dimensions and per-axis cell size.
//!
//! `GridSettings` is read once when a grid anchor is registered. Editing it
//! afterwards has no effect on an already-built `SpatialGrid` (there is no
//! rebuild path). Settings can also be loaded from a JSON file; missing fields
//! fall back to the defaults in `config`.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_CELL_SIZE, DEFAULT_DIMENSIONS};
use crate::settings_error::SettingsError;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Number of cells along x, y, z. A zero vector resolves to the default.
    pub dimensions: UVec3,
    /// Per-axis scale applied by the position-to-cell conversions.
    pub cell_size: Vec3,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// On-disk shape of the settings file.
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
struct SettingsFile {
    dimensions: Option<[u32; 3]>,
    cell_size: Option<[f32; 3]>,
}

impl GridSettings {
    pub fn new(dimensions: UVec3, cell_size: Vec3) -> Self {
        Self {
            dimensions,
            cell_size,
        }
    }

    /// Dimensions actually used for allocation: the zero vector maps to the default.
    pub fn resolved_dimensions(&self) -> UVec3 {
        if self.dimensions == UVec3::ZERO {
            DEFAULT_DIMENSIONS
        } else {
            self.dimensions
        }
    }

    /// Reject cell sizes that would make cell conversions meaningless.
    ///
    /// The grid itself never calls this; conversions stay unguarded.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (axis, value) in [
            ('x', self.cell_size.x),
            ('y', self.cell_size.y),
            ('z', self.cell_size.z),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidCellSize { axis, value });
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = serde_json::from_str(json)?;
        let settings = Self {
            dimensions: file
                .dimensions
                .map(UVec3::from_array)
                .unwrap_or(DEFAULT_DIMENSIONS),
            cell_size: file
                .cell_size
                .map(Vec3::from_array)
                .unwrap_or(DEFAULT_CELL_SIZE),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        let file = SettingsFile {
            dimensions: Some(self.dimensions.to_array()),
            cell_size: Some(self.cell_size.to_array()),
        };
        serde_json::to_string_pretty(&file).map_err(|e| SettingsError::Encode(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load settings from `path`, logging a warning and returning the
    /// defaults on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                info!(
                    "Loaded grid settings from {}: {:?} cells, cell size {:?}",
                    path.display(),
                    settings.dimensions,
                    settings.cell_size
                );
                settings
            }
            Err(e) => {
                warn!(
                    "Failed to load grid settings from {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
