// ---------------------------------------------------------------------------
// SettingsError: typed errors for loading grid settings
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while loading or validating `GridSettings`.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),
    /// The settings file is not valid JSON or has the wrong shape.
    Parse(String),
    /// Settings could not be written out as JSON.
    Encode(String),
    /// A cell size component is zero, negative, or not finite.
    InvalidCellSize { axis: char, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {e}"),
            SettingsError::Parse(msg) => write!(f, "Parse error: {msg}"),
            SettingsError::Encode(msg) => write!(f, "Encode error: {msg}"),
            SettingsError::InvalidCellSize { axis, value } => {
                write!(f, "Invalid cell size on {axis} axis: {value} (must be > 0)")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

/// Decoding failures. Encoding maps its errors to `Encode` explicitly.
impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e.to_string())
    }
}
