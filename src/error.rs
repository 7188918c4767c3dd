//! Crate error type
//!
//! The simulation itself is total once a session has started; errors only
//! surface when validating configuration and when touching the filesystem.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Viewport width or height is not a positive finite number
    InvalidViewport { width: f32, height: f32 },
    /// Spawn margin leaves no room for a spawn column
    MarginTooWide { margin: f32, width: f32 },
    /// Ship does not fit inside the viewport, clamp range would be empty
    ShipTooWide { ship_width: f32, width: f32 },
    /// A tuning value is out of range
    InvalidTuning(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}")
            }
            Self::MarginTooWide { margin, width } => {
                write!(f, "spawn margin {margin} too wide for viewport width {width}")
            }
            Self::ShipTooWide { ship_width, width } => {
                write!(f, "ship width {ship_width} does not fit viewport width {width}")
            }
            Self::InvalidTuning(what) => write!(f, "invalid tuning: {what}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
