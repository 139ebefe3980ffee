// src/error.rs
//! Error types for FakeGPS

use std::fmt;

pub type Result<T> = std::result::Result<T, FakeGpsError>;

#[derive(Debug)]
pub enum FakeGpsError {
    /// Sensor root, device entry or stored value is absent
    NotFound(String),
    /// The configuration store failed for a reason other than absence
    Store(String),
    /// A coordinate that cannot be written (non-finite or out of range)
    InvalidValue(String),
    Parse(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    #[cfg(windows)]
    Windows(windows::core::Error),
    #[cfg(feature = "gui")]
    Gui(eframe::Error),
    Other(String),
}

impl FakeGpsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FakeGpsError::NotFound(_))
    }
}

impl fmt::Display for FakeGpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FakeGpsError::NotFound(msg) => write!(f, "Not found: {}", msg),
            FakeGpsError::Store(msg) => write!(f, "Store error: {}", msg),
            FakeGpsError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            FakeGpsError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FakeGpsError::Io(e) => write!(f, "IO error: {}", e),
            FakeGpsError::Json(e) => write!(f, "JSON error: {}", e),
            #[cfg(windows)]
            FakeGpsError::Windows(e) => write!(f, "Windows error: {}", e),
            #[cfg(feature = "gui")]
            FakeGpsError::Gui(e) => write!(f, "GUI error: {}", e),
            FakeGpsError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for FakeGpsError {}

impl From<std::io::Error> for FakeGpsError {
    fn from(error: std::io::Error) -> Self {
        FakeGpsError::Io(error)
    }
}

impl From<serde_json::Error> for FakeGpsError {
    fn from(error: serde_json::Error) -> Self {
        FakeGpsError::Json(error)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for FakeGpsError {
    fn from(error: windows::core::Error) -> Self {
        FakeGpsError::Windows(error)
    }
}

#[cfg(feature = "gui")]
impl From<eframe::Error> for FakeGpsError {
    fn from(error: eframe::Error) -> Self {
        FakeGpsError::Gui(error)
    }
}

impl From<anyhow::Error> for FakeGpsError {
    fn from(error: anyhow::Error) -> Self {
        FakeGpsError::Other(error.to_string())
    }
}
