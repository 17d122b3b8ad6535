// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfacing at the CLI and terminal entry points
///
/// Capture, save and display failures never get here; the capture screen
/// turns them into notices.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Icon rasterizer errors
    Raster(RasterError),
    /// Configuration errors
    Config(String),
    /// Terminal or runtime I/O failure
    Io(String),
}

/// Permission kinds gating the capture screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    Gallery,
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Camera has not signalled readiness yet
    NotReady,
    /// Camera returned a photo without a location
    NoLocation,
    /// No preview frame has arrived from the device
    NoFrame,
    /// Device-level failure (open, ioctl, stream)
    Device(String),
    /// Encoding the frame to a file failed
    Encoding(String),
}

/// Gallery save errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// Asset creation failed
    Asset(String),
    /// Album creation or append failed
    Album(String),
    /// Underlying I/O failure
    Io(String),
}

/// Review image display errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// File does not exist
    Missing(String),
    /// File exists but could not be decoded
    Decode(String),
}

/// Icon rasterizer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Source could not be read
    Load(String),
    /// Source is not a valid SVG document
    Parse(String),
    /// Raster surface could not be allocated
    Surface { width: u32, height: u32 },
    /// Output could not be encoded or written
    Write(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Raster(e) => write!(f, "Icon generation error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Camera => write!(f, "camera"),
            Permission::Gallery => write!(f, "gallery"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotReady => write!(f, "Camera not ready"),
            CaptureError::NoLocation => write!(f, "No photo URI was returned"),
            CaptureError::NoFrame => write!(f, "No frame available for capture"),
            CaptureError::Device(msg) => write!(f, "Device error: {}", msg),
            CaptureError::Encoding(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Asset(msg) => write!(f, "Could not create asset: {}", msg),
            SaveError::Album(msg) => write!(f, "Could not update album: {}", msg),
            SaveError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Missing(path) => write!(f, "File not found: {}", path),
            DisplayError::Decode(msg) => write!(f, "Cannot read image: {}", msg),
        }
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::Load(msg) => write!(f, "Failed to load source: {}", msg),
            RasterError::Parse(msg) => write!(f, "Failed to parse SVG: {}", msg),
            RasterError::Surface { width, height } => {
                write!(f, "Failed to allocate {}x{} surface", width, height)
            }
            RasterError::Write(msg) => write!(f, "Failed to write PNG: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for SaveError {}
impl std::error::Error for DisplayError {}
impl std::error::Error for RasterError {}

impl From<RasterError> for AppError {
    fn from(err: RasterError) -> Self {
        AppError::Raster(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::Io(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Device(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_error_converts() {
        let err: AppError = RasterError::Load("logo.svg: not found".to_string()).into();
        assert!(matches!(err, AppError::Raster(RasterError::Load(_))));
        assert_eq!(
            err.to_string(),
            "Icon generation error: Failed to load source: logo.svg: not found"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "tty gone");
        let err: AppError = io.into();
        assert_eq!(err.to_string(), "I/O error: tty gone");
    }

    #[test]
    fn test_not_ready_message() {
        assert_eq!(CaptureError::NotReady.to_string(), "Camera not ready");
    }
}
