// SPDX-License-Identifier: MPL-2.0

//! Platform capability layer
//!
//! The capture screen never talks to hardware or the file system directly.
//! Everything it needs is expressed as a narrow capability trait so the
//! controller can be driven by the Linux implementations in this module or
//! by in-memory fakes in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              CaptureScreen (app)             │
//! └──────┬───────────────┬───────────────┬──────┘
//!        │               │               │
//! ┌──────┴──────┐ ┌──────┴──────┐ ┌──────┴──────┐
//! │   Camera    │ │   Gallery   │ │    Files    │
//! │   (V4L2)    │ │ (directory) │ │ (tokio::fs) │
//! └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: V4L2 camera with preview thread, capture and ratio queries
//! - [`gallery`]: Directory-backed photo library with albums
//! - [`files`]: File inspection used by the review screen's debug action

pub mod camera;
pub mod files;
pub mod gallery;

use crate::constants::CaptureOptions;
use crate::errors::{CaptureError, SaveError};
use camera::{CameraSettings, CapturedPhoto};
use files::FileInfo;
use gallery::AssetHandle;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;

/// Outcome of a permission check or request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    /// Not asked yet
    #[default]
    Unknown,
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

/// Camera service: permission, still capture and capture-ratio queries
///
/// Readiness and mount failures are asynchronous events; they reach the
/// controller as `Message::CameraReady` / `Message::CameraMountError`.
pub trait CameraCapability {
    /// Ask for access to the camera
    fn request_permission(&mut self) -> impl Future<Output = PermissionStatus> + Send;

    /// Take a still photo and return where it was written
    fn capture(
        &mut self,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<CapturedPhoto, CaptureError>> + Send;

    /// Whether [`CameraCapability::query_supported_ratios`] is meaningful here
    fn supports_ratio_query(&self) -> bool {
        false
    }

    /// List the capture aspect ratios (`"w:h"`) the active camera offers
    fn query_supported_ratios(
        &mut self,
        hint: &str,
    ) -> impl Future<Output = Result<Vec<String>, CaptureError>> + Send;

    /// Push facing, flash, mirror and ratio to the camera
    fn apply_settings(&mut self, settings: &CameraSettings);
}

/// Photo library service
pub trait GalleryCapability {
    /// Ask for write access to the library
    fn request_permission(&mut self) -> impl Future<Output = PermissionStatus> + Send;

    /// Import the file at `location` into the library
    fn create_asset(
        &mut self,
        location: &Path,
    ) -> impl Future<Output = Result<AssetHandle, SaveError>> + Send;

    /// Put `asset` into the album `name`, creating the album if needed
    fn create_or_append_album(
        &mut self,
        name: &str,
        asset: &AssetHandle,
    ) -> impl Future<Output = Result<(), SaveError>> + Send;
}

/// File inspection (debug only)
pub trait FileInspector {
    fn stat(&self, location: &Path) -> impl Future<Output = std::io::Result<FileInfo>> + Send;
}
