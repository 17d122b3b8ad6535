// SPDX-License-Identifier: GPL-3.0-only

//! Permission handlers

use crate::app::CaptureScreen;
use crate::app::state::PermissionStatus;
use crate::backends::{CameraCapability, FileInspector, GalleryCapability};
use tracing::{info, warn};

impl<C, G, F> CaptureScreen<C, G, F>
where
    C: CameraCapability,
    G: GalleryCapability,
    F: FileInspector,
{
    // =========================================================================
    // Permission Handlers
    // =========================================================================

    /// First display: ask for gallery access once if nobody has asked yet
    pub(crate) async fn handle_mounted(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if self.session.permissions.gallery == PermissionStatus::Unknown {
            self.handle_request_gallery_permission().await;
        }
    }

    pub(crate) async fn handle_request_camera_permission(&mut self) {
        let status = self.camera.request_permission().await;
        match status {
            PermissionStatus::Granted => info!("Camera permission granted"),
            _ => warn!(?status, "Camera permission not granted"),
        }
        self.session.permissions.camera = status;
    }

    pub(crate) async fn handle_request_gallery_permission(&mut self) {
        let status = self.gallery.request_permission().await;
        match status {
            PermissionStatus::Granted => info!("Gallery permission granted"),
            _ => warn!(?status, "Gallery permission not granted"),
        }
        self.session.permissions.gallery = status;
    }
}
