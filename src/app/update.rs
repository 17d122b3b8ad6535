// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` is a dispatcher; the handlers live in the `handlers`
//! submodules, grouped by what they touch:
//!
//! - `handlers::permissions`: permission prompts and mount
//! - `handlers::capture`: readiness, ratio negotiation, taking the photo
//! - `handlers::gallery`: save, retake, review image errors, file check
//! - `handlers::ui`: toggles and notices

use crate::app::CaptureScreen;
use crate::app::state::Message;
use crate::backends::{CameraCapability, FileInspector, GalleryCapability};
use tracing::debug;

impl<C, G, F> CaptureScreen<C, G, F>
where
    C: CameraCapability,
    G: GalleryCapability,
    F: FileInspector,
{
    /// Handle one message to completion
    pub async fn update(&mut self, message: Message) {
        debug!(?message, "Capture screen message");

        match message {
            // ===== Permissions =====
            Message::Mounted => self.handle_mounted().await,
            Message::RequestCameraPermission => self.handle_request_camera_permission().await,
            Message::RequestGalleryPermission => self.handle_request_gallery_permission().await,

            // ===== Camera =====
            Message::CameraReady => self.handle_camera_ready().await,
            Message::CameraMountError(reason) => self.handle_camera_mount_error(reason),
            Message::Capture => self.handle_capture().await,

            // ===== Toggles =====
            Message::ToggleFacing => self.handle_toggle_facing(),
            Message::ToggleFlash => self.handle_toggle_flash(),
            Message::ToggleMirror => self.handle_toggle_mirror(),
            Message::ToggleFlip => self.handle_toggle_flip(),

            // ===== Review =====
            Message::Retake => self.handle_retake(),
            Message::Save => self.handle_save().await,
            Message::ImageLoadFailed(reason) => self.handle_image_load_failed(reason),
            Message::CheckImageFile => self.handle_check_image_file().await,

            // ===== Notices =====
            Message::DismissNotice => self.handle_dismiss_notice(),
        }
    }
}
