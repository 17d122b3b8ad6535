// SPDX-License-Identifier: GPL-3.0-only

//! Review screen handlers
//!
//! Handles saving to the gallery, retaking, review image failures and the
//! debug file check.

use crate::app::CaptureScreen;
use crate::app::state::Notice;
use crate::backends::{CameraCapability, FileInspector, GalleryCapability};
use crate::errors::SaveError;
use tracing::{debug, error, info, warn};

impl<C, G, F> CaptureScreen<C, G, F>
where
    C: CameraCapability,
    G: GalleryCapability,
    F: FileInspector,
{
    // =========================================================================
    // Review Handlers
    // =========================================================================

    pub(crate) fn handle_retake(&mut self) {
        if self.session.captured_image.take().is_some() {
            info!("Discarding captured photo");
        }
        self.session.image_load_error = false;
    }

    /// Save the captured photo to the gallery album
    ///
    /// Guarded in the handler itself: a second save while one is in flight,
    /// a save without a photo, or a save after the photo failed to load
    /// issue no gallery call.
    pub(crate) async fn handle_save(&mut self) {
        if self.session.is_saving {
            debug!("Save already in progress, ignoring");
            return;
        }

        let Some(photo) = self.session.captured_image.clone() else {
            debug!("Nothing to save");
            return;
        };

        if self.session.image_load_error {
            debug!("Photo failed to load, save disabled");
            return;
        }

        if !self.session.permissions.gallery.is_granted() {
            warn!("Save requested without gallery permission");
            self.push_notice(Notice::error(
                "Permission needed",
                "Gallery permission needed to save photos",
            ));
            return;
        }

        if self.session.flip {
            // Flip is a display transform; the saved file keeps the captured pixels
            debug!("Saving unflipped original");
        }

        self.session.is_saving = true;
        let album = self.album_name.clone();
        let result: Result<(), SaveError> = async {
            let asset = self.gallery.create_asset(&photo.location).await?;
            self.gallery.create_or_append_album(&album, &asset).await
        }
        .await;
        self.session.is_saving = false;

        match result {
            Ok(()) => {
                info!(path = %photo.location.display(), album = %album, "Photo saved to gallery");
                self.push_notice(Notice::success("Success", "Photo saved to gallery."));
            }
            Err(e) => {
                error!(error = %e, "Could not save photo");
                self.push_notice(Notice::error(
                    "Error",
                    "An error occurred while saving the photo.",
                ));
            }
        }
    }

    pub(crate) fn handle_image_load_failed(&mut self, reason: String) {
        if self.session.captured_image.is_none() {
            return;
        }
        error!(reason = %reason, "Image loading error");
        self.session.image_load_error = true;
    }

    pub(crate) async fn handle_check_image_file(&mut self) {
        if !self.debug_tools {
            return;
        }
        let Some(photo) = self.session.captured_image.clone() else {
            return;
        };

        match self.files.stat(&photo.location).await {
            Ok(info) if info.exists => {
                debug!(path = %photo.location.display(), ?info, "Image file info");
                self.push_notice(Notice::info(
                    "File Exists",
                    format!("Photo file exists. Size: {}", info.size_kb_label()),
                ));
            }
            Ok(_) => {
                self.push_notice(Notice::error("Error", "Photo file not found."));
            }
            Err(e) => {
                error!(error = %e, "Error during file check");
                self.push_notice(Notice::error(
                    "Error",
                    "An error occurred during file check.",
                ));
            }
        }
    }
}
