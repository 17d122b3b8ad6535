// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles camera readiness (including capture ratio negotiation), mount
//! failures, and taking the photo.

use crate::app::CaptureScreen;
use crate::app::state::Notice;
use crate::backends::{CameraCapability, FileInspector, GalleryCapability};
use crate::constants::{AspectRatio, CAPTURE_OPTIONS, FALLBACK_RATIO, PREFERRED_RATIO};
use crate::errors::CaptureError;
use tracing::{error, info, warn};

/// Choose a capture ratio from what the camera reports
///
/// 16:9 wins when offered. Otherwise the first reported ratio is used if it
/// is one of the known-good ratios; anything else leaves the camera default.
pub fn negotiate_ratio(supported: &[String]) -> Option<AspectRatio> {
    if supported.iter().any(|r| r == PREFERRED_RATIO.label()) {
        return Some(PREFERRED_RATIO);
    }
    supported
        .first()
        .and_then(|first| AspectRatio::from_label(first))
        .filter(|ratio| AspectRatio::KNOWN_GOOD.contains(ratio))
}

impl<C, G, F> CaptureScreen<C, G, F>
where
    C: CameraCapability,
    G: GalleryCapability,
    F: FileInspector,
{
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    pub(crate) async fn handle_camera_ready(&mut self) {
        info!("Camera ready");
        self.session.camera_ready = true;

        if !self.camera.supports_ratio_query() {
            return;
        }

        let previous = self.session.selected_ratio;
        match self
            .camera
            .query_supported_ratios(PREFERRED_RATIO.label())
            .await
        {
            Ok(ratios) => {
                info!(?ratios, "Supported ratios");
                if let Some(ratio) = negotiate_ratio(&ratios) {
                    self.session.selected_ratio = Some(ratio);
                }
                self.session.supported_ratios = ratios;
            }
            Err(e) => {
                warn!(error = %e, fallback = FALLBACK_RATIO.label(), "Error getting supported ratios");
                self.session.selected_ratio = Some(FALLBACK_RATIO);
            }
        }

        if self.session.selected_ratio != previous {
            info!(ratio = ?self.session.selected_ratio, "Capture ratio selected");
            // The stream restarts with the new ratio and reports ready again
            self.session.camera_ready = false;
            let settings = self.session.camera_settings();
            self.camera.apply_settings(&settings);
        }
    }

    pub(crate) fn handle_camera_mount_error(&mut self, reason: String) {
        error!(reason = %reason, "Camera mount error");
        self.session.camera_ready = false;
        self.push_notice(Notice::error(
            "Camera Error",
            format!("Could not start camera: {}", reason),
        ));
    }

    pub(crate) async fn handle_capture(&mut self) {
        if !self.screen().is_live() {
            warn!("Capture requested outside the live view");
            return;
        }

        if !self.session.camera_ready {
            let e = CaptureError::NotReady;
            error!(error = %e, "Capture refused");
            self.push_notice(Notice::error(
                "Error",
                format!("{}, please try again.", e),
            ));
            return;
        }

        info!("Taking picture...");
        let result = self
            .camera
            .capture(&CAPTURE_OPTIONS)
            .await
            .and_then(|photo| {
                if photo.location.as_os_str().is_empty() {
                    Err(CaptureError::NoLocation)
                } else {
                    Ok(photo)
                }
            });

        match result {
            Ok(photo) => {
                info!(
                    path = %photo.location.display(),
                    width = photo.width,
                    height = photo.height,
                    "Picture taken successfully"
                );
                self.session.captured_image = Some(photo);
                self.session.image_load_error = false;
                // Preview is not shown during review
                self.session.camera_ready = false;
            }
            Err(e) => {
                error!(error = %e, "Could not take photo");
                self.push_notice(Notice::error(
                    "Error",
                    format!("An error occurred while taking the photo: {}", e),
                ));
            }
        }
    }
}
