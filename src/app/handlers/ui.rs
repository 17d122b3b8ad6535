// SPDX-License-Identifier: GPL-3.0-only

//! Toggle and notice handlers
//!
//! Toggles only change local state and push the resulting settings to the
//! camera. They are ignored outside the live view.

use crate::app::CaptureScreen;
use crate::backends::{CameraCapability, FileInspector, GalleryCapability};
use tracing::debug;

impl<C, G, F> CaptureScreen<C, G, F>
where
    C: CameraCapability,
    G: GalleryCapability,
    F: FileInspector,
{
    // =========================================================================
    // Toggle Handlers
    // =========================================================================

    fn toggles_allowed(&self) -> bool {
        let live = self.screen().is_live();
        if !live {
            debug!("Ignoring toggle outside the live view");
        }
        live
    }

    fn push_camera_settings(&mut self) {
        let settings = self.session.camera_settings();
        self.camera.apply_settings(&settings);
    }

    pub(crate) fn handle_toggle_facing(&mut self) {
        if !self.toggles_allowed() {
            return;
        }
        self.session.facing = self.session.facing.toggled();
        // The other sensor has to report ready on its own
        self.session.camera_ready = false;
        debug!(facing = ?self.session.facing, "Camera facing toggled");
        self.push_camera_settings();
    }

    pub(crate) fn handle_toggle_flash(&mut self) {
        if !self.toggles_allowed() {
            return;
        }
        self.session.flash = self.session.flash.toggled();
        debug!(flash = ?self.session.flash, "Flash toggled");
        self.push_camera_settings();
    }

    pub(crate) fn handle_toggle_mirror(&mut self) {
        if !self.toggles_allowed() {
            return;
        }
        self.session.mirror = !self.session.mirror;
        debug!(mirror = self.session.mirror, "Mirror toggled");
        self.push_camera_settings();
    }

    pub(crate) fn handle_toggle_flip(&mut self) {
        if !self.toggles_allowed() {
            return;
        }
        self.session.flip = !self.session.flip;
        debug!(flip = self.session.flip, "Flip toggled");
    }

    // =========================================================================
    // Notice Handlers
    // =========================================================================

    pub(crate) fn handle_dismiss_notice(&mut self) {
        self.notices.pop_front();
    }
}
