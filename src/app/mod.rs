// SPDX-License-Identifier: GPL-3.0-only

//! Capture screen controller
//!
//! The screen shows exactly one of three views: a permission prompt, the
//! live camera, or the review of a captured photo. User intents arrive as
//! [`Message`]s and are turned into calls on the camera, gallery and file
//! capabilities. Every call is awaited before the next message is handled.

mod handlers;
pub mod state;
mod update;

#[cfg(test)]
mod tests;

pub use handlers::capture::negotiate_ratio;
pub use state::{
    LiveView, Message, Notice, NoticeKind, PermissionPrompt, Permissions, ReviewView, Screen,
    Session,
};

use crate::backends::{CameraCapability, FileInspector, GalleryCapability};
use crate::config::Config;
use std::collections::VecDeque;

/// Capture screen over a camera, a gallery and a file inspector
pub struct CaptureScreen<C, G, F> {
    camera: C,
    gallery: G,
    files: F,
    session: Session,
    notices: VecDeque<Notice>,
    album_name: String,
    debug_tools: bool,
    mounted: bool,
}

impl<C, G, F> CaptureScreen<C, G, F>
where
    C: CameraCapability,
    G: GalleryCapability,
    F: FileInspector,
{
    pub fn new(camera: C, gallery: G, files: F, config: &Config) -> Self {
        Self {
            camera,
            gallery,
            files,
            session: Session::from_config(config),
            notices: VecDeque::new(),
            album_name: config.album_name.clone(),
            debug_tools: config.debug_tools,
            mounted: false,
        }
    }

    /// The view to render for the current state
    pub fn screen(&self) -> Screen {
        let session = &self.session;

        if let Some(missing) = session.permissions.first_missing() {
            return Screen::AwaitingPermission(match missing {
                crate::errors::Permission::Camera => PermissionPrompt::Camera,
                crate::errors::Permission::Gallery => PermissionPrompt::Gallery,
            });
        }

        match &session.captured_image {
            Some(photo) => Screen::PhotoReview(ReviewView {
                photo: photo.clone(),
                flipped: session.flip,
                load_error: session.image_load_error,
                is_saving: session.is_saving,
                can_save: !session.image_load_error && !session.is_saving,
                can_retake: true,
                can_check_file: self.debug_tools,
            }),
            None => Screen::LiveCapture(LiveView {
                facing: session.facing,
                flash: session.flash,
                preview_flipped: session.mirror != session.flip,
                camera_ready: session.camera_ready,
            }),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Notice the user has to acknowledge next
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    pub fn gallery(&self) -> &G {
        &self.gallery
    }

    pub fn album_name(&self) -> &str {
        &self.album_name
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }
}
