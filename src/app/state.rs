// SPDX-License-Identifier: GPL-3.0-only

//! Capture screen state
//!
//! [`Session`] holds the flags the screen owns. [`Screen`] is the view
//! derived from them; it is recomputed on every call so it can never
//! disagree with the session.

pub use crate::backends::PermissionStatus;
pub use crate::backends::camera::{CameraFacing, CameraSettings, CapturedPhoto, FlashMode};
use crate::config::Config;
use crate::constants::AspectRatio;
use crate::errors::Permission;

/// Permission gate of the capture screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    pub camera: PermissionStatus,
    pub gallery: PermissionStatus,
}

impl Permissions {
    /// First permission still blocking the capture view, camera first
    pub fn first_missing(&self) -> Option<Permission> {
        if !self.camera.is_granted() {
            Some(Permission::Camera)
        } else if !self.gallery.is_granted() {
            Some(Permission::Gallery)
        } else {
            None
        }
    }
}

/// State owned by one capture screen instance
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub facing: CameraFacing,
    pub flash: FlashMode,
    /// Live-preview mirroring
    pub mirror: bool,
    /// Display-only horizontal flip of preview and review image
    pub flip: bool,
    pub captured_image: Option<CapturedPhoto>,
    pub is_saving: bool,
    pub image_load_error: bool,
    pub permissions: Permissions,
    pub camera_ready: bool,
    pub selected_ratio: Option<AspectRatio>,
    pub supported_ratios: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Front, // Selfie camera first
            flash: FlashMode::Off,
            mirror: true,
            flip: false,
            captured_image: None,
            is_saving: false,
            image_load_error: false,
            permissions: Permissions::default(),
            camera_ready: false,
            selected_ratio: None,
            supported_ratios: Vec::new(),
        }
    }
}

impl Session {
    /// Fresh session using the configured defaults
    pub fn from_config(config: &Config) -> Self {
        Self {
            facing: config.default_facing,
            mirror: config.mirror_preview,
            ..Self::default()
        }
    }

    /// Settings the camera should currently run with
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            facing: self.facing,
            flash: self.flash,
            mirror: self.mirror,
            ratio: self.selected_ratio,
        }
    }
}

/// Which permission the prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPrompt {
    Camera,
    Gallery,
}

impl PermissionPrompt {
    pub fn message(&self) -> &'static str {
        match self {
            PermissionPrompt::Camera => "Permission needed to use the camera",
            PermissionPrompt::Gallery => "Gallery permission needed to save photos",
        }
    }
}

/// What the live view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveView {
    pub facing: CameraFacing,
    pub flash: FlashMode,
    /// Net horizontal flip of the preview (mirror and flip cancel out)
    pub preview_flipped: bool,
    pub camera_ready: bool,
}

/// What the review view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewView {
    pub photo: CapturedPhoto,
    /// Display the photo flipped horizontally
    pub flipped: bool,
    /// Photo could not be rendered; show the error placeholder
    pub load_error: bool,
    pub is_saving: bool,
    /// Save affordance is shown and enabled
    pub can_save: bool,
    /// Retake is always possible
    pub can_retake: bool,
    /// Debug file-inspection affordance is shown
    pub can_check_file: bool,
}

/// The one view the capture screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    AwaitingPermission(PermissionPrompt),
    LiveCapture(LiveView),
    PhotoReview(ReviewView),
}

impl Screen {
    pub fn is_live(&self) -> bool {
        matches!(self, Screen::LiveCapture(_))
    }

    pub fn is_review(&self) -> bool {
        matches!(self, Screen::PhotoReview(_))
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Blocking message the user has to acknowledge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Everything the capture screen reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Screen was shown for the first time
    Mounted,
    RequestCameraPermission,
    RequestGalleryPermission,
    /// Camera delivered its first frame
    CameraReady,
    /// Camera could not be started
    CameraMountError(String),
    ToggleFacing,
    ToggleFlash,
    ToggleMirror,
    ToggleFlip,
    Capture,
    Retake,
    Save,
    /// Review image could not be decoded or found
    ImageLoadFailed(String),
    /// Debug: report whether the captured file exists and its size
    CheckImageFile,
    /// Acknowledge the front notice
    DismissNotice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let session = Session::default();
        assert_eq!(session.facing, CameraFacing::Front);
        assert_eq!(session.flash, FlashMode::Off);
        assert!(session.mirror);
        assert!(!session.flip);
        assert!(session.captured_image.is_none());
        assert!(!session.is_saving);
        assert!(!session.image_load_error);
    }

    #[test]
    fn test_first_missing_permission() {
        let mut permissions = Permissions::default();
        assert_eq!(permissions.first_missing(), Some(Permission::Camera));
        permissions.camera = PermissionStatus::Granted;
        assert_eq!(permissions.first_missing(), Some(Permission::Gallery));
        permissions.gallery = PermissionStatus::Denied;
        assert_eq!(permissions.first_missing(), Some(Permission::Gallery));
        permissions.gallery = PermissionStatus::Granted;
        assert_eq!(permissions.first_missing(), None);
    }

    #[test]
    fn test_session_from_config() {
        let config = Config {
            default_facing: CameraFacing::Back,
            mirror_preview: false,
            ..Config::default()
        };
        let session = Session::from_config(&config);
        assert_eq!(session.facing, CameraFacing::Back);
        assert!(!session.mirror);
        assert_eq!(session.camera_settings().facing, CameraFacing::Back);
    }
}
