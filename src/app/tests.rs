// SPDX-License-Identifier: GPL-3.0-only

use super::*;
use crate::backends::camera::{CameraFacing, CameraSettings, CapturedPhoto, FlashMode};
use crate::backends::files::FileInfo;
use crate::backends::gallery::AssetHandle;
use crate::backends::PermissionStatus;
use crate::constants::{AspectRatio, CaptureOptions};
use crate::errors::{CaptureError, SaveError};
use std::path::{Path, PathBuf};

struct FakeCamera {
    permission: PermissionStatus,
    capture_result: Result<CapturedPhoto, CaptureError>,
    ratios: Option<Result<Vec<String>, CaptureError>>,
    capture_calls: usize,
    applied: Vec<CameraSettings>,
}

impl FakeCamera {
    fn new() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            capture_result: Ok(photo("/tmp/IMG_1.jpg")),
            ratios: None,
            capture_calls: 0,
            applied: Vec::new(),
        }
    }
}

impl CameraCapability for FakeCamera {
    async fn request_permission(&mut self) -> PermissionStatus {
        self.permission
    }

    async fn capture(&mut self, _options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        self.capture_calls += 1;
        self.capture_result.clone()
    }

    fn supports_ratio_query(&self) -> bool {
        self.ratios.is_some()
    }

    async fn query_supported_ratios(&mut self, _hint: &str) -> Result<Vec<String>, CaptureError> {
        self.ratios
            .clone()
            .unwrap_or_else(|| Err(CaptureError::Device("unsupported".to_string())))
    }

    fn apply_settings(&mut self, settings: &CameraSettings) {
        self.applied.push(*settings);
    }
}

struct FakeGallery {
    permission: PermissionStatus,
    permission_requests: usize,
    fail_album: bool,
    assets: Vec<PathBuf>,
    albums: Vec<String>,
}

impl FakeGallery {
    fn new() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            permission_requests: 0,
            fail_album: false,
            assets: Vec::new(),
            albums: Vec::new(),
        }
    }
}

impl GalleryCapability for FakeGallery {
    async fn request_permission(&mut self) -> PermissionStatus {
        self.permission_requests += 1;
        self.permission
    }

    async fn create_asset(&mut self, location: &Path) -> Result<AssetHandle, SaveError> {
        self.assets.push(location.to_path_buf());
        Ok(AssetHandle {
            id: uuid::Uuid::new_v4(),
            path: location.to_path_buf(),
        })
    }

    async fn create_or_append_album(
        &mut self,
        name: &str,
        _asset: &AssetHandle,
    ) -> Result<(), SaveError> {
        if self.fail_album {
            return Err(SaveError::Album("disk full".to_string()));
        }
        self.albums.push(name.to_string());
        Ok(())
    }
}

struct FakeFiles {
    size: Option<u64>,
    exists: bool,
}

impl FileInspector for FakeFiles {
    async fn stat(&self, _location: &Path) -> std::io::Result<FileInfo> {
        Ok(FileInfo {
            exists: self.exists,
            size: self.size,
        })
    }
}

type TestScreen = CaptureScreen<FakeCamera, FakeGallery, FakeFiles>;

fn photo(path: &str) -> CapturedPhoto {
    CapturedPhoto {
        location: PathBuf::from(path),
        width: 1280,
        height: 720,
    }
}

fn test_config() -> Config {
    Config {
        debug_tools: true,
        ..Config::default()
    }
}

fn new_screen() -> TestScreen {
    CaptureScreen::new(
        FakeCamera::new(),
        FakeGallery::new(),
        FakeFiles {
            size: Some(2048),
            exists: true,
        },
        &test_config(),
    )
}

/// Screen with both permissions granted and the camera ready
async fn live_screen() -> TestScreen {
    let mut screen = new_screen();
    screen.update(Message::Mounted).await;
    screen.update(Message::RequestCameraPermission).await;
    screen.update(Message::CameraReady).await;
    assert!(screen.screen().is_live());
    screen
}

async fn review_screen() -> TestScreen {
    let mut screen = live_screen().await;
    screen.update(Message::Capture).await;
    assert!(screen.screen().is_review());
    screen
}

fn flags(screen: &TestScreen) -> (CameraFacing, FlashMode, bool, bool) {
    let s = screen.session();
    (s.facing, s.flash, s.mirror, s.flip)
}

#[tokio::test]
async fn test_starts_awaiting_camera_permission() {
    let mut screen = new_screen();
    assert_eq!(
        screen.screen(),
        Screen::AwaitingPermission(PermissionPrompt::Camera)
    );

    screen.update(Message::Mounted).await;
    screen.update(Message::Mounted).await;
    assert_eq!(screen.gallery().permission_requests, 1);
    assert_eq!(
        screen.screen(),
        Screen::AwaitingPermission(PermissionPrompt::Camera)
    );
}

#[tokio::test]
async fn test_live_requires_both_permissions() {
    let mut screen = new_screen();
    screen.camera_mut().permission = PermissionStatus::Denied;
    screen.update(Message::RequestCameraPermission).await;
    assert_eq!(
        screen.screen(),
        Screen::AwaitingPermission(PermissionPrompt::Camera)
    );

    screen.camera_mut().permission = PermissionStatus::Granted;
    screen.update(Message::RequestCameraPermission).await;
    assert_eq!(
        screen.screen(),
        Screen::AwaitingPermission(PermissionPrompt::Gallery)
    );

    screen.update(Message::RequestGalleryPermission).await;
    assert!(screen.screen().is_live());
}

#[tokio::test]
async fn test_toggles_commute() {
    let mut a = live_screen().await;
    let mut b = live_screen().await;

    for message in [
        Message::ToggleFacing,
        Message::ToggleFlash,
        Message::ToggleFlip,
        Message::ToggleMirror,
        Message::ToggleFlip,
        Message::ToggleFlip,
    ] {
        a.update(message).await;
    }
    for message in [
        Message::ToggleFlip,
        Message::ToggleMirror,
        Message::ToggleFlip,
        Message::ToggleFlash,
        Message::ToggleFlip,
        Message::ToggleFacing,
    ] {
        b.update(message).await;
    }

    assert_eq!(flags(&a), flags(&b));
    assert_eq!(flags(&a), (CameraFacing::Back, FlashMode::On, false, true));

    // Settings reached the camera, flip stays local
    let last = a.camera().applied.last().copied().unwrap();
    assert_eq!(last.facing, CameraFacing::Back);
    assert_eq!(last.flash, FlashMode::On);
    assert!(!last.mirror);
}

#[tokio::test]
async fn test_mirror_and_flip_are_independent() {
    let mut screen = live_screen().await;
    screen.update(Message::ToggleFlip).await;
    assert!(screen.session().mirror);
    assert!(screen.session().flip);

    match screen.screen() {
        Screen::LiveCapture(view) => assert!(!view.preview_flipped),
        other => panic!("unexpected screen {:?}", other),
    }
}

#[tokio::test]
async fn test_capture_before_ready_reports_error() {
    let mut screen = new_screen();
    screen.update(Message::Mounted).await;
    screen.update(Message::RequestCameraPermission).await;

    screen.update(Message::Capture).await;

    assert!(screen.screen().is_live());
    assert_eq!(screen.camera().capture_calls, 0);
    let notice = screen.current_notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Camera not ready, please try again.");
}

#[tokio::test]
async fn test_capture_success_enters_review() {
    let mut screen = live_screen().await;
    assert_eq!(
        flags(&screen),
        (CameraFacing::Front, FlashMode::Off, true, false)
    );

    screen.update(Message::Capture).await;

    match screen.screen() {
        Screen::PhotoReview(view) => {
            assert_eq!(view.photo.location, PathBuf::from("/tmp/IMG_1.jpg"));
            assert!(!view.is_saving);
            assert!(!view.load_error);
            assert!(view.can_save);
        }
        other => panic!("unexpected screen {:?}", other),
    }
    assert!(screen.current_notice().is_none());
}

#[tokio::test]
async fn test_capture_failure_stays_live() {
    let mut screen = live_screen().await;
    screen.camera_mut().capture_result = Err(CaptureError::Device("EBUSY".to_string()));

    screen.update(Message::Capture).await;

    assert!(screen.screen().is_live());
    assert!(screen.session().captured_image.is_none());
    let notice = screen.current_notice().unwrap();
    assert!(
        notice
            .message
            .starts_with("An error occurred while taking the photo:")
    );
    assert!(notice.message.contains("EBUSY"));
}

#[tokio::test]
async fn test_capture_without_location_fails() {
    let mut screen = live_screen().await;
    screen.camera_mut().capture_result = Ok(photo(""));

    screen.update(Message::Capture).await;

    assert!(screen.screen().is_live());
    assert!(
        screen
            .current_notice()
            .unwrap()
            .message
            .contains("No photo URI was returned")
    );
}

#[tokio::test]
async fn test_retake_returns_to_live_after_save() {
    let mut screen = review_screen().await;
    screen.update(Message::Save).await;
    screen.update(Message::Retake).await;

    assert!(screen.screen().is_live());
    assert!(screen.session().captured_image.is_none());
}

#[tokio::test]
async fn test_save_without_photo_is_noop() {
    let mut screen = live_screen().await;
    screen.update(Message::Save).await;

    assert!(screen.gallery().assets.is_empty());
    assert!(screen.current_notice().is_none());
}

#[tokio::test]
async fn test_save_without_gallery_permission() {
    let mut screen = review_screen().await;
    screen.gallery.permission = PermissionStatus::Denied;
    screen.update(Message::RequestGalleryPermission).await;

    screen.update(Message::Save).await;

    assert!(screen.gallery().assets.is_empty());
    assert!(!screen.session().is_saving);
    let notice = screen.current_notice().unwrap();
    assert_eq!(notice.title, "Permission needed");
}

#[tokio::test]
async fn test_save_ignored_while_saving() {
    let mut screen = review_screen().await;
    screen.session.is_saving = true;

    screen.update(Message::Save).await;

    assert!(screen.gallery().assets.is_empty());
    assert!(screen.session().is_saving);
}

#[tokio::test]
async fn test_save_writes_asset_then_album() {
    let mut screen = review_screen().await;
    screen.update(Message::ToggleFlip).await; // ignored in review
    screen.update(Message::Save).await;

    assert_eq!(
        screen.gallery().assets,
        vec![PathBuf::from("/tmp/IMG_1.jpg")]
    );
    assert_eq!(screen.gallery().albums, vec!["MirrorCamera".to_string()]);
    assert!(screen.screen().is_review());
    assert!(!screen.session().is_saving);
    let notice = screen.current_notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Photo saved to gallery.");
}

#[tokio::test]
async fn test_save_failure_stays_in_review() {
    let mut screen = review_screen().await;
    screen.gallery.fail_album = true;

    screen.update(Message::Save).await;

    assert!(screen.screen().is_review());
    assert!(!screen.session().is_saving);
    let notice = screen.current_notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "An error occurred while saving the photo.");
}

#[tokio::test]
async fn test_image_load_error_disables_save_only() {
    let mut screen = review_screen().await;
    screen
        .update(Message::ImageLoadFailed("corrupt JPEG".to_string()))
        .await;

    match screen.screen() {
        Screen::PhotoReview(view) => {
            assert!(view.load_error);
            assert!(!view.can_save);
            assert!(view.can_retake);
        }
        other => panic!("unexpected screen {:?}", other),
    }

    screen.update(Message::Save).await;
    assert!(screen.gallery().assets.is_empty());

    screen.update(Message::Retake).await;
    assert!(screen.screen().is_live());
    assert!(!screen.session().image_load_error);
}

#[tokio::test]
async fn test_ratio_negotiation_prefers_wide() {
    let mut screen = new_screen();
    screen.camera_mut().ratios = Some(Ok(vec!["4:3".to_string(), "16:9".to_string()]));
    screen.update(Message::CameraReady).await;

    assert_eq!(screen.session().selected_ratio, Some(AspectRatio::Wide));
    assert_eq!(screen.session().supported_ratios.len(), 2);
    assert_eq!(
        screen.camera().applied.last().unwrap().ratio,
        Some(AspectRatio::Wide)
    );
}

#[tokio::test]
async fn test_ratio_query_failure_falls_back() {
    let mut screen = new_screen();
    screen.camera_mut().ratios = Some(Err(CaptureError::Device("ioctl".to_string())));
    screen.update(Message::CameraReady).await;

    assert_eq!(screen.session().selected_ratio, Some(AspectRatio::Standard));
    assert!(screen.current_notice().is_none());

    // Restarted stream reports ready; the fallback is already applied
    screen.update(Message::CameraReady).await;
    assert!(screen.session().camera_ready);
    assert_eq!(screen.camera().applied.len(), 1);
}

#[tokio::test]
async fn test_ratio_change_requires_new_ready() {
    let mut screen = live_screen().await;
    screen.camera_mut().ratios = Some(Ok(vec!["16:9".to_string()]));
    screen.update(Message::CameraReady).await;
    assert!(!screen.session().camera_ready);

    // Capture during the restart reports not ready instead of reaching the camera
    screen.update(Message::Capture).await;
    assert_eq!(screen.camera().capture_calls, 0);
    assert_eq!(
        screen.current_notice().unwrap().message,
        "Camera not ready, please try again."
    );

    screen.update(Message::CameraReady).await;
    assert!(screen.session().camera_ready);
    assert_eq!(screen.camera().applied.len(), 1);

    screen.update(Message::Capture).await;
    assert_eq!(screen.camera().capture_calls, 1);
    assert!(screen.screen().is_review());
}

#[tokio::test]
async fn test_ratio_negotiation_skipped_without_support() {
    let mut screen = new_screen();
    screen.update(Message::CameraReady).await;

    assert_eq!(screen.session().selected_ratio, None);
    assert!(screen.camera().applied.is_empty());
}

#[tokio::test]
async fn test_facing_toggle_requires_new_ready() {
    let mut screen = live_screen().await;
    screen.update(Message::ToggleFacing).await;
    assert!(!screen.session().camera_ready);

    screen.update(Message::Capture).await;
    assert_eq!(screen.camera().capture_calls, 0);
}

#[tokio::test]
async fn test_mount_error_notice() {
    let mut screen = live_screen().await;
    screen
        .update(Message::CameraMountError("device busy".to_string()))
        .await;

    assert!(screen.screen().is_live());
    assert!(!screen.session().camera_ready);
    let notice = screen.current_notice().unwrap();
    assert_eq!(notice.title, "Camera Error");
    assert_eq!(notice.message, "Could not start camera: device busy");
}

#[tokio::test]
async fn test_check_image_file_reports_size() {
    let mut screen = review_screen().await;
    screen.update(Message::CheckImageFile).await;
    assert_eq!(
        screen.current_notice().unwrap().message,
        "Photo file exists. Size: 2.00 KB"
    );

    screen.update(Message::DismissNotice).await;
    assert!(screen.current_notice().is_none());

    screen.files.exists = false;
    screen.update(Message::CheckImageFile).await;
    assert_eq!(
        screen.current_notice().unwrap().message,
        "Photo file not found."
    );
}

#[tokio::test]
async fn test_notices_queue_in_order() {
    let mut screen = live_screen().await;
    screen
        .update(Message::CameraMountError("first".to_string()))
        .await;
    screen.update(Message::Capture).await;
    assert_eq!(screen.pending_notices(), 2);

    screen.update(Message::DismissNotice).await;
    assert_eq!(
        screen.current_notice().unwrap().message,
        "Camera not ready, please try again."
    );
}
