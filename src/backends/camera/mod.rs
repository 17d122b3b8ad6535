// SPDX-License-Identifier: MPL-2.0

//! V4L2 camera capability
//!
//! ```text
//! ┌─────────────────────┐
//! │   CaptureScreen     │
//! └──────────┬──────────┘
//!            │ CameraCapability
//!            ▼
//! ┌─────────────────────┐      events       ┌──────────────┐
//! │     V4l2Camera      │ ◄──────────────── │ capture      │
//! │  (settings, flash)  │ ◄── latest frame ─│ thread       │
//! └─────────────────────┘                   └──────────────┘
//! ```
//!
//! Facing selects between two configured device nodes. Changing facing or
//! the capture ratio restarts the preview stream.

pub mod convert;
pub mod device;
pub mod format;
pub mod stream;
pub mod types;

pub use device::enumerate_cameras;
pub use stream::{CameraEventReceiver, PreviewStream};
pub use types::*;

use super::{CameraCapability, PermissionStatus};
use crate::config::Config;
use crate::constants::{CaptureOptions, FLASH_PRE_FIRE, PREVIEW_CHANNEL_CAPACITY};
use crate::errors::CaptureError;
use crate::flash::FlashLeds;
use crate::storage;
use futures::channel::mpsc;
use image::codecs::jpeg::JpegEncoder;
use std::io::Write;
use tracing::{debug, info, warn};

/// Camera capability backed by V4L2 device nodes
pub struct V4l2Camera {
    front_device: String,
    back_device: String,
    settings: CameraSettings,
    flash: FlashLeds,
    stream: Option<PreviewStream>,
    events: Option<CameraEventReceiver>,
}

impl V4l2Camera {
    pub fn new(config: &Config) -> Self {
        Self {
            front_device: config.front_device.clone(),
            back_device: config.back_device.clone(),
            settings: CameraSettings {
                facing: config.default_facing,
                mirror: config.mirror_preview,
                ..CameraSettings::default()
            },
            flash: FlashLeds::discover(),
            stream: None,
            events: None,
        }
    }

    /// Device node of the active facing
    pub fn active_device(&self) -> &str {
        match self.settings.facing {
            CameraFacing::Front => &self.front_device,
            CameraFacing::Back => &self.back_device,
        }
    }

    /// Start (or restart) the preview stream on the active device
    pub fn start(&mut self) {
        self.stop();
        let (sender, receiver) = mpsc::channel(PREVIEW_CHANNEL_CAPACITY);
        let device = self.active_device().to_string();
        self.stream = Some(PreviewStream::start(&device, self.settings.ratio, sender));
        self.events = Some(receiver);
    }

    /// Stop the preview stream if running
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop();
        }
        self.events = None;
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Next pending readiness/mount event, without blocking
    pub fn poll_event(&mut self) -> Option<CameraEvent> {
        self.events.as_mut()?.try_recv().ok()
    }

    /// Latest preview frame
    pub fn latest_frame(&self) -> Option<PreviewFrame> {
        self.stream.as_ref()?.latest_frame()
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    async fn grab_frame(&mut self) -> Result<PreviewFrame, CaptureError> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| CaptureError::Device("Camera is not started".to_string()))?;

        if self.settings.flash == FlashMode::On && self.flash.is_available() {
            self.flash.all_on();
            tokio::time::sleep(FLASH_PRE_FIRE).await;
            let frame = stream.latest_frame();
            self.flash.all_off();
            frame.ok_or(CaptureError::NoFrame)
        } else {
            if self.settings.flash == FlashMode::On {
                debug!("Flash requested but no flash LED available");
            }
            stream.latest_frame().ok_or(CaptureError::NoFrame)
        }
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.stop();
    }
}

impl CameraCapability for V4l2Camera {
    async fn request_permission(&mut self) -> PermissionStatus {
        let node = self.active_device();
        match std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(node)
        {
            Ok(_) => PermissionStatus::Granted,
            Err(e) => {
                warn!(device = %node, error = %e, "Camera access denied");
                PermissionStatus::Denied
            }
        }
    }

    async fn capture(&mut self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        let frame = self.grab_frame().await?;
        let quality = options.jpeg_quality();

        // The encoder writes no EXIF segment, which is what `options.exif == false` asks for
        let (location, width, height) = tokio::task::spawn_blocking(move || {
            let capture_dir = storage::ensure_capture_directory()
                .map_err(|e| CaptureError::Encoding(e.to_string()))?;
            let location = capture_dir.join(storage::capture_file_name());

            let file = std::fs::File::create(&location)
                .map_err(|e| CaptureError::Encoding(e.to_string()))?;
            let mut writer = std::io::BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, quality)
                .encode(
                    &frame.data,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| CaptureError::Encoding(e.to_string()))?;
            writer
                .flush()
                .map_err(|e| CaptureError::Encoding(e.to_string()))?;

            Ok::<_, CaptureError>((location, frame.width, frame.height))
        })
        .await
        .map_err(|e| CaptureError::Encoding(e.to_string()))??;

        info!(path = %location.display(), width, height, quality, "Photo captured");
        Ok(CapturedPhoto {
            location,
            width,
            height,
        })
    }

    fn supports_ratio_query(&self) -> bool {
        true
    }

    async fn query_supported_ratios(&mut self, hint: &str) -> Result<Vec<String>, CaptureError> {
        let node = self.active_device().to_string();
        let sizes = tokio::task::spawn_blocking(move || device::query_frame_sizes(&node))
            .await
            .map_err(|e| CaptureError::Device(e.to_string()))??;
        let ratios = format::supported_ratios(&sizes);
        debug!(hint, ?ratios, "Supported capture ratios");
        Ok(ratios)
    }

    fn apply_settings(&mut self, settings: &CameraSettings) {
        let restart = self.stream.is_some()
            && (settings.facing != self.settings.facing || settings.ratio != self.settings.ratio);
        self.settings = *settings;
        if restart {
            info!(facing = ?settings.facing, ratio = ?settings.ratio, "Restarting camera");
            self.start();
        }
    }
}
