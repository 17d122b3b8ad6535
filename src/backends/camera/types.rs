// SPDX-License-Identifier: MPL-2.0

//! Shared types for the camera backend

use crate::constants::AspectRatio;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which physical camera is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFacing {
    /// User-facing camera
    #[default]
    Front,
    /// World-facing camera
    Back,
}

impl CameraFacing {
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }
}

/// Flash behavior on the next capture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlashMode {
    #[default]
    Off,
    /// Fire the flash LED during capture
    On,
}

impl FlashMode {
    pub fn toggled(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Off,
        }
    }
}

/// Settings pushed from the capture screen to the camera
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraSettings {
    pub facing: CameraFacing,
    pub flash: FlashMode,
    /// Mirror the live preview
    pub mirror: bool,
    /// Negotiated capture ratio, if any
    pub ratio: Option<AspectRatio>,
}

/// A still photo written by the camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Where the encoded photo lives
    pub location: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Asynchronous camera notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    /// First frame arrived, capture is possible
    Ready,
    /// Device could not be opened or streamed
    MountError(String),
}

/// Packed RGB24 preview frame
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 3` bytes, row-major, no padding
    pub data: Arc<[u8]>,
    /// Driver sequence number
    pub sequence: u32,
}

impl PreviewFrame {
    /// RGB at (x, y), clamped to the frame
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        if self.width == 0 || self.height == 0 {
            return (0, 0, 0);
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = ((y * self.width + x) * 3) as usize;
        match self.data.get(idx..idx + 3) {
            Some(px) => (px[0], px[1], px[2]),
            None => (0, 0, 0),
        }
    }
}

/// A V4L2 capture node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Device node, e.g. `/dev/video0`
    pub path: String,
    /// Card name from sysfs, falls back to the node name
    pub name: String,
}
