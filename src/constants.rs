// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Album that saved photos are appended to
pub const DEFAULT_ALBUM_NAME: &str = "MirrorCamera";

/// Application directory name used under the config and cache roots
pub const APP_DIR_NAME: &str = "mirror-camera";

/// Subdirectory of the cache root holding freshly captured photos
pub const CAPTURE_DIR_NAME: &str = "captures";

/// Default V4L2 node for the front (user-facing) camera
pub const DEFAULT_FRONT_DEVICE: &str = "/dev/video0";

/// Default V4L2 node for the back (world-facing) camera
pub const DEFAULT_BACK_DEVICE: &str = "/dev/video1";

/// Number of mmap buffers requested from the driver
pub const CAPTURE_BUFFER_COUNT: u32 = 4;

/// Capacity of the preview frame channel
pub const PREVIEW_CHANNEL_CAPACITY: usize = 4;

/// How long the flash LED stays lit before the frame is grabbed
pub const FLASH_PRE_FIRE: Duration = Duration::from_millis(150);

/// Fixed still-capture options
///
/// Not user adjustable. Quality is slightly reduced to keep encoding fast,
/// EXIF is never written, and post-processing is skipped where the platform
/// allows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Encoder quality in `0.0..=1.0`
    pub quality: f32,
    /// Whether EXIF metadata is embedded
    pub exif: bool,
    /// Skip platform post-processing of the captured frame
    pub skip_processing: bool,
}

impl CaptureOptions {
    /// JPEG quality on the 1-100 scale
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality.clamp(0.01, 1.0) * 100.0).round() as u8
    }
}

/// The capture options every photo is taken with
pub const CAPTURE_OPTIONS: CaptureOptions = CaptureOptions {
    quality: 0.8,
    exif: false,
    skip_processing: cfg!(target_os = "ios"),
};

/// Capture aspect ratios the camera can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 4:3 (sensor native on most webcams)
    Standard,
    /// 16:9
    Wide,
    /// 1:1
    Square,
}

impl AspectRatio {
    /// Ratios that may be selected when 16:9 is not offered
    pub const KNOWN_GOOD: [AspectRatio; 3] =
        [AspectRatio::Standard, AspectRatio::Wide, AspectRatio::Square];

    /// Parse the `w:h` label used by camera ratio queries
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "4:3" => Some(AspectRatio::Standard),
            "16:9" => Some(AspectRatio::Wide),
            "1:1" => Some(AspectRatio::Square),
            _ => None,
        }
    }

    /// Label in `w:h` form
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Standard => "4:3",
            AspectRatio::Wide => "16:9",
            AspectRatio::Square => "1:1",
        }
    }

    /// Width and height components of the ratio
    pub fn components(&self) -> (u32, u32) {
        match self {
            AspectRatio::Standard => (4, 3),
            AspectRatio::Wide => (16, 9),
            AspectRatio::Square => (1, 1),
        }
    }
}

/// Ratio passed as the hint to the supported-ratio query
pub const PREFERRED_RATIO: AspectRatio = AspectRatio::Wide;

/// Ratio applied when the supported-ratio query fails
pub const FALLBACK_RATIO: AspectRatio = AspectRatio::Standard;

/// One output of the icon rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconTarget {
    /// Human-readable name used in logs
    pub name: &'static str,
    /// Output file name, relative to the output directory
    pub file_name: &'static str,
    /// Edge length of the square output in pixels
    pub size: u32,
    /// Inset on every side between the canvas edge and the drawing
    pub padding: u32,
}

impl IconTarget {
    /// Edge length of the area the source is drawn into
    pub fn inner_size(&self) -> u32 {
        self.size.saturating_sub(self.padding * 2)
    }
}

/// Icon rasterizer outputs, rendered in this order
pub const ICON_TARGETS: [IconTarget; 4] = [
    IconTarget {
        name: "app icon",
        file_name: "icon.png",
        size: 1024,
        padding: 100,
    },
    IconTarget {
        name: "adaptive icon",
        file_name: "adaptive-icon.png",
        size: 1024,
        padding: 100,
    },
    IconTarget {
        name: "splash screen",
        file_name: "splash.png",
        size: 2048,
        padding: 500,
    },
    IconTarget {
        name: "favicon",
        file_name: "favicon.png",
        size: 48,
        padding: 4,
    },
];

/// Default vector source for the icon rasterizer
pub const DEFAULT_ICON_SOURCE: &str = "assets/flip-horizontal.svg";

/// Default output directory for the icon rasterizer
pub const DEFAULT_ICON_OUT_DIR: &str = "assets";
