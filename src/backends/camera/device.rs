// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 device discovery and format queries

use super::convert::SUPPORTED_FOURCCS;
use super::types::CameraDevice;
use std::io;
use tracing::debug;
use v4l::prelude::*;
use v4l::video::Capture;

/// Sizes probed when a driver reports a stepwise frame size range
const STEPWISE_PROBES: [(u32, u32); 5] = [
    (1920, 1080),
    (1280, 720),
    (1024, 768),
    (720, 720),
    (640, 480),
];

/// Scan `/dev/video*` for capture nodes
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    let entries = match std::fs::read_dir("/dev") {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut cameras = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        if !name_str.starts_with("video") {
            continue;
        }

        let path = format!("/dev/{}", name_str);

        // Metadata nodes share the video* prefix but expose no capture formats
        let has_formats = Device::with_path(&path)
            .and_then(|dev| dev.enum_formats())
            .map(|formats| !formats.is_empty())
            .unwrap_or(false);
        if !has_formats {
            debug!(path = %path, "Skipping node without capture formats");
            continue;
        }

        let sysfs_name = std::fs::read_to_string(format!("/sys/class/video4linux/{}/name", name_str))
            .unwrap_or_default()
            .trim()
            .to_string();

        cameras.push(CameraDevice {
            name: if sysfs_name.is_empty() {
                name_str.to_string()
            } else {
                sysfs_name
            },
            path,
        });
    }

    cameras.sort_by(|a, b| a.path.cmp(&b.path));
    cameras
}

/// Discrete frame sizes the device offers for one pixel format
pub fn frame_sizes(dev: &Device, fourcc: v4l::FourCC) -> Vec<(u32, u32)> {
    let Ok(sizes) = dev.enum_framesizes(fourcc) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    for size in sizes {
        match size.size {
            v4l::framesize::FrameSizeEnum::Discrete(discrete) => {
                result.push((discrete.width, discrete.height));
            }
            v4l::framesize::FrameSizeEnum::Stepwise(step) => {
                for (w, h) in STEPWISE_PROBES {
                    if w >= step.min_width
                        && w <= step.max_width
                        && h >= step.min_height
                        && h <= step.max_height
                    {
                        result.push((w, h));
                    }
                }
            }
        }
    }
    result
}

/// Preferred supported pixel format of the device and its frame sizes
pub fn preferred_format(dev: &Device) -> io::Result<Option<(v4l::FourCC, Vec<(u32, u32)>)>> {
    let offered: Vec<v4l::FourCC> = dev.enum_formats()?.into_iter().map(|d| d.fourcc).collect();

    for code in SUPPORTED_FOURCCS {
        let fourcc = v4l::FourCC::new(&code);
        if offered.contains(&fourcc) {
            return Ok(Some((fourcc, frame_sizes(dev, fourcc))));
        }
    }
    Ok(None)
}

/// All frame sizes of the device at `path`, across supported pixel formats
pub fn query_frame_sizes(path: &str) -> io::Result<Vec<(u32, u32)>> {
    let dev = Device::with_path(path)?;
    let mut sizes = Vec::new();
    for desc in dev.enum_formats()? {
        if !SUPPORTED_FOURCCS.contains(&desc.fourcc.repr) {
            continue;
        }
        for size in frame_sizes(&dev, desc.fourcc) {
            if !sizes.contains(&size) {
                sizes.push(size);
            }
        }
    }
    Ok(sizes)
}
