// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use mirror_camera::constants::{
    AspectRatio, CAPTURE_OPTIONS, FALLBACK_RATIO, ICON_TARGETS, PREFERRED_RATIO,
};

#[test]
fn test_capture_options() {
    assert_eq!(CAPTURE_OPTIONS.quality, 0.8);
    assert_eq!(CAPTURE_OPTIONS.jpeg_quality(), 80);
    assert!(!CAPTURE_OPTIONS.exif);
}

#[test]
fn test_ratio_preferences() {
    assert_eq!(PREFERRED_RATIO, AspectRatio::Wide);
    assert_eq!(FALLBACK_RATIO.label(), "4:3");
    assert!(AspectRatio::KNOWN_GOOD.contains(&PREFERRED_RATIO));
}

#[test]
fn test_icon_targets() {
    let files: Vec<&str> = ICON_TARGETS.iter().map(|t| t.file_name).collect();
    assert_eq!(
        files,
        ["icon.png", "adaptive-icon.png", "splash.png", "favicon.png"]
    );

    for target in ICON_TARGETS {
        assert!(
            target.inner_size() > 0,
            "{} has no drawable area",
            target.name
        );
        assert_eq!(target.inner_size() + 2 * target.padding, target.size);
    }
}
