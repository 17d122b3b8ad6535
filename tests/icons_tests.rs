// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the icon rasterizer

use mirror_camera::constants::{DEFAULT_ICON_SOURCE, ICON_TARGETS};
use mirror_camera::errors::RasterError;
use mirror_camera::icons::generate_icons;
use std::path::{Path, PathBuf};

fn temp_out_dir() -> PathBuf {
    std::env::temp_dir().join(format!("mirror-camera-icons-it-{}", uuid::Uuid::new_v4()))
}

#[test]
fn test_bundled_logo_renders() {
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_ICON_SOURCE);
    let out = temp_out_dir();

    let written = generate_icons(&source, &out).unwrap();
    assert_eq!(written.len(), 4);

    for target in ICON_TARGETS {
        let image = image::open(out.join(target.file_name)).unwrap().to_rgba8();
        assert_eq!(image.width(), target.size);
        assert_eq!(image.height(), target.size);
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    std::fs::remove_dir_all(&out).ok();
}

#[test]
fn test_missing_source_fails_without_output() {
    let out = temp_out_dir();

    let err = generate_icons(Path::new("/nonexistent/logo.svg"), &out).unwrap_err();
    assert!(matches!(err, RasterError::Load(_)));
    assert!(err.to_string().contains("logo.svg"));
    assert!(!out.exists());
}
