// SPDX-License-Identifier: GPL-3.0-only

//! Review image loading

use crate::errors::DisplayError;
use image::RgbImage;
use std::path::Path;
use tracing::debug;

/// Decode a captured photo for display, mirrored when `flip` is set
///
/// The file on disk is never modified; flipping only affects the returned
/// pixels.
pub fn load_review_image(path: &Path, flip: bool) -> Result<RgbImage, DisplayError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DisplayError::Missing(path.display().to_string()),
        _ => DisplayError::Decode(e.to_string()),
    })?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| DisplayError::Decode(e.to_string()))?
        .to_rgb8();
    debug!(path = %path.display(), width = image.width(), height = image.height(), flip, "Loaded review image");

    if flip {
        Ok(image::imageops::flip_horizontal(&image))
    } else {
        Ok(image)
    }
}
