// SPDX-License-Identifier: MPL-2.0

//! Storage locations for captured photos

use crate::constants::{APP_DIR_NAME, CAPTURE_DIR_NAME};
use std::path::PathBuf;
use tracing::info;

/// Directory freshly captured photos are written to
///
/// Captures live in the cache until the user saves them to the gallery.
pub fn capture_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(CAPTURE_DIR_NAME)
}

/// Ensure the capture directory exists, creating it if necessary
pub fn ensure_capture_directory() -> Result<PathBuf, std::io::Error> {
    let dir = capture_directory();
    std::fs::create_dir_all(&dir)?;
    info!(path = %dir.display(), "Capture directory ready");
    Ok(dir)
}

/// Timestamped file name for a new capture
pub fn capture_file_name() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
    format!("IMG_{}.jpg", timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_file_name_shape() {
        let name = capture_file_name();
        assert!(name.starts_with("IMG_"));
        assert!(name.ends_with(".jpg"));
        // IMG_ + YYYYMMDD_HHMMSS_mmm + .jpg
        assert_eq!(name.len(), 4 + 19 + 4);
    }

    #[test]
    fn test_capture_directory_is_app_scoped() {
        let dir = capture_directory();
        assert!(dir.ends_with(format!("{}/{}", APP_DIR_NAME, CAPTURE_DIR_NAME)));
    }
}
