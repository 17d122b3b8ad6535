// SPDX-License-Identifier: MPL-2.0

//! Local file inspection

use super::FileInspector;
use std::io;
use std::path::Path;
use tracing::debug;

/// Existence and size of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub exists: bool,
    /// Size in bytes, when known
    pub size: Option<u64>,
}

impl FileInfo {
    /// Human-readable size in KB with two decimals, or "Unknown"
    pub fn size_kb_label(&self) -> String {
        match self.size {
            Some(bytes) => format!("{:.2} KB", bytes as f64 / 1024.0),
            None => "Unknown".to_string(),
        }
    }
}

/// [`FileInspector`] over the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileInspector for LocalFiles {
    async fn stat(&self, location: &Path) -> io::Result<FileInfo> {
        match tokio::fs::metadata(location).await {
            Ok(meta) => {
                let info = FileInfo {
                    exists: true,
                    size: meta.is_file().then(|| meta.len()),
                };
                debug!(path = %location.display(), ?info, "Stat photo file");
                Ok(info)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileInfo {
                exists: false,
                size: None,
            }),
            Err(e) => Err(e),
        }
    }
}
