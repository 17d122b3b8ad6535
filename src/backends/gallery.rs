// SPDX-License-Identifier: MPL-2.0

//! Directory-backed photo library
//!
//! Assets are files imported into the library root under a fresh UUID name.
//! Albums are subdirectories; appending an asset moves it into the album
//! directory (the asset is not duplicated).

use super::{GalleryCapability, PermissionStatus};
use crate::errors::SaveError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Handle to an imported photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    pub id: Uuid,
    /// Current location of the asset inside the library
    pub path: PathBuf,
}

impl AssetHandle {
    fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Create and remove a scratch file in `dir`
///
/// Mode bits alone do not tell whether this user can write (ownership,
/// read-only mounts), so the check performs a real write.
async fn probe_writable(dir: &Path) -> std::io::Result<()> {
    let scratch = dir.join(format!(".write-check-{}", Uuid::new_v4()));
    tokio::fs::write(&scratch, b"").await?;
    tokio::fs::remove_file(&scratch).await
}

/// [`GalleryCapability`] storing photos under a directory
#[derive(Debug, Clone)]
pub struct DirectoryGallery {
    root: PathBuf,
}

impl DirectoryGallery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the album `name`
    pub fn album_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl GalleryCapability for DirectoryGallery {
    async fn request_permission(&mut self) -> PermissionStatus {
        if let Err(e) = tokio::fs::create_dir_all(&self.root).await {
            warn!(root = %self.root.display(), error = %e, "Cannot create gallery root");
            return PermissionStatus::Denied;
        }

        match probe_writable(&self.root).await {
            Ok(()) => {
                debug!(root = %self.root.display(), "Gallery writable");
                PermissionStatus::Granted
            }
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Gallery root is not writable");
                PermissionStatus::Denied
            }
        }
    }

    async fn create_asset(&mut self, location: &Path) -> Result<AssetHandle, SaveError> {
        let id = Uuid::new_v4();
        let extension = location
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "jpg".to_string());
        let target = self.root.join(format!("{}.{}", id, extension));

        tokio::fs::copy(location, &target)
            .await
            .map_err(|e| SaveError::Asset(format!("{}: {}", location.display(), e)))?;

        debug!(source = %location.display(), asset = %target.display(), "Asset created");
        Ok(AssetHandle { id, path: target })
    }

    async fn create_or_append_album(
        &mut self,
        name: &str,
        asset: &AssetHandle,
    ) -> Result<(), SaveError> {
        let album = self.album_dir(name);
        tokio::fs::create_dir_all(&album)
            .await
            .map_err(|e| SaveError::Album(format!("{}: {}", album.display(), e)))?;

        let file_name = asset
            .file_name()
            .ok_or_else(|| SaveError::Album(format!("asset {} has no file name", asset.id)))?;
        let target = album.join(file_name);

        // Rename fails across file systems; fall back to copy + remove
        if let Err(e) = tokio::fs::rename(&asset.path, &target).await {
            debug!(error = %e, "Rename into album failed, copying instead");
            tokio::fs::copy(&asset.path, &target)
                .await
                .map_err(|e| SaveError::Album(e.to_string()))?;
            tokio::fs::remove_file(&asset.path).await?;
        }

        info!(album = name, path = %target.display(), "Photo added to album");
        Ok(())
    }
}
