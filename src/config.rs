// SPDX-License-Identifier: GPL-3.0-only

use crate::app::state::CameraFacing;
use crate::constants::{APP_DIR_NAME, DEFAULT_ALBUM_NAME, DEFAULT_BACK_DEVICE, DEFAULT_FRONT_DEVICE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera that is active when the capture screen opens
    pub default_facing: CameraFacing,
    /// Mirror camera preview horizontally (selfie mode)
    pub mirror_preview: bool,
    /// Gallery album saved photos are appended to
    pub album_name: String,
    /// V4L2 device node used for the front camera
    pub front_device: String,
    /// V4L2 device node used for the back camera
    pub back_device: String,
    /// Gallery library root (defaults to the user's Pictures directory)
    pub gallery_root: Option<PathBuf>,
    /// Show the file-inspection action on the review screen
    pub debug_tools: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_facing: CameraFacing::Front, // Selfie camera first
            mirror_preview: true,
            album_name: DEFAULT_ALBUM_NAME.to_string(),
            front_device: DEFAULT_FRONT_DEVICE.to_string(),
            back_device: DEFAULT_BACK_DEVICE.to_string(),
            gallery_root: None,
            debug_tools: cfg!(debug_assertions),
        }
    }
}

impl Config {
    /// Path of the config file under the user's config directory
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the user's config, falling back to defaults
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory available, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a specific file, falling back to defaults
    ///
    /// A missing file is not an error. A file that exists but cannot be
    /// parsed is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Write config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), crate::errors::AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| crate::errors::AppError::Config(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| crate::errors::AppError::Config(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| crate::errors::AppError::Config(e.to_string()))?;
        debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Device node for the given facing
    pub fn device_for(&self, facing: CameraFacing) -> &str {
        match facing {
            CameraFacing::Front => &self.front_device,
            CameraFacing::Back => &self.back_device,
        }
    }

    /// Gallery library root, resolving the default
    pub fn gallery_root(&self) -> PathBuf {
        self.gallery_root.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}
