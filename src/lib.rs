// SPDX-License-Identifier: GPL-3.0-only

//! Mirror Camera - capture, review and save photos from a V4L2 camera
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Capture screen controller (permissions, live view, review)
//! - [`backends`]: Camera, gallery and file capabilities plus their Linux implementations
//! - [`display`]: Decoding captured photos for review
//! - [`icons`]: SVG to PNG icon rasterizer
//! - [`terminal`]: Terminal front end
//! - [`config`]: User configuration handling
//! - [`storage`]: Capture file locations
//!
//! # Example
//!
//! ```ignore
//! let config = mirror_camera::Config::load();
//! mirror_camera::terminal::run(config)?;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod display;
pub mod errors;
pub mod flash;
pub mod icons;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{CaptureScreen, Message, Screen};
pub use config::Config;
