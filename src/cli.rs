// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Listing available cameras and their capture ratios
//! - Generating app icons from the SVG logo

use mirror_camera::backends::camera::device::query_frame_sizes;
use mirror_camera::backends::camera::enumerate_cameras;
use mirror_camera::backends::camera::format::supported_ratios;
use mirror_camera::errors::AppResult;
use mirror_camera::icons;
use std::path::Path;

/// List all available cameras
pub fn list_cameras() -> AppResult<()> {
    let cameras = enumerate_cameras();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        println!("  [{}] {} ({})", index, camera.name, camera.path);

        match query_frame_sizes(&camera.path) {
            Ok(mut sizes) if !sizes.is_empty() => {
                let ratios = supported_ratios(&sizes);
                println!("      Ratios: {}", ratios.join(", "));

                // Largest first, show top 3
                sizes.sort_by(|a, b| (b.0 * b.1).cmp(&(a.0 * a.1)));
                let res_strs: Vec<String> = sizes
                    .iter()
                    .take(3)
                    .map(|(w, h)| format!("{}x{}", w, h))
                    .collect();
                println!("      Sizes: {}", res_strs.join(", "));
            }
            Ok(_) => println!("      No supported formats"),
            Err(e) => println!("      Could not query formats: {}", e),
        }
        println!();
    }

    Ok(())
}

/// Rasterize the logo into the icon set
pub fn generate_icons(source: &Path, out_dir: &Path) -> AppResult<()> {
    println!("Loading SVG from: {}", source.display());

    let written = icons::generate_icons(source, out_dir)?;
    for path in &written {
        println!("Generated {}", path.display());
    }
    println!("All icons generated successfully!");

    Ok(())
}
