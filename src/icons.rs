// SPDX-License-Identifier: GPL-3.0-only

//! Icon rasterizer
//!
//! Renders one SVG into the fixed set of app icon, splash and favicon PNGs
//! listed in [`ICON_TARGETS`]. Every output gets a white background and the
//! source drawn into the square inset by the target's padding.

use crate::constants::{ICON_TARGETS, IconTarget};
use crate::errors::RasterError;
use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rasterize `source` into every icon target under `out_dir`
///
/// Targets are written in order and the first failure stops the run. Files
/// written before the failure are left in place. The source is read before
/// anything is written, so a missing or unparsable source writes nothing.
pub fn generate_icons(source: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, RasterError> {
    info!(source = %source.display(), "Loading SVG");
    let data = std::fs::read(source)
        .map_err(|e| RasterError::Load(format!("{}: {}", source.display(), e)))?;
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .map_err(|e| RasterError::Parse(e.to_string()))?;

    std::fs::create_dir_all(out_dir).map_err(|e| RasterError::Write(e.to_string()))?;

    let mut written = Vec::with_capacity(ICON_TARGETS.len());
    for target in &ICON_TARGETS {
        let image = render_target(&tree, target)?;
        let path = out_dir.join(target.file_name);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| RasterError::Write(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), size = target.size, "Generated {}", target.name);
        written.push(path);
    }

    info!(count = written.len(), "All icons generated");
    Ok(written)
}

/// Render the tree onto a white square for one target
fn render_target(tree: &usvg::Tree, target: &IconTarget) -> Result<RgbaImage, RasterError> {
    let surface_err = || RasterError::Surface {
        width: target.size,
        height: target.size,
    };

    let mut pixmap = tiny_skia::Pixmap::new(target.size, target.size).ok_or_else(surface_err)?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let inner = target.inner_size() as f32;
    let source_size = tree.size();
    let transform = tiny_skia::Transform::from_row(
        inner / source_size.width(),
        0.0,
        0.0,
        inner / source_size.height(),
        target.padding as f32,
        target.padding as f32,
    );
    debug!(target = target.name, ?transform, "Rendering");
    resvg::render(tree, transform, &mut pixmap.as_mut());

    // Opaque background, so premultiplied and straight alpha agree
    RgbaImage::from_raw(target.size, target.size, pixmap.take()).ok_or_else(surface_err)
}
