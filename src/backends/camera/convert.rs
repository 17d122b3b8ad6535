// SPDX-License-Identifier: GPL-3.0-only

//! Raw V4L2 buffer to RGB24 conversion

/// Pixel formats the preview stream accepts, in order of preference
pub const SUPPORTED_FOURCCS: [[u8; 4]; 3] = [*b"MJPG", *b"YUYV", *b"RGB3"];

/// Convert YUV (BT.601) to RGB
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344136 * u - 0.714136 * v).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;

    (r, g, b)
}

/// Decode one driver buffer into packed RGB24
///
/// `stride` is the driver's bytes-per-line; it is ignored for MJPG.
/// Returns the RGB bytes and the decoded dimensions.
pub fn to_rgb(
    fourcc: [u8; 4],
    width: u32,
    height: u32,
    stride: u32,
    data: &[u8],
) -> Result<(Vec<u8>, u32, u32), String> {
    match &fourcc {
        b"MJPG" => {
            let img = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
                .map_err(|e| format!("MJPG decode failed: {}", e))?;
            let rgb = img.to_rgb8();
            let (w, h) = rgb.dimensions();
            Ok((rgb.into_raw(), w, h))
        }
        b"YUYV" => {
            let stride = (if stride == 0 { width * 2 } else { stride }) as usize;
            if stride < width as usize * 2 {
                return Err(format!("YUYV stride {} too small for width {}", stride, width));
            }
            if data.len() < stride * height as usize {
                return Err(format!(
                    "Short YUYV buffer: {} < {}",
                    data.len(),
                    stride * height as usize
                ));
            }
            let mut rgb = Vec::with_capacity((width * height * 3) as usize);
            for row in data.chunks_exact(stride).take(height as usize) {
                // Y0 U Y1 V: two pixels share chroma
                for quad in row[..(width as usize / 2) * 4].chunks_exact(4) {
                    let (r, g, b) = yuv_to_rgb(quad[0], quad[1], quad[3]);
                    rgb.extend_from_slice(&[r, g, b]);
                    let (r, g, b) = yuv_to_rgb(quad[2], quad[1], quad[3]);
                    rgb.extend_from_slice(&[r, g, b]);
                }
            }
            Ok((rgb, width & !1, height))
        }
        b"RGB3" => {
            let stride = (if stride == 0 { width * 3 } else { stride }) as usize;
            let row_bytes = width as usize * 3;
            if stride < row_bytes {
                return Err(format!("RGB3 stride {} too small for width {}", stride, width));
            }
            if data.len() < stride * height as usize {
                return Err("Short RGB3 buffer".to_string());
            }
            let mut rgb = Vec::with_capacity(row_bytes * height as usize);
            for row in data.chunks_exact(stride).take(height as usize) {
                rgb.extend_from_slice(&row[..row_bytes]);
            }
            Ok((rgb, width, height))
        }
        other => Err(format!(
            "Unsupported pixel format {}",
            String::from_utf8_lossy(other)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yuyv_gray() {
        // Two pixels of mid gray, neutral chroma
        let data = [128u8, 128, 128, 128];
        let (rgb, w, h) = to_rgb(*b"YUYV", 2, 1, 4, &data).unwrap();
        assert_eq!((w, h), (2, 1));
        assert_eq!(rgb, vec![128, 128, 128, 128, 128, 128]);
    }

    #[test]
    fn test_rgb3_strips_padding() {
        let data = [1u8, 2, 3, 0, 4, 5, 6, 0];
        let (rgb, _, _) = to_rgb(*b"RGB3", 1, 2, 4, &data).unwrap();
        assert_eq!(rgb, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_short_buffer_rejected() {
        assert!(to_rgb(*b"YUYV", 4, 4, 8, &[0u8; 8]).is_err());
        assert!(to_rgb(*b"H264", 4, 4, 0, &[]).is_err());
    }
}
