// SPDX-License-Identifier: GPL-3.0-only

//! Frame size and aspect ratio helpers

use crate::constants::AspectRatio;

/// Largest frame the preview stream is configured for
///
/// Higher resolutions only slow down MJPEG decoding for a terminal preview
/// without improving the saved photo noticeably on typical webcams.
pub const MAX_STREAM_PIXELS: u64 = 1920 * 1080;

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Reduced `w:h` label for a frame size
pub fn ratio_label(width: u32, height: u32) -> String {
    let divisor = gcd(width, height).max(1);
    format!("{}:{}", width / divisor, height / divisor)
}

/// Whether a frame size has exactly the given aspect ratio
pub fn matches_ratio(width: u32, height: u32, ratio: AspectRatio) -> bool {
    let (rw, rh) = ratio.components();
    width as u64 * rh as u64 == height as u64 * rw as u64
}

/// Distinct ratio labels of the given sizes, in device order
pub fn supported_ratios(sizes: &[(u32, u32)]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for &(w, h) in sizes {
        let label = ratio_label(w, h);
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

/// Pick the frame size to stream
///
/// Prefers sizes with the requested ratio; among candidates picks the
/// largest one within [`MAX_STREAM_PIXELS`], or the smallest if all exceed
/// it. When no size has the requested ratio every size is a candidate.
pub fn select_frame_size(sizes: &[(u32, u32)], ratio: Option<AspectRatio>) -> Option<(u32, u32)> {
    let area = |&(w, h): &(u32, u32)| w as u64 * h as u64;

    let matching: Vec<(u32, u32)> = match ratio {
        Some(ratio) => sizes
            .iter()
            .copied()
            .filter(|&(w, h)| matches_ratio(w, h, ratio))
            .collect(),
        None => Vec::new(),
    };
    let candidates = if matching.is_empty() {
        sizes
    } else {
        &matching[..]
    };

    candidates
        .iter()
        .copied()
        .filter(|s| area(s) <= MAX_STREAM_PIXELS)
        .max_by_key(area)
        .or_else(|| candidates.iter().copied().min_by_key(area))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_label() {
        assert_eq!(ratio_label(1920, 1080), "16:9");
        assert_eq!(ratio_label(640, 480), "4:3");
        assert_eq!(ratio_label(720, 720), "1:1");
        assert_eq!(ratio_label(352, 288), "11:9");
    }

    #[test]
    fn test_supported_ratios_dedup_in_order() {
        let sizes = [(640, 480), (1280, 720), (320, 240), (1920, 1080)];
        assert_eq!(supported_ratios(&sizes), vec!["4:3", "16:9"]);
    }

    #[test]
    fn test_select_prefers_ratio() {
        let sizes = [(640, 480), (1280, 720), (1600, 1200)];
        assert_eq!(
            select_frame_size(&sizes, Some(AspectRatio::Wide)),
            Some((1280, 720))
        );
        assert_eq!(
            select_frame_size(&sizes, Some(AspectRatio::Standard)),
            Some((1600, 1200))
        );
    }

    #[test]
    fn test_select_without_match_uses_all() {
        let sizes = [(640, 480), (3840, 2160)];
        assert_eq!(
            select_frame_size(&sizes, Some(AspectRatio::Square)),
            Some((640, 480))
        );
        assert_eq!(select_frame_size(&[(3840, 2160)], None), Some((3840, 2160)));
        assert_eq!(select_frame_size(&[], None), None);
    }
}
