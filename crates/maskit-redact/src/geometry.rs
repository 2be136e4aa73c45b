//! Projection of character offsets onto pixel rectangles
//!
//! Characters are assumed to be spread evenly across the line's bounding box.
//! The horizontal start uses `index + 1`, which places every mask one
//! character width right of the keyword's first character. Callers depend on
//! this placement, so it is kept as is.

use maskit_core::{BoundingBox, MaskRegion};

/// Compute the pixel region covering `keyword_len` characters starting at
/// character `index` of a line `text_len` characters long.
///
/// Coordinates are truncated to integers and clamped to the line's own pixel
/// box and to the canvas. Returns `None` when nothing would be painted.
pub fn project(
    bbox: &BoundingBox,
    text_len: usize,
    keyword_len: usize,
    index: usize,
    image_width: u32,
    image_height: u32,
) -> Option<MaskRegion> {
    if text_len == 0 {
        return None;
    }

    let text_len = text_len as f64;
    let start_ratio = (index + 1) as f64 / text_len;
    let keyword_ratio = keyword_len as f64 / text_len;

    let horizontal_start = bbox.left + start_ratio * bbox.width;
    let horizontal_end = bbox.left + (start_ratio + keyword_ratio) * bbox.width;

    let width = f64::from(image_width);
    let height = f64::from(image_height);

    let left = (horizontal_start * width) as i64;
    let right = (horizontal_end * width) as i64;
    let top = (bbox.top * height) as i64;
    let bottom = ((bbox.top + bbox.height) * height) as i64;

    // Horizontal bounds: the line box, itself inside the canvas
    let min_x = ((bbox.left * width) as i64).clamp(0, i64::from(image_width));
    let max_x = (((bbox.left + bbox.width) * width) as i64).clamp(0, i64::from(image_width));
    if max_x <= min_x {
        return None;
    }

    let left = left.clamp(min_x, max_x);
    let right = right.clamp(min_x, max_x);
    let top = top.clamp(0, i64::from(image_height));
    let bottom = bottom.clamp(0, i64::from(image_height));

    if right <= left || bottom <= top {
        return None;
    }

    Some(MaskRegion {
        left: left as u32,
        top: top as u32,
        right: right as u32,
        bottom: bottom as u32,
    })
}
