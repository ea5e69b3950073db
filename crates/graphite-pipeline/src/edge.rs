//! Sobel edge map with a fixed magnitude threshold.
//!
//! Gradients come from [`imageproc::gradients`] on the red channel of
//! an already-grayscale buffer. The output is inverted relative to a
//! usual edge map: edges are black (0) on a white (255) field, which is
//! what the pencil and ink styles draw with.
//!
//! The 1-pixel frame is left at its incoming value because a 3×3
//! window cannot be centered there.

use image::{GrayImage, Luma};
use tracing::trace;

use crate::types::RgbaImage;

/// Extract the red channel as a single-channel image.
fn red_channel(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([image.get_pixel(x, y).0[0]])
    })
}

/// Replace the interior of `image` with a thresholded Sobel edge map.
///
/// A pixel becomes white when `sqrt(gx² + gy²) <= threshold` and black
/// otherwise; its alpha is forced to 255. Border pixels keep their
/// previous value. A uniform image therefore comes out all white.
#[must_use = "returns the edge map"]
pub fn sobel_edges(mut image: RgbaImage, threshold: f64) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w < 3 || h < 3 {
        return image;
    }

    trace!(width = w, height = h, threshold, "sobel_edges");
    let gray = red_channel(&image);
    let gx = imageproc::gradients::horizontal_sobel(&gray);
    let gy = imageproc::gradients::vertical_sobel(&gray);

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let dx = f64::from(gx.get_pixel(x, y).0[0]);
            let dy = f64::from(gy.get_pixel(x, y).0[0]);
            let magnitude = dx.hypot(dy);
            let value = if magnitude <= threshold { 255 } else { 0 };
            image.put_pixel(x, y, image::Rgba([value, value, value, 255]));
        }
    }

    image
}
