//! Per-pixel tone adjustments: inversion, brightness/contrast levels,
//! gamma-style curve enhancement and hard thresholding.
//!
//! All of these are point operations: each output pixel depends only on
//! the same input pixel. Alpha is never modified.

use tracing::trace;

use crate::channel::to_channel;
use crate::types::RgbaImage;

/// Invert R, G and B: `255 - value`.
///
/// Self-inverse: applying it twice restores the input exactly.
#[must_use = "returns the inverted image"]
pub fn invert(mut image: RgbaImage) -> RgbaImage {
    for pixel in image.pixels_mut() {
        for c in 0..3 {
            pixel.0[c] = 255 - pixel.0[c];
        }
    }
    image
}

/// Contrast multiplier for a 0-100 contrast setting (range 0.0 to 2.0).
#[must_use]
pub fn contrast_factor(contrast: u8) -> f64 {
    (f64::from(contrast) - 50.0) / 50.0 + 1.0
}

/// Brightness offset for a 0-100 brightness setting (range -127.5 to 127.5).
#[must_use]
pub fn brightness_offset(brightness: u8) -> f64 {
    (f64::from(brightness) - 50.0) * 2.55
}

/// Remap every channel around mid-gray:
/// `(value - 128) * contrast_factor + 128 + brightness_offset`.
///
/// `contrast = 50, brightness = 50` is the identity.
#[must_use = "returns the adjusted image"]
pub fn brightness_contrast(mut image: RgbaImage, brightness: u8, contrast: u8) -> RgbaImage {
    let factor = contrast_factor(contrast);
    let offset = brightness_offset(brightness);
    trace!(factor, offset, "brightness_contrast");

    for pixel in image.pixels_mut() {
        for c in 0..3 {
            let value = f64::from(pixel.0[c]);
            pixel.0[c] = to_channel((value - 128.0).mul_add(factor, 128.0) + offset);
        }
    }
    image
}

/// Gamma-style tone curve driven by the intensity setting.
///
/// `factor = 1 + (intensity - 50) / 100`, and each pixel becomes
/// `255 * (gray / 255)^(1 / factor)`. Higher intensity lifts the
/// midtones. The curve is evaluated on the red channel and written to
/// R, G and B, so the result is always gray.
#[must_use = "returns the enhanced image"]
pub fn curve_enhance(mut image: RgbaImage, intensity: u8) -> RgbaImage {
    let factor = 1.0 + (f64::from(intensity) - 50.0) / 100.0;
    let exponent = 1.0 / factor;
    trace!(factor, "curve_enhance");

    for pixel in image.pixels_mut() {
        let normalized = f64::from(pixel.0[0]) / 255.0;
        let value = to_channel(255.0 * normalized.powf(exponent));
        pixel.0[0] = value;
        pixel.0[1] = value;
        pixel.0[2] = value;
    }
    image
}

/// Binarize on the red channel: above `threshold` becomes white,
/// anything else black.
///
/// A negative threshold turns every pixel white.
#[must_use = "returns the thresholded image"]
pub fn threshold(mut image: RgbaImage, threshold: i32) -> RgbaImage {
    for pixel in image.pixels_mut() {
        let value = if i32::from(pixel.0[0]) > threshold {
            255
        } else {
            0
        };
        pixel.0[0] = value;
        pixel.0[1] = value;
        pixel.0[2] = value;
    }
    image
}
