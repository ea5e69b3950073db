//! Grain injection for the charcoal style.
//!
//! Output is random by nature; tests check bounds and distribution
//! rather than exact pixels. Pass a seeded RNG for reproducible output.

use rand::Rng;
use tracing::trace;

use crate::channel::to_channel;
use crate::types::RgbaImage;

/// Add uniform noise in `[-amount/2, amount/2)` to each pixel's gray
/// value (read from the red channel), clamp, and write it to R, G and B.
#[must_use = "returns the noisy image"]
pub fn add_noise<R: Rng + ?Sized>(mut image: RgbaImage, amount: f64, rng: &mut R) -> RgbaImage {
    trace!(amount, "add_noise");
    if amount <= 0.0 {
        return image;
    }

    for pixel in image.pixels_mut() {
        let jitter = (rng.gen_range(0.0..1.0) - 0.5) * amount;
        let value = to_channel(f64::from(pixel.0[0]) + jitter);
        pixel.0[0] = value;
        pixel.0[1] = value;
        pixel.0[2] = value;
    }
    image
}
