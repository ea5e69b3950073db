//! Gaussian blur used to soften the inverted layer before color dodge.
//!
//! The kernel is a full square `(2r+1)²` Gaussian with
//! `sigma = (2r+1) / 3`, normalized to sum to 1. Convolution reads from
//! an untouched copy of the input so results never feed back into
//! neighboring samples.
//!
//! # Border policy
//!
//! Pixels closer than `radius` to any edge are left exactly as they
//! were. There is no padding or clamping: the kernel is only evaluated
//! where it fits entirely inside the image. Styles that blur therefore
//! keep a faint unprocessed frame.

use tracing::trace;

use crate::channel::to_channel;
use crate::types::RgbaImage;

/// A square, normalized convolution kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    radius: u32,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a Gaussian kernel of the given radius.
    ///
    /// The side length is `2 * radius + 1` and `sigma` is a third of
    /// the side length. A radius of zero yields the 1×1 identity kernel.
    #[must_use]
    pub fn gaussian(radius: u32) -> Self {
        let size = 2 * radius + 1;
        let sigma = f64::from(size) / 3.0;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let r = i64::from(radius);

        let mut weights = Vec::with_capacity((size * size) as usize);
        for dy in -r..=r {
            for dx in -r..=r {
                #[allow(clippy::cast_precision_loss)]
                let dist_sq = (dx * dx + dy * dy) as f64;
                weights.push((-dist_sq / two_sigma_sq).exp());
            }
        }

        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self { radius, weights }
    }

    /// Side length, `2 * radius + 1`.
    #[must_use]
    pub const fn size(&self) -> u32 {
        2 * self.radius + 1
    }

    /// Row-major weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at offset `(dx, dy)` from the center.
    fn weight(&self, dx: u32, dy: u32) -> f64 {
        self.weights[(dy * self.size() + dx) as usize]
    }
}

/// Apply a Gaussian blur of the given radius to the R, G and B channels.
///
/// Alpha is never modified. Images too small to hold a single full
/// kernel window are returned unchanged, as is any `radius` of zero.
#[must_use = "returns the blurred image"]
pub fn gaussian_blur(mut image: RgbaImage, radius: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if radius == 0 || w <= 2 * radius || h <= 2 * radius {
        return image;
    }

    trace!(width = w, height = h, radius, "gaussian_blur");
    let kernel = Kernel::gaussian(radius);
    let source = image.clone();

    for y in radius..h - radius {
        for x in radius..w - radius {
            let mut acc = [0.0_f64; 3];
            for ky in 0..kernel.size() {
                for kx in 0..kernel.size() {
                    let weight = kernel.weight(kx, ky);
                    let sample = source.get_pixel(x + kx - radius, y + ky - radius).0;
                    for (c, total) in acc.iter_mut().enumerate() {
                        *total = weight.mul_add(f64::from(sample[c]), *total);
                    }
                }
            }
            let pixel = image.get_pixel_mut(x, y);
            for (c, total) in acc.into_iter().enumerate() {
                pixel.0[c] = to_channel(total);
            }
        }
    }

    image
}
