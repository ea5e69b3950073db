//! Fit decoded images into the display bounds.
//!
//! Images are scaled down so both axes fit inside [`DISPLAY_BOUNDS`],
//! keeping the aspect ratio. Images that already fit are never scaled
//! up.

use image::imageops::FilterType;

use crate::types::{Dimensions, RgbaImage};

/// Largest display size: 800×600.
pub const DISPLAY_BOUNDS: Dimensions = Dimensions::new(800, 600);

/// Compute the display size of an image of size `natural` inside `bounds`.
///
/// An image with a zero axis has nothing to scale and is returned
/// as is. Otherwise neither output axis is ever zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_within(natural: Dimensions, bounds: Dimensions) -> Dimensions {
    if natural.width == 0 || natural.height == 0 {
        return natural;
    }
    if natural.width <= bounds.width && natural.height <= bounds.height {
        return natural;
    }

    let scale_x = f64::from(bounds.width) / f64::from(natural.width);
    let scale_y = f64::from(bounds.height) / f64::from(natural.height);
    let scale = scale_x.min(scale_y);

    let width = (f64::from(natural.width) * scale).round().max(1.0) as u32;
    let height = (f64::from(natural.height) * scale).round().max(1.0) as u32;
    Dimensions::new(width.min(bounds.width), height.min(bounds.height))
}

/// Resize `image` to fit inside `bounds`, or return it unchanged if it
/// already fits.
#[must_use = "returns the display-sized image"]
pub fn to_display(image: RgbaImage, bounds: Dimensions) -> RgbaImage {
    let natural = Dimensions::of(&image);
    let target = fit_within(natural, bounds);
    if target == natural {
        return image;
    }
    image::imageops::resize(&image, target.width, target.height, FilterType::Triangle)
}
