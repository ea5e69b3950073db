//! Image decoding and grayscale conversion.
//!
//! Decoding turns validated upload bytes into an RGBA buffer; the
//! grayscale primitive then collapses color into luminance in place.
//! Every sketch style starts with [`grayscale`].

use image::{ImageFormat, Rgba};

use crate::channel::to_channel;
use crate::types::{RgbaImage, SketchError};

/// Luminance weight of the red channel.
pub const RED_WEIGHT: f64 = 0.299;
/// Luminance weight of the green channel.
pub const GREEN_WEIGHT: f64 = 0.587;
/// Luminance weight of the blue channel.
pub const BLUE_WEIGHT: f64 = 0.114;

/// Decode raw image bytes of a known format into an RGBA buffer.
///
/// # Errors
///
/// Returns [`SketchError::EmptyInput`] if `bytes` is empty.
/// Returns [`SketchError::ImageDecode`] if the data is corrupt or does
/// not match `format`.
pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<RgbaImage, SketchError> {
    if bytes.is_empty() {
        return Err(SketchError::EmptyInput);
    }

    let img = image::load_from_memory_with_format(bytes, format)?;
    Ok(img.to_rgba8())
}

/// Luminance of a single pixel: `0.299*R + 0.587*G + 0.114*B`.
#[must_use]
pub fn luminance(pixel: Rgba<u8>) -> f64 {
    let [r, g, b, _] = pixel.0;
    RED_WEIGHT.mul_add(
        f64::from(r),
        GREEN_WEIGHT.mul_add(f64::from(g), BLUE_WEIGHT * f64::from(b)),
    )
}

/// Replace R, G and B of every pixel with its luminance.
///
/// Alpha is left untouched. Applying this twice gives the same result
/// as applying it once.
#[must_use = "returns the grayscale image"]
pub fn grayscale(mut image: RgbaImage) -> RgbaImage {
    for pixel in image.pixels_mut() {
        let gray = to_channel(luminance(*pixel));
        pixel.0[0] = gray;
        pixel.0[1] = gray;
        pixel.0[2] = gray;
    }
    image
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode a single RGBA image as PNG bytes.
    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        let result = decode(&[], ImageFormat::Png);
        assert!(matches!(result, Err(SketchError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode(&[0xFF, 0xFE, 0x00, 0x01], ImageFormat::Png);
        assert!(matches!(result, Err(SketchError::ImageDecode(_))));
    }

    #[test]
    fn png_decoded_as_jpeg_is_a_decode_error() {
        let png = encode_png(&RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let result = decode(&png, ImageFormat::Jpeg);
        assert!(matches!(result, Err(SketchError::ImageDecode(_))));
    }

    #[test]
    fn valid_png_decodes_with_dimensions() {
        let png = encode_png(&RgbaImage::from_pixel(17, 31, Rgba([128, 64, 32, 255])));
        let img = decode(&png, ImageFormat::Png).unwrap();
        assert_eq!(img.dimensions(), (17, 31));
        assert_eq!(img.get_pixel(3, 3).0, [128, 64, 32, 255]);
    }

    #[test]
    fn uses_weighted_luminance() {
        let img = RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([255, 0, 0, 255]),
            1 => Rgba([0, 255, 0, 255]),
            _ => Rgba([0, 0, 255, 255]),
        });
        let gray = grayscale(img);
        assert_eq!(gray.get_pixel(0, 0).0, [76, 76, 76, 255]);
        assert_eq!(gray.get_pixel(1, 0).0, [150, 150, 150, 255]);
        assert_eq!(gray.get_pixel(2, 0).0, [29, 29, 29, 255]);
    }

    #[test]
    fn alpha_is_untouched() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 17]));
        let gray = grayscale(img);
        for pixel in gray.pixels() {
            assert_eq!(pixel.0[3], 17);
        }
    }

    #[test]
    fn idempotent() {
        #[allow(clippy::cast_possible_truncation)]
        let img = RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, 255])
        });
        let once = grayscale(img);
        let twice = grayscale(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn white_stays_white() {
        let gray = grayscale(RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])));
        assert_eq!(gray.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
