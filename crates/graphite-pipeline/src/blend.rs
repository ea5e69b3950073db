//! Two-layer blend modes.
//!
//! Each blend writes its result into the `base` buffer and returns it.
//! Both layers must have identical dimensions; a mismatch is a caller
//! bug and panics immediately.

use crate::channel::to_channel;
use crate::types::RgbaImage;

/// Color dodge of a single channel.
///
/// `blend == 255` always yields 255; otherwise
/// `min(255, floor(base * 256 / (255 - blend)))`.
#[must_use]
pub const fn color_dodge_channel(base: u8, blend: u8) -> u8 {
    if blend == 255 {
        return 255;
    }
    let value = base as u32 * 256 / (255 - blend as u32);
    if value > 255 { 255 } else { value as u8 }
}

/// Multiply of a single channel: `base * blend / 255`, rounded.
#[must_use]
pub fn multiply_channel(base: u8, blend: u8) -> u8 {
    to_channel(f64::from(base) * f64::from(blend) / 255.0)
}

fn assert_same_dimensions(base: &RgbaImage, blend: &RgbaImage) {
    assert_eq!(
        base.dimensions(),
        blend.dimensions(),
        "blend layers must have identical dimensions",
    );
}

/// Brighten `base` by `blend` using color dodge on R, G and B.
///
/// # Panics
///
/// Panics if the two buffers differ in size.
#[must_use = "returns the blended image"]
pub fn color_dodge(mut base: RgbaImage, blend: &RgbaImage) -> RgbaImage {
    assert_same_dimensions(&base, blend);
    for (b, l) in base.pixels_mut().zip(blend.pixels()) {
        for c in 0..3 {
            b.0[c] = color_dodge_channel(b.0[c], l.0[c]);
        }
    }
    base
}

/// Darken `base` by `blend` using multiply on R, G and B.
///
/// # Panics
///
/// Panics if the two buffers differ in size.
#[must_use = "returns the blended image"]
pub fn multiply(mut base: RgbaImage, blend: &RgbaImage) -> RgbaImage {
    assert_same_dimensions(&base, blend);
    for (b, l) in base.pixels_mut().zip(blend.pixels()) {
        for c in 0..3 {
            b.0[c] = multiply_channel(b.0[c], l.0[c]);
        }
    }
    base
}

/// Mix a gray layer with an edge map, weighted by `strength` in `0.0..=1.0`.
///
/// `result = gray * 0.7 * (1 - strength/2) + edge * strength/2`.
/// Darkens the shading and lays the edge map over it. Both layers are
/// read from the red channel and the result is written to R, G and B.
///
/// # Panics
///
/// Panics if the two buffers differ in size.
#[must_use = "returns the blended image"]
pub fn shade_with_edges(mut gray: RgbaImage, edges: &RgbaImage, strength: f64) -> RgbaImage {
    assert_same_dimensions(&gray, edges);
    let half = strength * 0.5;
    let shade = 0.7 * (1.0 - half);
    for (g, e) in gray.pixels_mut().zip(edges.pixels()) {
        let value = to_channel(f64::from(g.0[0]).mul_add(shade, f64::from(e.0[0]) * half));
        g.0[0] = value;
        g.0[1] = value;
        g.0[2] = value;
    }
    gray
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn dodge_with_white_blend_is_white() {
        for base in 0..=255 {
            assert_eq!(color_dodge_channel(base, 255), 255);
        }
    }

    #[test]
    fn dodge_with_black_blend_keeps_small_values() {
        assert_eq!(color_dodge_channel(10, 0), 10);
        assert_eq!(color_dodge_channel(0, 0), 0);
    }

    #[test]
    fn dodge_saturates() {
        assert_eq!(color_dodge_channel(200, 128), 255);
        assert_eq!(color_dodge_channel(100, 200), 255);
    }

    #[test]
    fn dodge_uses_floor() {
        // 100 * 256 / 155 = 165.16
        assert_eq!(color_dodge_channel(100, 100), 165);
    }

    #[test]
    fn multiply_identities() {
        assert_eq!(multiply_channel(123, 255), 123);
        assert_eq!(multiply_channel(123, 0), 0);
        assert_eq!(multiply_channel(255, 255), 255);
        // 128 * 128 / 255 = 64.25
        assert_eq!(multiply_channel(128, 128), 64);
    }

    #[test]
    fn dodge_buffers_keeps_base_alpha() {
        let base = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 77]));
        let blend = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 3]));
        let out = color_dodge(base, &blend);
        assert_eq!(out.get_pixel(1, 1).0, [255, 20, 30, 77]);
    }

    #[test]
    fn multiply_with_white_is_identity() {
        let base = RgbaImage::from_fn(4, 4, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            let v = (x * 40 + y * 10) as u8;
            Rgba([v, v, v, 255])
        });
        let white = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        assert_eq!(multiply(base.clone(), &white), base);
    }

    #[test]
    fn shade_without_edges_darkens_by_seventy_percent() {
        let gray = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 255]));
        let edges = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let out = shade_with_edges(gray, &edges, 0.0);
        assert_eq!(out.get_pixel(0, 0).0, [140, 140, 140, 255]);
    }

    #[test]
    fn shade_full_strength() {
        let gray = RgbaImage::from_pixel(1, 1, Rgba([200, 200, 200, 255]));
        let edges = RgbaImage::from_pixel(1, 1, Rgba([254, 254, 254, 255]));
        // 200 * 0.7 * 0.5 + 254 * 0.5 = 70 + 127
        let out = shade_with_edges(gray, &edges, 1.0);
        assert_eq!(out.get_pixel(0, 0).0[0], 197);
    }

    #[test]
    #[should_panic(expected = "identical dimensions")]
    fn mismatched_dimensions_panic() {
        let _ = color_dodge(RgbaImage::new(2, 2), &RgbaImage::new(3, 2));
    }
}
