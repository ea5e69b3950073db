//! Sketch styles: named chains of primitive filters.
//!
//! This module defines the [`Compositor`] trait for pluggable style
//! pipelines and the [`Style`] enum for selecting which one to run.
//!
//! # Strategy pattern
//!
//! Every style turns the same grayscale source into a different look.
//! Each compositor receives its own working copy of the source buffer
//! and returns the finished buffer; the style-independent
//! brightness/contrast and invert steps are applied afterwards by
//! [`crate::render`].

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::SketchConfig;
use crate::types::RgbaImage;
use crate::{adjust, blend, blur, edge, grayscale, noise};

/// Inner radius used by each pencil blur pass.
const PENCIL_BLUR_RADIUS: u32 = 2;

/// Grain amplitude added to charcoal output.
const CHARCOAL_NOISE: f64 = 15.0;

/// Edge threshold for the detail layer of the detailed pencil style.
const DETAIL_EDGE_THRESHOLD: f64 = 40.0;

/// Selects which sketch pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Style {
    /// Soft graphite shading: dodge of the gray layer against its
    /// blurred negative, then a tone curve.
    #[default]
    Pencil,
    /// Darkened shading with overlaid edges and grain.
    Charcoal,
    /// High-contrast black lines only.
    Ink,
    /// Pencil shading multiplied with a crisp edge layer.
    DetailedPencil,
}

impl Style {
    /// Every style, in display order.
    pub const ALL: [Self; 4] = [Self::Pencil, Self::Charcoal, Self::Ink, Self::DetailedPencil];

    /// Stable name used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pencil => "pencil",
            Self::Charcoal => "charcoal",
            Self::Ink => "ink",
            Self::DetailedPencil => "detailedPencil",
        }
    }

    /// Parse a style name, falling back to [`Style::Pencil`] for
    /// anything unrecognized.
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style '{0}'")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pencil" => Ok(Self::Pencil),
            "charcoal" => Ok(Self::Charcoal),
            "ink" => Ok(Self::Ink),
            "detailedPencil" | "detailed-pencil" | "detailed_pencil" => Ok(Self::DetailedPencil),
            other => Err(UnknownStyle(other.to_owned())),
        }
    }
}

/// Trait for sketch style pipelines.
///
/// Input: a working copy of the source buffer plus the current config.
/// Output: the stylized buffer, same dimensions as the input.
pub trait Compositor {
    /// Run the style pipeline.
    fn compose(&self, image: RgbaImage, config: &SketchConfig, rng: &mut dyn RngCore)
    -> RgbaImage;
}

impl Compositor for Style {
    fn compose(
        &self,
        image: RgbaImage,
        config: &SketchConfig,
        rng: &mut dyn RngCore,
    ) -> RgbaImage {
        match *self {
            Self::Pencil => pencil(image, config.intensity),
            Self::Charcoal => charcoal(image, config.intensity, rng),
            Self::Ink => ink(image, config.intensity),
            Self::DetailedPencil => detailed_pencil(image, config.intensity),
        }
    }
}

/// Number of blur passes for the pencil style: `max(1, intensity / 15)`.
#[must_use]
pub fn pencil_blur_passes(intensity: u8) -> u32 {
    u32::from(intensity / 15).max(1)
}

/// Gray layer dodged by its own blurred negative.
///
/// The negative is blurred `passes` times with `radius` per pass.
fn dodge_sketch(gray: RgbaImage, passes: u32, radius: u32) -> RgbaImage {
    let mut layer = adjust::invert(gray.clone());
    for _ in 0..passes {
        layer = blur::gaussian_blur(layer, radius);
    }
    blend::color_dodge(gray, &layer)
}

/// grayscale → dodge against blurred negative → tone curve.
#[must_use = "returns the pencil sketch"]
pub fn pencil(image: RgbaImage, intensity: u8) -> RgbaImage {
    let gray = grayscale::grayscale(image);
    let sketch = dodge_sketch(gray, pencil_blur_passes(intensity), PENCIL_BLUR_RADIUS);
    adjust::curve_enhance(sketch, intensity)
}

/// Edge threshold for the charcoal style: `100 - intensity`.
#[must_use]
pub fn charcoal_edge_threshold(intensity: u8) -> f64 {
    100.0 - f64::from(intensity)
}

/// grayscale → edge map → darkened mix of both → grain.
#[must_use = "returns the charcoal sketch"]
pub fn charcoal(image: RgbaImage, intensity: u8, rng: &mut dyn RngCore) -> RgbaImage {
    let gray = grayscale::grayscale(image);
    let edges = edge::sobel_edges(gray.clone(), charcoal_edge_threshold(intensity));
    let strength = f64::from(intensity) / 100.0;
    let shaded = blend::shade_with_edges(gray, &edges, strength);
    noise::add_noise(shaded, CHARCOAL_NOISE, rng)
}

/// Edge threshold for the ink style: `max(10, 80 - intensity)`.
#[must_use]
pub fn ink_edge_threshold(intensity: u8) -> f64 {
    (80.0 - f64::from(intensity)).max(10.0)
}

/// Binarization level for the ink style: `255 - 2 * intensity`.
#[must_use]
pub fn ink_level(intensity: u8) -> i32 {
    255 - 2 * i32::from(intensity)
}

/// grayscale → edge map → hard black/white threshold.
#[must_use = "returns the ink sketch"]
pub fn ink(image: RgbaImage, intensity: u8) -> RgbaImage {
    let gray = grayscale::grayscale(image);
    let edges = edge::sobel_edges(gray, ink_edge_threshold(intensity));
    adjust::threshold(edges, ink_level(intensity))
}

/// Single light dodge pass multiplied with an edge layer built from a
/// fresh copy of the source, then a tone curve.
#[must_use = "returns the detailed pencil sketch"]
pub fn detailed_pencil(image: RgbaImage, intensity: u8) -> RgbaImage {
    let detail = edge::sobel_edges(grayscale::grayscale(image.clone()), DETAIL_EDGE_THRESHOLD);
    let sketch = dodge_sketch(grayscale::grayscale(image), 1, 1);
    let combined = blend::multiply(sketch, &detail);
    adjust::curve_enhance(combined, intensity)
}
