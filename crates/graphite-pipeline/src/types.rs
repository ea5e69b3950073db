//! Shared types for the graphite sketch pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can hold pixel buffers
/// without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create a new dimensions value.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of an existing buffer.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// Total pixel count.
    #[must_use]
    pub const fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Broad classification of a [`SketchError`].
///
/// Callers use this to decide how to surface a failure: validation
/// errors prompt a retry with a different file, decode errors report a
/// broken file, configuration errors are usually just logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The upload was rejected before any decode attempt.
    Validation,
    /// The upload passed validation but could not be decoded.
    Decode,
    /// A preset name or setting value was not recognized.
    Configuration,
}

/// Errors that can occur while loading images or configuring a sketch.
///
/// The filter math itself never fails: every primitive is total over
/// validly-shaped buffers.
#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The declared MIME type is not one of the accepted formats.
    #[error("unsupported image type '{0}', expected image/jpeg or image/png")]
    UnsupportedType(String),

    /// The upload exceeds the size limit.
    #[error("image is {size} bytes, larger than the {max} byte limit")]
    TooLarge {
        /// Size of the rejected upload.
        size: usize,
        /// Maximum accepted size.
        max: usize,
    },

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// No preset with the given name exists.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// A recognized setting was given a value it cannot hold.
    #[error("invalid value '{value}' for setting '{key}'")]
    InvalidSettingValue {
        /// The setting name.
        key: String,
        /// The rejected value.
        value: String,
    },
}

impl SketchError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput | Self::UnsupportedType(_) | Self::TooLarge { .. } => {
                ErrorKind::Validation
            }
            Self::ImageDecode(_) => ErrorKind::Decode,
            Self::UnknownPreset(_) | Self::InvalidSettingValue { .. } => ErrorKind::Configuration,
        }
    }
}
