//! PNG and JPEG encoding of sketch buffers.
//!
//! PNG keeps the alpha channel. JPEG has none, so the sketch is
//! flattened to RGB by dropping alpha before encoding.

use std::fmt;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use tracing::debug;

use graphite_pipeline::RgbaImage;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Output encoding for a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// Lossy JPEG. `quality` is clamped to `1..=100` when encoding.
    Jpeg {
        /// Encoder quality, higher is better.
        quality: u8,
    },
}

impl ExportFormat {
    /// JPEG at [`DEFAULT_JPEG_QUALITY`].
    pub const JPEG: Self = Self::Jpeg {
        quality: DEFAULT_JPEG_QUALITY,
    };

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
        }
    }

    /// MIME type of the encoded bytes.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }

    /// Same format with a different JPEG quality. PNG is unaffected.
    #[must_use]
    pub const fn with_quality(self, quality: u8) -> Self {
        match self {
            Self::Png => Self::Png,
            Self::Jpeg { .. } => Self::Jpeg { quality },
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => f.write_str("png"),
            Self::Jpeg { quality } => write!(f, "jpeg (quality {quality})"),
        }
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format: {0:?} (expected png or jpeg)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::JPEG),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

/// Errors from [`encode`].
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The sketch has no pixels.
    #[error("cannot export an empty image")]
    EmptyImage,

    /// The encoder rejected the buffer.
    #[error("failed to encode {format}: {source}")]
    Encode {
        /// Target format.
        format: ExportFormat,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },
}

/// Encode `image` in `format`.
///
/// # Errors
///
/// Returns [`ExportError::EmptyImage`] for a zero-sized buffer and
/// [`ExportError::Encode`] if the encoder fails.
pub fn encode(image: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyImage);
    }

    let mut buf = Vec::new();
    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut buf).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ExportFormat::Jpeg { quality } => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };
    result.map_err(|source| ExportError::Encode { format, source })?;

    debug!(%format, width, height, bytes = buf.len(), "encoded sketch");
    Ok(buf)
}
