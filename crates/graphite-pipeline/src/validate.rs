//! Upload validation, performed before any decode attempt.
//!
//! Only JPEG and PNG are accepted, up to [`MAX_UPLOAD_BYTES`].

use std::path::Path;

use image::ImageFormat;
use tracing::warn;

use crate::types::SketchError;

/// Largest accepted upload: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME type for JPEG uploads.
pub const MIME_JPEG: &str = "image/jpeg";
/// MIME type for PNG uploads.
pub const MIME_PNG: &str = "image/png";

/// Map a declared MIME type to a decoder format.
///
/// Matching is case-insensitive and ignores parameters after `;`.
///
/// # Errors
///
/// Returns [`SketchError::UnsupportedType`] for anything other than
/// JPEG or PNG.
pub fn format_for_mime(mime: &str) -> Result<ImageFormat, SketchError> {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    if essence.eq_ignore_ascii_case(MIME_JPEG) {
        Ok(ImageFormat::Jpeg)
    } else if essence.eq_ignore_ascii_case(MIME_PNG) {
        Ok(ImageFormat::Png)
    } else {
        Err(SketchError::UnsupportedType(mime.to_owned()))
    }
}

/// Validate an upload and return the format it should be decoded as.
///
/// # Errors
///
/// Returns [`SketchError::UnsupportedType`] for a wrong MIME type,
/// [`SketchError::EmptyInput`] for zero bytes, and
/// [`SketchError::TooLarge`] above [`MAX_UPLOAD_BYTES`].
pub fn validate_upload(bytes: &[u8], mime: &str) -> Result<ImageFormat, SketchError> {
    let result = check(bytes, mime);
    if let Err(err) = &result {
        warn!(mime, size = bytes.len(), %err, "rejected upload");
    }
    result
}

fn check(bytes: &[u8], mime: &str) -> Result<ImageFormat, SketchError> {
    let format = format_for_mime(mime)?;
    if bytes.is_empty() {
        return Err(SketchError::EmptyInput);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(SketchError::TooLarge {
            size: bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(format)
}

/// Guess the MIME type of a file from its extension.
///
/// Returns `None` for anything that is not a JPEG or PNG extension.
#[must_use]
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(MIME_JPEG),
        "png" => Some(MIME_PNG),
        _ => None,
    }
}
