//! Download file names for exported sketches.

use crate::raster::ExportFormat;

/// Suffix appended to the source name.
const SKETCH_SUFFIX: &str = "-sketch";

/// Build `<base>-sketch.<ext>` from the source file name.
///
/// Any directory part and the last extension of `base` are dropped. An
/// empty base yields `sketch.<ext>`.
///
/// ```
/// use graphite_export::{ExportFormat, download_filename};
///
/// assert_eq!(download_filename("photos/cat.jpeg", ExportFormat::Png), "cat-sketch.png");
/// assert_eq!(download_filename("", ExportFormat::JPEG), "sketch.jpg");
/// ```
#[must_use]
pub fn download_filename(base: &str, format: ExportFormat) -> String {
    let name = base.rsplit(['/', '\\']).next().unwrap_or_default();
    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    };
    let stem = stem.trim();
    if stem.is_empty() {
        format!("sketch.{}", format.extension())
    } else {
        format!("{stem}{SKETCH_SUFFIX}.{}", format.extension())
    }
}
