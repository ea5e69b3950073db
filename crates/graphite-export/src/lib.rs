//! graphite-export: Pure raster serializers (sans-IO)
//!
//! Encodes finished sketches as PNG or JPEG bytes and derives download
//! file names. Nothing here touches the filesystem; callers decide where
//! the bytes go.

pub mod filename;
pub mod raster;

pub use filename::download_filename;
pub use raster::{DEFAULT_JPEG_QUALITY, ExportError, ExportFormat, UnknownFormat, encode};
