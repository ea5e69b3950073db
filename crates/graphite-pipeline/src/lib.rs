//! graphite-pipeline: Pure sketch pipeline (sans-IO).
//!
//! Turns a photo into a pencil, charcoal or ink sketch through a chain
//! of pixel filters:
//! grayscale -> style compositor -> brightness/contrast -> optional invert.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and pixel buffers. Reading files, encoding downloads and
//! installing log subscribers live in `graphite-export` and the
//! `graphite` binary.

pub mod adjust;
pub mod blend;
pub mod blur;
pub mod channel;
pub mod coalesce;
pub mod config;
pub mod edge;
pub mod grayscale;
pub mod noise;
pub mod preset;
pub mod scale;
pub mod session;
pub mod style;
pub mod types;
pub mod validate;

use rand::RngCore;

pub use coalesce::FrameCoalescer;
pub use config::{Setting, SketchConfig};
pub use preset::{PRESETS, Preset};
pub use session::{SketchSession, SourceImage};
pub use style::{Compositor, Style};
pub use types::{Dimensions, ErrorKind, RgbaImage, SketchError};

/// Render a sketch of `source` with `config`.
///
/// The source is copied, never modified. The output always has the
/// source's dimensions. Percentages outside `0..=100` are clamped
/// first.
///
/// # Pipeline steps
///
/// 1. Copy the source into a working buffer
/// 2. Run the style compositor selected by `config.style`
/// 3. Brightness/contrast remap
/// 4. Invert, when `config.invert` is set
///
/// `rng` feeds the grain of the charcoal style; the other styles are
/// deterministic.
#[must_use = "returns the rendered sketch"]
pub fn render(source: &RgbaImage, config: &SketchConfig, rng: &mut dyn RngCore) -> RgbaImage {
    let config = &config.clamped();

    // 1-2. Style compositing on a private copy.
    let composed = config.style.compose(source.clone(), config, rng);

    // 3. Style-independent tone remap.
    let adjusted = adjust::brightness_contrast(composed, config.brightness, config.contrast);

    // 4. Optional inversion, always last.
    if config.invert {
        adjust::invert(adjusted)
    } else {
        adjusted
    }
}
