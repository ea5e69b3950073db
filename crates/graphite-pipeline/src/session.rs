//! Single-document sketch session.
//!
//! [`SketchSession`] owns the one live [`SourceImage`], the current
//! [`SketchConfig`] and the most recent output buffer. Every generation
//! renders from a fresh copy of the source; the source itself is never
//! modified after loading.
//!
//! ```rust
//! # use graphite_pipeline::{SketchSession, SketchError, RgbaImage};
//! # fn run() -> Result<(), SketchError> {
//! let mut session = SketchSession::with_seed(7);
//! session.load_decoded(RgbaImage::from_pixel(1000, 500, image::Rgba([90, 90, 90, 255])));
//! session.apply_preset("ink")?;
//! session.on_frame();
//! let sketch = session.output();
//! assert_eq!(sketch.map(|s| s.dimensions()), Some((800, 400)));
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::coalesce::FrameCoalescer;
use crate::config::{Setting, SketchConfig};
use crate::preset::Preset;
use crate::scale::{self, DISPLAY_BOUNDS};
use crate::types::{Dimensions, RgbaImage, SketchError};
use crate::{grayscale, validate};

/// The decoded original, already scaled to display size.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: RgbaImage,
    natural: Dimensions,
}

impl SourceImage {
    /// Scale a decoded image to fit `bounds`, remembering its natural size.
    #[must_use]
    pub fn new(decoded: RgbaImage, bounds: Dimensions) -> Self {
        let natural = Dimensions::of(&decoded);
        let image = scale::to_display(decoded, bounds);
        Self { image, natural }
    }

    /// Display-size pixels.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Size of the image as decoded.
    #[must_use]
    pub const fn natural_dimensions(&self) -> Dimensions {
        self.natural
    }

    /// Size of the stored display buffer.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::of(&self.image)
    }
}

/// Owns the loaded image, the sketch config and the latest sketch.
#[derive(Debug)]
pub struct SketchSession {
    source: Option<SourceImage>,
    config: SketchConfig,
    output: Option<RgbaImage>,
    bounds: Dimensions,
    frames: FrameCoalescer,
    rng: StdRng,
}

impl Default for SketchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchSession {
    /// Create an empty session with an entropy-seeded noise source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty session whose noise is reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            source: None,
            config: SketchConfig::default(),
            output: None,
            bounds: DISPLAY_BOUNDS,
            frames: FrameCoalescer::new(),
            rng,
        }
    }

    /// Use different display bounds for images loaded from now on.
    #[must_use]
    pub fn with_display_bounds(mut self, bounds: Dimensions) -> Self {
        self.bounds = bounds;
        self
    }

    // ───────────────────────── Image lifecycle ──────────────────────────

    /// Validate, decode, scale and store an uploaded image, then render
    /// the first sketch.
    ///
    /// On any error the previously loaded image and sketch stay intact.
    ///
    /// # Errors
    ///
    /// Returns a validation error ([`SketchError::UnsupportedType`],
    /// [`SketchError::EmptyInput`], [`SketchError::TooLarge`]) before
    /// decoding, or [`SketchError::ImageDecode`] if decoding fails.
    pub fn load_image(&mut self, bytes: &[u8], mime: &str) -> Result<Dimensions, SketchError> {
        let format = validate::validate_upload(bytes, mime)?;
        let decoded = grayscale::decode(bytes, format)?;
        Ok(self.load_decoded(decoded))
    }

    /// Store an image the caller has already decoded, then render the
    /// first sketch. Returns the display dimensions.
    pub fn load_decoded(&mut self, decoded: RgbaImage) -> Dimensions {
        let source = SourceImage::new(decoded, self.bounds);
        info!(
            natural = %source.natural_dimensions(),
            display = %source.dimensions(),
            "loaded image",
        );
        let dimensions = source.dimensions();
        self.source = Some(source);
        self.generate_sketch();
        dimensions
    }

    /// Drop the image and sketch, returning to the pre-load state.
    ///
    /// The config is kept.
    pub fn clear(&mut self) {
        self.source = None;
        self.output = None;
        self.frames.settle();
        debug!("cleared session");
    }

    /// Whether an image is loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// The loaded source image.
    #[must_use]
    pub const fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Display dimensions of the loaded image.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.source.as_ref().map(SourceImage::dimensions)
    }

    /// Natural (decoded) dimensions of the loaded image.
    #[must_use]
    pub fn natural_dimensions(&self) -> Option<Dimensions> {
        self.source.as_ref().map(SourceImage::natural_dimensions)
    }

    // ──────────────────────────── Rendering ─────────────────────────────

    /// Render a sketch from a fresh copy of the source with the current
    /// config, replacing the previous output.
    ///
    /// Returns `None` when no image is loaded.
    pub fn generate_sketch(&mut self) -> Option<&RgbaImage> {
        let source = self.source.as_ref()?;
        let start = Instant::now();
        let generation = self.frames.settle();
        let sketch = crate::render(source.image(), &self.config, &mut self.rng);
        debug!(
            generation,
            style = %self.config.style,
            dimensions = %Dimensions::of(&sketch),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "generated sketch",
        );
        self.output = Some(sketch);
        self.output.as_ref()
    }

    /// Ask for a regeneration on the next frame.
    pub const fn request_regeneration(&mut self) -> u64 {
        self.frames.request()
    }

    /// Run at most one pending regeneration. Call once per display
    /// refresh. Returns whether a sketch was generated.
    pub fn on_frame(&mut self) -> bool {
        if !self.is_loaded() || self.frames.take().is_none() {
            return false;
        }
        self.generate_sketch().is_some()
    }

    /// Whether the output lags behind the config.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.frames.is_pending()
    }

    /// The most recent sketch, if any.
    #[must_use]
    pub const fn output(&self) -> Option<&RgbaImage> {
        self.output.as_ref()
    }

    // ────────────────────────── Configuration ───────────────────────────

    /// The current config.
    #[must_use]
    pub const fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Replace the whole config (clamped) and schedule a regeneration.
    pub fn set_config(&mut self, config: SketchConfig) {
        self.config = config.clamped();
        self.request_regeneration();
    }

    /// Change one typed field and schedule a regeneration.
    pub fn set(&mut self, setting: Setting) {
        self.config.set(setting);
        self.request_regeneration();
    }

    /// Change one field by name. Unknown keys are ignored and return
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidSettingValue`] when a known key
    /// gets a value it cannot parse. The config is left unchanged.
    pub fn update_setting(&mut self, key: &str, value: &str) -> Result<bool, SketchError> {
        let changed = self.config.update(key, value)?;
        if changed {
            self.request_regeneration();
        } else {
            debug!(key, "ignored unknown setting");
        }
        Ok(changed)
    }

    /// Replace the config with a named preset and schedule a
    /// regeneration. Returns the applied config.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::UnknownPreset`] without touching the
    /// config when no preset has that name.
    pub fn apply_preset(&mut self, name: &str) -> Result<SketchConfig, SketchError> {
        let preset =
            Preset::lookup(name).ok_or_else(|| SketchError::UnknownPreset(name.to_owned()))?;
        self.set_config(preset.config);
        Ok(self.config)
    }

    /// Restore the default config and, if an image is loaded,
    /// regenerate immediately.
    pub fn reset(&mut self) {
        self.config = SketchConfig::default();
        if self.is_loaded() {
            self.generate_sketch();
        } else {
            self.frames.settle();
        }
    }
}
