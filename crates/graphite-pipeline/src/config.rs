//! Sketch configuration: style selection plus the three percentage
//! parameters and the invert flag.
//!
//! Percentages are always kept in `0..=100`. Every write path clamps,
//! including deserialized JSON (see [`SketchConfig::clamped`]).

use serde::{Deserialize, Serialize};

use crate::style::Style;
use crate::types::SketchError;

/// Upper bound of every percentage parameter.
pub const MAX_PERCENT: u8 = 100;

/// User-facing sketch parameters.
///
/// Replaced whole when a preset is applied; otherwise mutated one field
/// at a time. Only the current value matters, no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchConfig {
    /// Which style pipeline to run.
    pub style: Style,
    /// Drives blur passes, edge thresholds and the tone curve (0-100).
    pub intensity: u8,
    /// Final contrast remap, 50 is neutral (0-100).
    pub contrast: u8,
    /// Final brightness remap, 50 is neutral (0-100).
    pub brightness: u8,
    /// Invert the finished sketch.
    pub invert: bool,
}

impl SketchConfig {
    /// Default style.
    pub const DEFAULT_STYLE: Style = Style::Pencil;
    /// Default intensity.
    pub const DEFAULT_INTENSITY: u8 = 50;
    /// Default contrast.
    pub const DEFAULT_CONTRAST: u8 = 50;
    /// Default brightness.
    pub const DEFAULT_BRIGHTNESS: u8 = 50;
    /// Default invert flag.
    pub const DEFAULT_INVERT: bool = false;

    /// Build a config, clamping each percentage into range.
    #[must_use]
    pub const fn new(
        style: Style,
        intensity: u8,
        contrast: u8,
        brightness: u8,
        invert: bool,
    ) -> Self {
        Self {
            style,
            intensity: clamp_percent(intensity),
            contrast: clamp_percent(contrast),
            brightness: clamp_percent(brightness),
            invert,
        }
    }

    /// Copy of `self` with every percentage clamped into range.
    #[must_use]
    pub const fn clamped(self) -> Self {
        Self::new(
            self.style,
            self.intensity,
            self.contrast,
            self.brightness,
            self.invert,
        )
    }

    /// Apply a single typed setting. Percentages are clamped.
    pub const fn set(&mut self, setting: Setting) {
        match setting {
            Setting::Style(style) => self.style = style,
            Setting::Intensity(v) => self.intensity = clamp_percent(v),
            Setting::Contrast(v) => self.contrast = clamp_percent(v),
            Setting::Brightness(v) => self.brightness = clamp_percent(v),
            Setting::Invert(v) => self.invert = v,
        }
    }

    /// Apply a setting given as a key/value string pair.
    ///
    /// Returns `Ok(true)` if a field was written and `Ok(false)` if the
    /// key is not a config field; unknown keys are ignored, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidSettingValue`] if the key is known
    /// but the value cannot be parsed for it.
    pub fn update(&mut self, key: &str, value: &str) -> Result<bool, SketchError> {
        match Setting::parse(key, value)? {
            Some(setting) => {
                self.set(setting);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            style: Self::DEFAULT_STYLE,
            intensity: Self::DEFAULT_INTENSITY,
            contrast: Self::DEFAULT_CONTRAST,
            brightness: Self::DEFAULT_BRIGHTNESS,
            invert: Self::DEFAULT_INVERT,
        }
    }
}

/// Clamp a percentage into `0..=100`.
#[must_use]
pub const fn clamp_percent(value: u8) -> u8 {
    if value > MAX_PERCENT {
        MAX_PERCENT
    } else {
        value
    }
}

/// One config field together with its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Sketch style.
    Style(Style),
    /// Intensity percentage.
    Intensity(u8),
    /// Contrast percentage.
    Contrast(u8),
    /// Brightness percentage.
    Brightness(u8),
    /// Invert flag.
    Invert(bool),
}

impl Setting {
    /// Recognized setting keys.
    pub const KEYS: [&'static str; 5] = ["style", "intensity", "contrast", "brightness", "invert"];

    /// Parse a key/value pair.
    ///
    /// Returns `Ok(None)` for keys that are not config fields. Style
    /// names that are not recognized select the pencil style. Numeric
    /// values may be fractional or out of range; they are rounded and
    /// clamped to `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::InvalidSettingValue`] when the value does
    /// not parse for a known key.
    pub fn parse(key: &str, value: &str) -> Result<Option<Self>, SketchError> {
        let invalid = || SketchError::InvalidSettingValue {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        let setting = match key {
            "style" => Self::Style(Style::from_name_or_default(value)),
            "intensity" => Self::Intensity(parse_percent(value).ok_or_else(invalid)?),
            "contrast" => Self::Contrast(parse_percent(value).ok_or_else(invalid)?),
            "brightness" => Self::Brightness(parse_percent(value).ok_or_else(invalid)?),
            "invert" => Self::Invert(parse_flag(value).ok_or_else(invalid)?),
            _ => return Ok(None),
        };
        Ok(Some(setting))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_percent(value: &str) -> Option<u8> {
    let number: f64 = value.trim().parse().ok()?;
    if number.is_nan() {
        return None;
    }
    Some(number.round().clamp(0.0, f64::from(MAX_PERCENT)) as u8)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SketchConfig::default();
        assert_eq!(config.style, Style::Pencil);
        assert_eq!(config.intensity, 50);
        assert_eq!(config.contrast, 50);
        assert_eq!(config.brightness, 50);
        assert!(!config.invert);
    }

    #[test]
    fn new_clamps_percentages() {
        let config = SketchConfig::new(Style::Ink, 250, 101, 100, true);
        assert_eq!(config.intensity, 100);
        assert_eq!(config.contrast, 100);
        assert_eq!(config.brightness, 100);
    }

    #[test]
    fn typed_set_clamps() {
        let mut config = SketchConfig::default();
        config.set(Setting::Intensity(200));
        config.set(Setting::Style(Style::Charcoal));
        assert_eq!(config.intensity, 100);
        assert_eq!(config.style, Style::Charcoal);
    }

    #[test]
    fn update_known_keys() {
        let mut config = SketchConfig::default();
        assert!(config.update("intensity", "75").unwrap());
        assert!(config.update("contrast", "12.6").unwrap());
        assert!(config.update("brightness", "-20").unwrap());
        assert!(config.update("invert", "true").unwrap());
        assert!(config.update("style", "ink").unwrap());
        assert_eq!(config, SketchConfig::new(Style::Ink, 75, 13, 0, true));
    }

    #[test]
    fn update_unknown_key_is_ignored() {
        let mut config = SketchConfig::default();
        let before = config;
        assert!(!config.update("saturation", "90").unwrap());
        assert_eq!(config, before);
    }

    #[test]
    fn update_bad_value_is_an_error_and_leaves_config() {
        let mut config = SketchConfig::default();
        let before = config;
        let err = config.update("intensity", "lots").unwrap_err();
        assert!(matches!(err, SketchError::InvalidSettingValue { .. }));
        assert!(config.update("invert", "maybe").is_err());
        assert!(config.update("contrast", "NaN").is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn unknown_style_value_selects_pencil() {
        let mut config = SketchConfig::new(Style::Ink, 50, 50, 50, false);
        assert!(config.update("style", "watercolor").unwrap());
        assert_eq!(config.style, Style::Pencil);
    }

    #[test]
    fn json_uses_camel_case() {
        let config = SketchConfig::new(Style::DetailedPencil, 10, 20, 30, true);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"style":"detailedPencil","intensity":10,"contrast":20,"brightness":30,"invert":true}"#,
        );
        let back: SketchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn json_missing_fields_use_defaults() {
        let config: SketchConfig = serde_json::from_str(r#"{"style":"ink"}"#).unwrap();
        assert_eq!(config, SketchConfig::new(Style::Ink, 50, 50, 50, false));
    }

    #[test]
    fn json_out_of_range_is_clamped_by_clamped() {
        let config: SketchConfig = serde_json::from_str(r#"{"intensity":180}"#).unwrap();
        assert_eq!(config.clamped().intensity, 100);
    }
}
