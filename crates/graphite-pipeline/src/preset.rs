//! Named, fixed bundles of sketch settings.

use crate::config::SketchConfig;
use crate::style::Style;

/// A named preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Lookup name, e.g. `"soft-pencil"`.
    pub name: &'static str,
    /// The complete config the preset applies.
    pub config: SketchConfig,
}

/// Every preset, in display order.
pub const PRESETS: [Preset; 4] = [
    Preset {
        name: "soft-pencil",
        config: SketchConfig::new(Style::Pencil, 40, 45, 55, false),
    },
    Preset {
        name: "dark-pencil",
        config: SketchConfig::new(Style::Pencil, 70, 60, 45, false),
    },
    Preset {
        name: "charcoal",
        config: SketchConfig::new(Style::Charcoal, 65, 70, 40, false),
    },
    Preset {
        name: "ink",
        config: SketchConfig::new(Style::Ink, 80, 85, 50, false),
    },
];

impl Preset {
    /// Find a preset by exact name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<&'static Self> {
        PRESETS.iter().find(|preset| preset.name == name)
    }

    /// Names of all presets.
    pub fn names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|preset| preset.name)
    }
}
