//! Palette registry.
//!
//! A card is painted with one [`Palette`]: a background, an accent and two
//! text colors. Palettes are picked from a closed set of built-ins or supplied
//! as an explicit custom bundle. Unknown names are rejected when a
//! [`PaletteRef`] is parsed, so resolution itself cannot fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{CardError, CardResult};

/// A fully resolved palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub background: Color,
    pub accent: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

/// The built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuiltinPalette {
    #[default]
    BakuretsuDark,
    MidnightBlue,
    DeepPurple,
    Ocean,
    Forest,
    Sunset,
    Monochrome,
    Retrowave,
}

impl BuiltinPalette {
    pub const ALL: [BuiltinPalette; 8] = [
        BuiltinPalette::BakuretsuDark,
        BuiltinPalette::MidnightBlue,
        BuiltinPalette::DeepPurple,
        BuiltinPalette::Ocean,
        BuiltinPalette::Forest,
        BuiltinPalette::Sunset,
        BuiltinPalette::Monochrome,
        BuiltinPalette::Retrowave,
    ];

    /// Display name, as shown to users and accepted by [`BuiltinPalette::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinPalette::BakuretsuDark => "Bakuretsu Dark",
            BuiltinPalette::MidnightBlue => "Midnight Blue",
            BuiltinPalette::DeepPurple => "Deep Purple",
            BuiltinPalette::Ocean => "Ocean",
            BuiltinPalette::Forest => "Forest",
            BuiltinPalette::Sunset => "Sunset",
            BuiltinPalette::Monochrome => "Monochrome",
            BuiltinPalette::Retrowave => "Retrowave",
        }
    }

    /// Look up a built-in by name.
    ///
    /// Matching ignores case, whitespace, `-` and `_`, so `"midnight-blue"`
    /// and `"Midnight Blue"` are the same palette.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|p| normalize_name(p.name()) == wanted)
    }

    /// `(background, text_primary, text_secondary, accent)`
    fn hex_colors(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            BuiltinPalette::BakuretsuDark => ("#12121a", "#ffffff", "#9ca3af", "#ec4899"),
            BuiltinPalette::MidnightBlue => ("#0a192f", "#e6f1ff", "#8892b0", "#64ffda"),
            BuiltinPalette::DeepPurple => ("#1a1025", "#ffffff", "#a78bfa", "#c084fc"),
            BuiltinPalette::Ocean => ("#0c1821", "#ffffff", "#94a3b8", "#38bdf8"),
            BuiltinPalette::Forest => ("#14201a", "#ffffff", "#86efac", "#22c55e"),
            BuiltinPalette::Sunset => ("#1c1412", "#ffffff", "#fca5a5", "#f97316"),
            BuiltinPalette::Monochrome => ("#171717", "#ffffff", "#a3a3a3", "#ffffff"),
            BuiltinPalette::Retrowave => ("#1a1a2e", "#edf2f4", "#e056fd", "#00d9ff"),
        }
    }

    pub fn palette(&self) -> Palette {
        let (background, primary, secondary, accent) = self.hex_colors();
        // The table above is static and well-formed.
        let parse = |hex: &str| Color::from_hex(hex).unwrap_or_default();
        Palette {
            name: self.name().to_string(),
            background: parse(background),
            accent: parse(accent),
            text_primary: parse(primary),
            text_secondary: parse(secondary),
        }
    }
}

impl fmt::Display for BuiltinPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinPalette {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinPalette::from_name(s).ok_or_else(|| CardError::UnknownPalette(s.to_string()))
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// An explicit, user-supplied color set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPalette {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub background: Color,
    pub accent: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl From<Palette> for CustomPalette {
    fn from(p: Palette) -> Self {
        Self {
            name: Some(p.name),
            background: p.background,
            accent: p.accent,
            text_primary: p.text_primary,
            text_secondary: p.text_secondary,
        }
    }
}

/// Per-slot color overrides applied on top of a resolved palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteOverrides {
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default)]
    pub accent: Option<Color>,
    #[serde(default)]
    pub text_primary: Option<Color>,
    #[serde(default)]
    pub text_secondary: Option<Color>,
}

impl PaletteOverrides {
    pub fn is_empty(&self) -> bool {
        self.background.is_none()
            && self.accent.is_none()
            && self.text_primary.is_none()
            && self.text_secondary.is_none()
    }

    /// Apply onto `base`. With no overrides the base reference is returned
    /// unchanged; otherwise the result is a custom palette named after the base.
    pub fn apply(&self, base: PaletteRef) -> PaletteRef {
        if self.is_empty() {
            return base;
        }
        let resolved = resolve(&base);
        PaletteRef::Custom(CustomPalette {
            name: Some(format!("{} (custom)", resolved.name)),
            background: self.background.unwrap_or(resolved.background),
            accent: self.accent.unwrap_or(resolved.accent),
            text_primary: self.text_primary.unwrap_or(resolved.text_primary),
            text_secondary: self.text_secondary.unwrap_or(resolved.text_secondary),
        })
    }
}

/// Reference to a palette: a built-in tag or an explicit color bundle.
///
/// In request files this is either a palette name string or a map with the
/// four color slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteSpec", into = "PaletteSpec")]
pub enum PaletteRef {
    Builtin(BuiltinPalette),
    Custom(CustomPalette),
}

impl Default for PaletteRef {
    fn default() -> Self {
        PaletteRef::Builtin(BuiltinPalette::default())
    }
}

impl PaletteRef {
    /// Parse a built-in palette name.
    pub fn from_name(name: &str) -> CardResult<Self> {
        name.parse::<BuiltinPalette>().map(PaletteRef::Builtin)
    }

    /// Build a reference from an optional name and optional custom colors.
    ///
    /// Custom colors take precedence. A name that is not a built-in, with no
    /// custom colors supplied, fails with [`CardError::UnknownPalette`].
    /// Neither supplied gives the default palette.
    pub fn from_parts(name: Option<&str>, custom: Option<CustomPalette>) -> CardResult<Self> {
        match (name, custom) {
            (name, Some(mut custom)) => {
                if custom.name.is_none() {
                    custom.name = name.map(str::to_string);
                }
                Ok(PaletteRef::Custom(custom))
            }
            (Some(name), None) => Self::from_name(name),
            (None, None) => Ok(PaletteRef::default()),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            PaletteRef::Builtin(p) => p.name().to_string(),
            PaletteRef::Custom(c) => c.name.clone().unwrap_or_else(|| "Custom".to_string()),
        }
    }
}

/// Resolve a palette reference to concrete colors.
pub fn resolve(palette: &PaletteRef) -> Palette {
    match palette {
        PaletteRef::Builtin(builtin) => builtin.palette(),
        PaletteRef::Custom(custom) => Palette {
            name: custom.name.clone().unwrap_or_else(|| "Custom".to_string()),
            background: custom.background,
            accent: custom.accent,
            text_primary: custom.text_primary,
            text_secondary: custom.text_secondary,
        },
    }
}

/// Serialized form of [`PaletteRef`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PaletteSpec {
    Name(String),
    Custom(CustomPalette),
}

impl TryFrom<PaletteSpec> for PaletteRef {
    type Error = CardError;

    fn try_from(spec: PaletteSpec) -> Result<Self, Self::Error> {
        match spec {
            PaletteSpec::Name(name) => PaletteRef::from_name(&name),
            PaletteSpec::Custom(custom) => Ok(PaletteRef::Custom(custom)),
        }
    }
}

impl From<PaletteRef> for PaletteSpec {
    fn from(palette: PaletteRef) -> Self {
        match palette {
            PaletteRef::Builtin(p) => PaletteSpec::Name(p.name().to_string()),
            PaletteRef::Custom(c) => PaletteSpec::Custom(c),
        }
    }
}
