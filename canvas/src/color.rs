//! Colors and the swatch palette.
//!
//! A [`Color`] is either the `transparent` sentinel ("unpainted") or a paint
//! string exactly as the palette or the remote store supplied it: a CSS name,
//! a hex literal, or the `rgb(...)` form browsers report for swatch
//! backgrounds. The string is the wire form; [`Color::to_rgba`] is only
//! consulted by raster surfaces that need concrete bytes.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire spelling of the unpainted sentinel.
pub const TRANSPARENT: &str = "transparent";

/// Name of the swatch that paints [`Color::Transparent`].
pub const ERASER: &str = "eraser";

/// Swatches offered when no palette is configured.
pub const DEFAULT_PALETTE: &[&str] = &["black", "white", "red", "orange", "yellow", "green", "blue", "purple"];

/// A cell color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    /// Unpainted. Never stored remotely.
    #[default]
    Transparent,
    /// A painted color, kept verbatim.
    Paint(String),
}

impl Color {
    /// Parse a color string. Blank input and `transparent` (any case) map to
    /// [`Color::Transparent`]; anything else is kept as a paint string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(TRANSPARENT) {
            Self::Transparent
        } else {
            Self::Paint(trimmed.to_owned())
        }
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// The wire spelling of this color.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Transparent => TRANSPARENT,
            Self::Paint(s) => s,
        }
    }

    /// Resolve to RGBA bytes. `None` when the paint string is not a
    /// recognised name or literal.
    #[must_use]
    pub fn to_rgba(&self) -> Option<[u8; 4]> {
        match self {
            Self::Transparent => Some([0, 0, 0, 0]),
            Self::Paint(s) => {
                let lower = s.to_ascii_lowercase();
                if let Some(hex) = lower.strip_prefix('#') {
                    parse_hex(hex)
                } else if let Some(args) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
                    parse_rgb_args(args, true)
                } else if let Some(args) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
                    parse_rgb_args(args, false)
                } else {
                    named_rgb(&lower).map(|[r, g, b]| [r, g, b, 255])
                }
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Color {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for Color {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        match color {
            Color::Transparent => TRANSPARENT.to_owned(),
            Color::Paint(s) => s,
        }
    }
}

fn radix_u8(digits: Option<&str>) -> Option<u8> {
    let Ok(value) = u8::from_str_radix(digits?, 16) else {
        return None;
    };
    Some(value)
}

fn parse_hex(hex: &str) -> Option<[u8; 4]> {
    let nibble = |i: usize| radix_u8(hex.get(i..=i)).map(|n| n * 17);
    let byte = |i: usize| radix_u8(hex.get(i..i + 2));
    match hex.len() {
        3 => Some([nibble(0)?, nibble(1)?, nibble(2)?, 255]),
        4 => Some([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

fn parse_rgb_args(args: &str, with_alpha: bool) -> Option<[u8; 4]> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let mut rgba = [0, 0, 0, 255];
    for (slot, part) in rgba.iter_mut().zip(&parts[..3]) {
        let Ok(value) = part.parse::<u8>() else {
            return None;
        };
        *slot = value;
    }
    if with_alpha {
        let Ok(alpha) = parts[3].parse::<f64>() else {
            return None;
        };
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            rgba[3] = (alpha * 255.0).round() as u8;
        }
    }
    Some(rgba)
}

fn named_rgb(name: &str) -> Option<[u8; 3]> {
    let rgb = match name {
        "black" => [0, 0, 0],
        "white" => [255, 255, 255],
        "red" => [255, 0, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "cyan" | "aqua" => [0, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255],
        "silver" => [192, 192, 192],
        "gray" | "grey" => [128, 128, 128],
        "maroon" => [128, 0, 0],
        "olive" => [128, 128, 0],
        "purple" => [128, 0, 128],
        "teal" => [0, 128, 128],
        "navy" => [0, 0, 128],
        "orange" => [255, 165, 0],
        "pink" => [255, 192, 203],
        "brown" => [165, 42, 42],
        "gold" => [255, 215, 0],
        "indigo" => [75, 0, 130],
        "violet" => [238, 130, 238],
        "crimson" => [220, 20, 60],
        "coral" => [255, 127, 80],
        "salmon" => [250, 128, 114],
        "turquoise" => [64, 224, 208],
        "skyblue" => [135, 206, 235],
        "lightblue" => [173, 216, 230],
        "darkgreen" => [0, 100, 0],
        "beige" => [245, 245, 220],
        "tan" => [210, 180, 140],
        "chocolate" => [210, 105, 30],
        _ => return None,
    };
    Some(rgb)
}

/// A named palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub name: String,
    pub color: Color,
}

impl Swatch {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self { name: name.into(), color }
    }

    #[must_use]
    pub fn is_eraser(&self) -> bool {
        self.name == ERASER
    }
}

/// The closed set of colors a user may paint with.
///
/// Always contains the [`ERASER`] swatch, whose color is transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.iter().map(|name| Swatch::new(*name, Color::parse(name))))
    }
}

impl Palette {
    /// Build a palette from swatches, dropping duplicate names and appending
    /// the eraser when absent.
    pub fn new(swatches: impl IntoIterator<Item = Swatch>) -> Self {
        let mut out: Vec<Swatch> = Vec::new();
        for swatch in swatches {
            if out.iter().any(|s| s.name == swatch.name) {
                continue;
            }
            out.push(swatch);
        }
        if !out.iter().any(Swatch::is_eraser) {
            out.push(Swatch::new(ERASER, Color::Transparent));
        }
        Self { swatches: out }
    }

    /// Parse a comma-separated list such as `"black,red,#00ff00"`.
    ///
    /// Each entry names its own swatch. `eraser` and `transparent` entries
    /// map to the eraser. A blank list yields the default palette.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        let entries: Vec<&str> = list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
        if entries.is_empty() {
            return Self::default();
        }
        Self::new(entries.into_iter().map(|entry| {
            let color = Color::parse(entry);
            if entry.eq_ignore_ascii_case(ERASER) || color.is_transparent() {
                Swatch::new(ERASER, Color::Transparent)
            } else {
                Swatch::new(entry, color)
            }
        }))
    }

    /// Look up a swatch by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Swatch> {
        let name = name.trim();
        self.swatches.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }
}
