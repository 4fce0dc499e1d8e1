// ── Text styling ──────────────────────────────────────────────────────────────
//
// Pure-Rust description of how the text area is drawn: the font and the
// background colour.  No Win32 imports; `platform::win32::text_area` turns
// these into GDI objects.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Legacy font description restored by Style → Reset.
pub(crate) const DEFAULT_FONT_DESCRIPTION: &str = "Sans Serif,12,-1,5,50,0,0,0,0,0";

// ── Weight scales ─────────────────────────────────────────────────────────────

// Legacy descriptions use a 0–99 weight scale; GDI and CSS use 100–900.
// Pairs are (legacy, standard), ordered by weight.
const WEIGHT_TABLE: [(u16, u16); 9] = [
    (0, 100),
    (12, 200),
    (25, 300),
    (50, 400),
    (57, 500),
    (63, 600),
    (75, 700),
    (81, 800),
    (87, 900),
];

/// Normal (regular) weight on the 100–900 scale.
pub(crate) const WEIGHT_NORMAL: u16 = 400;

fn weight_from_legacy(legacy: u16) -> u16 {
    nearest(legacy, |&(l, _)| l).1
}

fn weight_to_legacy(weight: u16) -> u16 {
    nearest(weight, |&(_, w)| w).0
}

fn nearest(value: u16, key: impl Fn(&(u16, u16)) -> u16) -> (u16, u16) {
    WEIGHT_TABLE
        .iter()
        .copied()
        .min_by_key(|pair| key(pair).abs_diff(value))
        .unwrap_or((50, WEIGHT_NORMAL))
}

// ── FontDescriptor ────────────────────────────────────────────────────────────

/// The font applied to the whole text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FontDescriptor {
    pub(crate) family: String,
    /// Size in typographic points.
    pub(crate) point_size: u32,
    /// Weight on the 100–900 scale.
    pub(crate) weight: u16,
    pub(crate) italic: bool,
    pub(crate) underline: bool,
    pub(crate) strike_out: bool,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans Serif".to_owned(),
            point_size: 12,
            weight: WEIGHT_NORMAL,
            italic: false,
            underline: false,
            strike_out: false,
        }
    }
}

/// Why a font description or colour could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum StyleParseError {
    #[error("font description has no family name")]
    MissingFamily,
    #[error("invalid {field} {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Parses the ten-field legacy description:
/// `family,pointSize,pixelSize,styleHint,weight,italic,underline,strikeOut,fixedPitch,rawMode`.
///
/// Only the family is mandatory; missing trailing fields keep their defaults.
/// `pixelSize`, `styleHint`, `fixedPitch` and `rawMode` are accepted and
/// ignored.
impl FromStr for FontDescriptor {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(',').map(str::trim);
        let family = fields.next().filter(|f| !f.is_empty()).ok_or(StyleParseError::MissingFamily)?;

        let mut font = Self { family: family.to_owned(), ..Self::default() };
        for (index, value) in fields.enumerate() {
            match index {
                0 => {
                    let size: f32 = parse_field("point size", value)?;
                    if size <= 0.0 {
                        return Err(invalid("point size", value));
                    }
                    font.point_size = size.round() as u32;
                }
                3 => font.weight = weight_from_legacy(parse_field("weight", value)?),
                4 => font.italic = parse_flag("italic", value)?,
                5 => font.underline = parse_flag("underline", value)?,
                6 => font.strike_out = parse_flag("strike-out", value)?,
                _ => {}
            }
        }
        Ok(font)
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},-1,5,{},{},{},{},0,0",
            self.family,
            self.point_size,
            weight_to_legacy(self.weight),
            u8::from(self.italic),
            u8::from(self.underline),
            u8::from(self.strike_out),
        )
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, StyleParseError> {
    value.parse().map_err(|_| invalid(field, value))
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, StyleParseError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(invalid(field, value)),
    }
}

fn invalid(field: &'static str, value: &str) -> StyleParseError {
    StyleParseError::InvalidField { field, value: value.to_owned() }
}

// ── Rgb ───────────────────────────────────────────────────────────────────────

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const WHITE: Self = Self::new(255, 255, 255);

    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ── Style ─────────────────────────────────────────────────────────────────────

/// Everything the Style menu can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Style {
    pub(crate) font: FontDescriptor,
    pub(crate) background: Rgb,
}

impl Default for Style {
    /// The state Style → Reset returns to.
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT_DESCRIPTION.parse().unwrap_or_default(),
            background: Rgb::WHITE,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
