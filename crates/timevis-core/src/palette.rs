//! Category colours.
//!
//! The palette is an injected mapping from category key to colour. The
//! renderer looks categories up here; a missing key leaves the block
//! uncoloured rather than failing the render.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Alpha applied to block fills.
pub const FILL_ALPHA: u8 = 0x33;

/// An sRGB colour with alpha, serialized as `#rrggbb[aa]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Subtract `amount` from every channel, saturating at 0.
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Category key to colour mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPalette {
    colors: BTreeMap<String, Color>,
}

impl CategoryPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `category -> "#rrggbb"` entries, as stored in the config.
    ///
    /// # Errors
    /// Returns an error naming the first colour that does not parse.
    pub fn from_hex_map(entries: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let colors = entries
            .iter()
            .map(|(category, hex)| Ok((category.clone(), hex.parse()?)))
            .collect::<Result<_, ValidationError>>()?;
        Ok(Self { colors })
    }

    pub fn with(mut self, category: impl Into<String>, color: Color) -> Self {
        self.colors.insert(category.into(), color);
        self
    }

    pub fn get(&self, category: &str) -> Option<Color> {
        self.colors.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// The category table shipped as the configuration default.
pub fn default_palette_entries() -> BTreeMap<String, String> {
    [
        ("生活", "#a4e0af"),
        ("睡觉", "#F1A0AF"),
        ("运动", "#FFC2DB"),
        ("课程", "#ebc890"),
        ("作业", "#83a8d4"),
        ("游戏和社媒", "#ff7f1a"),
        ("社交活动", "#faec82"),
        ("考试", "#ed6958"),
        ("学习", "#96cbe3"),
        ("兴趣", "#e99dfa"),
        ("WarmUp", "#9dfae1"),
        ("找工", "#96a2d9"),
        ("杂事", "#c7d996"),
        ("Activity session", "#fcae53"),
        ("工作项目", "#3a9c85"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#a4e0af".parse::<Color>().unwrap(), Color::rgb(0xa4, 0xe0, 0xaf));
        assert_eq!("F1A0AF".parse::<Color>().unwrap(), Color::rgb(0xf1, 0xa0, 0xaf));
        assert_eq!("#a4e0af33".parse::<Color>().unwrap().a, 0x33);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!("#abc".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("#ééé".parse::<Color>().is_err());
    }

    #[test]
    fn rejects_signed_channels() {
        assert!("#+a+b+c".parse::<Color>().is_err());
        assert!("#+a+b+c+d".parse::<Color>().is_err());
        assert!("-1ff00".parse::<Color>().is_err());
    }

    #[test]
    fn darken_saturates_at_zero() {
        let c = Color::rgb(0xa4, 0x30, 0x10).darken(60);
        assert_eq!(c, Color::rgb(0xa4 - 60, 0, 0));
    }

    #[test]
    fn display_includes_alpha_only_when_translucent() {
        assert_eq!(Color::rgb(0xa4, 0xe0, 0xaf).to_string(), "#a4e0af");
        assert_eq!(
            Color::rgb(0xa4, 0xe0, 0xaf).with_alpha(FILL_ALPHA).to_string(),
            "#a4e0af33"
        );
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0x3a, 0x9c, 0x85)).unwrap();
        assert_eq!(json, "\"#3a9c85\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0x3a, 0x9c, 0x85));
    }

    #[test]
    fn default_palette_parses() {
        let palette = CategoryPalette::from_hex_map(&default_palette_entries()).unwrap();
        assert_eq!(palette.len(), 15);
        assert_eq!(palette.get("学习"), Some(Color::rgb(0x96, 0xcb, 0xe3)));
        assert_eq!(palette.get("Unknown"), None);
    }
}
