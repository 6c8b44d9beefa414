// Copyright 2026 The Sankey Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use serde::{Serialize, Serializer};

use crate::common::Result;
use crate::config_err;
use crate::datamodel::CategoryLevel;

/// Neutral gray used whenever a label has no entry in the color tables.
pub const FALLBACK_HEX: &str = "#BDC3C7";
/// Fill for every primary-category node.
pub const PRIMARY_HEX: &str = "#A1B2B9";
/// Alpha applied to visible edges, derived from the target node's fill.
pub const EDGE_ALPHA: f64 = 0.6;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    /// Parses a `#rrggbb` hex string into an opaque color.
    pub fn from_hex(hex: &str) -> Result<Color> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return config_err!(BadColor, hex.to_string());
        }
        let parse = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0);
        Ok(Color {
            r: parse(&digits[0..2]),
            g: parse(&digits[2..4]),
            b: parse(&digits[4..6]),
            a: 1.0,
        })
    }

    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

fn hex(s: &str) -> Color {
    // only called on curated literals below
    Color::from_hex(s).unwrap_or(Color::TRANSPARENT)
}

/// The color tables for one diagram: fills per broad category and specific
/// topic, a uniform primary fill, and the neutral fallback.
#[derive(Clone, Debug)]
pub struct Palette {
    broad: BTreeMap<String, Color>,
    specific: BTreeMap<String, Color>,
    primary: Color,
    fallback: Color,
    edge_alpha: f64,
}

lazy_static! {
    static ref STANDARD_PALETTE: Palette = Palette::build_standard();
}

impl Palette {
    /// The curated palette, established once at startup.
    pub fn standard() -> &'static Palette {
        &STANDARD_PALETTE
    }

    fn build_standard() -> Palette {
        let broad = [
            ("Ideological", "#FF6B6B"),
            ("Financial", "#4ECDC4"),
            ("Other", FALLBACK_HEX),
        ];
        let specific = [
            ("Cryptocurrency", "#45B7D1"),
            ("Money", "#85C1E9"),
            ("Gambling", "#5DADE2"),
            ("Extremist", "#F8C471"),
            ("Manosphere", "#BB8FCE"),
            ("Medical", "#F7DC6F"),
            ("News", "#D7BDE2"),
            ("Political", "#EC7063"),
            ("Religious", "#F9E79F"),
            ("Not at-risk", FALLBACK_HEX),
        ];
        Palette {
            broad: broad
                .iter()
                .map(|(label, c)| (label.to_string(), hex(c)))
                .collect(),
            specific: specific
                .iter()
                .map(|(label, c)| (label.to_string(), hex(c)))
                .collect(),
            primary: hex(PRIMARY_HEX),
            fallback: hex(FALLBACK_HEX),
            edge_alpha: EDGE_ALPHA,
        }
    }

    /// The nominal fill for a category; unknown labels get the neutral
    /// fallback rather than an error.
    pub fn node_color(&self, label: &str, level: CategoryLevel) -> Color {
        match level {
            CategoryLevel::Primary => self.primary,
            CategoryLevel::Broad => self.broad.get(label).copied().unwrap_or(self.fallback),
            CategoryLevel::Specific => self.specific.get(label).copied().unwrap_or(self.fallback),
        }
    }

    /// Edge color, derived from the deeper-level (target) endpoint's fill.
    /// Any edge touching an invisible node is fully transparent so the flow
    /// keeps its layout space without being drawn.
    pub fn edge_color(
        &self,
        target_label: &str,
        target_level: CategoryLevel,
        source_visible: bool,
        target_visible: bool,
    ) -> Color {
        if !source_visible || !target_visible {
            return Color::TRANSPARENT;
        }
        self.node_color(target_label, target_level)
            .with_alpha(self.edge_alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = Color::from_hex("#FF6B6B").unwrap();
        assert_eq!((c.r, c.g, c.b), (0xFF, 0x6B, 0x6B));
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_string(), "rgba(255, 107, 107, 1)");

        assert!(Color::from_hex("#FF6B").is_err());
        assert!(Color::from_hex("not-a-color").is_err());
    }

    #[test]
    fn edge_color_tracks_target_fill() {
        let palette = Palette::standard();
        let c = palette.edge_color("Ideological", CategoryLevel::Broad, true, true);
        assert_eq!(c.with_alpha(1.0), Color::from_hex("#FF6B6B").unwrap());
        assert_eq!(c.a, EDGE_ALPHA);
    }

    #[test]
    fn invisible_endpoints_force_transparency() {
        let palette = Palette::standard();
        for (src, tgt) in [(false, true), (true, false), (false, false)] {
            let c = palette.edge_color("Political", CategoryLevel::Specific, src, tgt);
            assert!(c.is_transparent());
        }
    }

    #[test]
    fn unknown_label_falls_back_to_neutral_gray() {
        let palette = Palette::standard();
        let c = palette.node_color("Astrology", CategoryLevel::Specific);
        assert_eq!(c, Color::from_hex(FALLBACK_HEX).unwrap());
    }
}
