// SPDX-License-Identifier: MPL-2.0
//! CSS color syntax validation for snackbar text.
//!
//! Accepted forms are `rgb(...)`, `rgba(...)`, `hsl(...)`, `hsla(...)` and
//! six-digit `#rrggbb`. Channels are range-checked (0-255 or 0-100% for RGB,
//! 0-360 for hue, 0-1 for alpha). Named colors are not accepted.

use std::fmt;
use std::sync::OnceLock;

use regex::RegexSet;

use crate::error::{Error, Result};

const BYTE: &str = r"0*(?:25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])";
const PERCENT: &str = r"0*(?:100(?:\.0+)?|[0-9]?[0-9](?:\.[0-9]+)?)%";
const HUE: &str = r"0*(?:360|3[0-5][0-9]|[12]?[0-9]?[0-9])";
const ALPHA: &str = r"0*(?:1|0(?:\.[0-9]+)?)";

/// The syntax a color string was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSyntax {
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Hex,
}

impl ColorSyntax {
    const ALL: [ColorSyntax; 5] = [
        ColorSyntax::Rgb,
        ColorSyntax::Rgba,
        ColorSyntax::Hsl,
        ColorSyntax::Hsla,
        ColorSyntax::Hex,
    ];

    /// Returns the pattern matching a whole color of this syntax.
    fn pattern(self) -> String {
        match self {
            ColorSyntax::Rgb => format!(
                r"^rgb\((?:(?:\s*{BYTE}\s*,){{2}}\s*{BYTE}|\s*{PERCENT}(?:\s*,\s*{PERCENT}){{2}})\s*\)$"
            ),
            ColorSyntax::Rgba => format!(
                r"^rgba\((?:(?:\s*{BYTE}\s*,){{3}}|(?:\s*{PERCENT}\s*,){{3}})\s*{ALPHA}\s*\)$"
            ),
            ColorSyntax::Hsl => {
                format!(r"^hsl\(\s*{HUE}\s*(?:,\s*{PERCENT}\s*){{2}}\)$")
            }
            ColorSyntax::Hsla => {
                format!(r"^hsla\(\s*{HUE}\s*(?:,\s*{PERCENT}\s*){{2}},\s*{ALPHA}\s*\)$")
            }
            ColorSyntax::Hex => r"^#[A-Fa-f0-9]{6}$".to_string(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ColorSyntax::Rgb => "rgb",
            ColorSyntax::Rgba => "rgba",
            ColorSyntax::Hsl => "hsl",
            ColorSyntax::Hsla => "hsla",
            ColorSyntax::Hex => "hex",
        }
    }
}

impl fmt::Display for ColorSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn color_patterns() -> Result<&'static RegexSet> {
    static PATTERNS: OnceLock<std::result::Result<RegexSet, regex::Error>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| RegexSet::new(ColorSyntax::ALL.map(ColorSyntax::pattern)))
        .as_ref()
        .map_err(|err| Error::InvalidArgument(format!("color patterns: {err}")))
}

/// Returns the syntax of `color`, or `None` if it is not a supported color.
///
/// Surrounding whitespace is ignored.
#[must_use]
pub fn parse_color(color: &str) -> Option<ColorSyntax> {
    let patterns = color_patterns().ok()?;
    let matched = patterns.matches(color.trim());
    ColorSyntax::ALL
        .into_iter()
        .zip(0..)
        .find_map(|(syntax, index)| matched.matched(index).then_some(syntax))
}

/// Checks `color` and returns its syntax.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] naming `color` if it is not a
/// supported color.
pub fn validate_color(color: &str) -> Result<ColorSyntax> {
    color_patterns()?;
    parse_color(color).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "Snackbar: {color} is invalid color. Use an RGB, RGBA, HSL, HSLA or hexadecimal color."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_each_syntax() {
        assert_eq!(parse_color("rgb(255, 0, 12)"), Some(ColorSyntax::Rgb));
        assert_eq!(parse_color("rgb(100%, 50.5%, 0%)"), Some(ColorSyntax::Rgb));
        assert_eq!(parse_color("rgba(0, 0, 0, 0.12)"), Some(ColorSyntax::Rgba));
        assert_eq!(parse_color("rgba(255,255,255,1)"), Some(ColorSyntax::Rgba));
        assert_eq!(parse_color("hsl(360, 100%, 50%)"), Some(ColorSyntax::Hsl));
        assert_eq!(parse_color("hsla(120, 40%, 20%, 0.5)"), Some(ColorSyntax::Hsla));
        assert_eq!(parse_color("#1a2B3c"), Some(ColorSyntax::Hex));
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert_eq!(parse_color("  #FFFFFF\n"), Some(ColorSyntax::Hex));
    }

    #[test]
    fn rejects_out_of_range_channels() {
        assert_eq!(parse_color("rgb(256, 0, 0)"), None);
        assert_eq!(parse_color("rgba(0, 0, 0, 1.5)"), None);
        assert_eq!(parse_color("hsl(361, 10%, 10%)"), None);
        assert_eq!(parse_color("hsl(10, 101%, 10%)"), None);
    }

    #[test]
    fn rejects_partial_and_named_colors() {
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#1234567"), None);
        assert_eq!(parse_color("color: rgb(1, 2, 3)"), None);
        assert_eq!(parse_color("rgb(1, 2)"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn validate_names_the_rejected_value() {
        let err = validate_color("blurple").unwrap_err();
        match err {
            Error::InvalidArgument(message) => {
                assert!(message.starts_with("Snackbar: blurple is invalid color"));
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
        assert_eq!(validate_color("#000000").unwrap(), ColorSyntax::Hex);
    }
}
