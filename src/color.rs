//! Color text parsing for the theme editor fields.
//!
//! Operators type colors as hex, `rgb()`/`rgba()` calls or bare triples.
//! Everything is folded into `#RRGGBB`; unrecognized text yields `None` and the
//! caller keeps whatever value it had before.

use regex::Regex;
use std::sync::OnceLock;

fn hex_literal_regex() -> &'static Regex {
    static HEX_LITERAL: OnceLock<Regex> = OnceLock::new();
    HEX_LITERAL.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap())
}

fn bare_hex_regex() -> &'static Regex {
    static BARE_HEX: OnceLock<Regex> = OnceLock::new();
    BARE_HEX.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{6}$").unwrap())
}

fn rgb_call_regex() -> &'static Regex {
    static RGB_CALL: OnceLock<Regex> = OnceLock::new();
    RGB_CALL.get_or_init(|| {
        Regex::new(r"(?i)rgba?\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").unwrap()
    })
}

fn triple_regex() -> &'static Regex {
    static TRIPLE: OnceLock<Regex> = OnceLock::new();
    TRIPLE.get_or_init(|| Regex::new(r"(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").unwrap())
}

/// Parse user color text into hex.
///
/// `#RRGGBB` is returned as typed, `rgb(..)`/`rgba(..)` and `r, g, b`
/// become uppercase `#RRGGBB`, and six bare hex digits get a `#` prefix.
pub fn parse_color(input: &str) -> Option<String> {
    let input = input.trim();

    if input.starts_with('#') {
        return hex_literal_regex()
            .is_match(input)
            .then(|| input.to_string());
    }

    if let Some(caps) = rgb_call_regex().captures(input) {
        return channels_to_hex(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = triple_regex().captures(input) {
        return channels_to_hex(&caps[1], &caps[2], &caps[3]);
    }

    if bare_hex_regex().is_match(input) {
        return Some(format!("#{}", input));
    }

    None
}

fn channels_to_hex(r: &str, g: &str, b: &str) -> Option<String> {
    // u8 parsing rejects channels above 255
    let r = r.parse::<u8>().ok()?;
    let g = g.parse::<u8>().ok()?;
    let b = b.parse::<u8>().ok()?;
    Some(to_hex(r, g, b))
}

/// Format channels as `#RRGGBB`
pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    normalize_hex(&format!("#{:02x}{:02x}{:02x}", r, g, b))
}

/// Uppercase a hex color for display; empty input becomes `#000000`
pub fn normalize_hex(hex: &str) -> String {
    if hex.is_empty() {
        return "#000000".to_string();
    }
    hex.to_uppercase()
}
