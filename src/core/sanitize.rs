// src/core/sanitize.rs
//! Cell-text cleanup shared by every page spec.
//!
//! Names must go through [`normalize_name`] on both the roster and the grid
//! side, otherwise the club lookup silently misses.

use serde::{Deserialize, Serialize};

/// Mis-decoded renderings of `½` observed on federation pages, plus the glyph itself.
pub const DEFAULT_HALF_POINT_VARIANTS: &[&str] = &[
    "Ã‚Â½",     // UTF-8 bytes decoded as cp1252 twice
    "Â½",       // UTF-8 bytes decoded as Latin-1/cp1252
    "&frac12;", // entity left undecoded
    "\u{FFFD}", // Latin-1 byte 0xBD decoded as UTF-8
    "½",
];

/// Replacement table for the half-point glyph.
/// Variants are applied in order, so longer corruptions must come first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HalfPointTable {
    variants: Vec<String>,
}

impl From<Vec<String>> for HalfPointTable {
    fn from(v: Vec<String>) -> Self {
        Self::new(v)
    }
}

impl From<HalfPointTable> for Vec<String> {
    fn from(t: HalfPointTable) -> Self {
        t.variants
    }
}

impl Default for HalfPointTable {
    fn default() -> Self {
        Self::new(DEFAULT_HALF_POINT_VARIANTS.iter().copied())
    }
}

impl HalfPointTable {
    pub fn new<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut variants: Vec<String> = variants
            .into_iter()
            .map(Into::into)
            .filter(|v| !v.is_empty())
            .collect();
        // Longest first, so "Â½" is not half-eaten by a "½" rule.
        variants.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        variants.dedup();
        Self { variants }
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Replace every known variant with `.5`.
    pub fn repair(&self, text: &str) -> String {
        let mut out = s!(text);
        for v in &self.variants {
            if out.contains(v.as_str()) {
                out = out.replace(v.as_str(), ".5");
            }
        }
        out
    }

    /// True if the whole cell is a bare half point (nested grid score cells).
    pub fn is_half(&self, text: &str) -> bool {
        let t = text.trim();
        !t.is_empty() && (self.variants.iter().any(|v| v == t) || t == "0.5" || t == "0,5" || t == ".5")
    }
}

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

/// Collapse any whitespace run (NBSP included) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "BACHKAT  Fares" → "BACHKAT FARES"
pub fn normalize_name(raw: &str) -> String {
    normalize_ws(raw).to_uppercase()
}

/// First run of ASCII digits, 0 when there is none. "1541 F" → 1541
pub fn parse_integer(text: &str) -> u32 {
    let mut digits = s!();
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !digits.is_empty() {
            break;
        }
    }
    digits.parse().unwrap_or(0)
}

/// "4½" → 4.5, "12,5" → 12.5, junk → 0.
pub fn parse_points(text: &str, table: &HalfPointTable) -> f64 {
    parse_decimal(&table.repair(text)).unwrap_or(0.0)
}

/// Leading decimal prefix of a cell, `,` accepted as separator.
/// None when the cell does not start with a number.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let t = normalize_ws(text).replace(',', ".");
    let mut num = s!();
    let mut seen_dot = false;
    for (i, ch) in t.chars().enumerate() {
        match ch {
            '-' | '+' if i == 0 => num.push(ch),
            '0'..='9' => num.push(ch),
            '.' if !seen_dot => { seen_dot = true; num.push(ch); }
            _ => break,
        }
    }
    if num.starts_with('.') { num.insert(0, '0'); }
    if num.ends_with('.') { num.pop(); }
    if !num.chars().any(|c| c.is_ascii_digit()) { return None; }
    num.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn name_collapses_and_uppercases() {
        assert_eq!(normalize_name("BACHKAT  Fares"), "BACHKAT FARES");
        assert_eq!(normalize_name("  de\tla\n Tour\u{a0}Jean "), "DE LA TOUR JEAN");
        assert_eq!(normalize_name(""), "");
    }

    #[rstest]
    #[case("BACHKAT  Fares")]
    #[case("  élodie\u{a0}\u{a0}Müller ")]
    #[case("a&amp;nbsp;b")]
    #[case("\t\n")]
    fn name_is_idempotent(#[case] raw: &str) {
        let once = normalize_name(raw);
        assert_eq!(normalize_name(&once), once);
    }

    #[rstest]
    #[case("1541 F", 1541)]
    #[case("  12", 12)]
    #[case("Elo: 2010 (N)", 2010)]
    #[case("-", 0)]
    #[case("", 0)]
    #[case("99999999999999999999", 0)]
    fn integer_takes_first_digit_run(#[case] text: &str, #[case] expected: u32) {
        assert_eq!(parse_integer(text), expected);
    }

    #[rstest]
    #[case("4½")]
    #[case("4Â½")]
    #[case("4Ã‚Â½")]
    #[case("4&frac12;")]
    #[case("4\u{FFFD}")]
    #[case("4.5")]
    #[case("4,5")]
    fn points_repair_half_glyphs(#[case] text: &str) {
        assert_eq!(parse_points(text, &HalfPointTable::default()), 4.5);
    }

    #[test]
    fn points_edge_cases() {
        let t = HalfPointTable::default();
        assert_eq!(parse_points("½", &t), 0.5);
        assert_eq!(parse_points("7", &t), 7.0);
        assert_eq!(parse_points("", &t), 0.0);
        assert_eq!(parse_points("abc", &t), 0.0);
        assert_eq!(parse_points("3 pts", &t), 3.0);
    }

    #[test]
    fn custom_table_orders_longest_first() {
        let t = HalfPointTable::new(["½", "xx½"]);
        assert_eq!(t.variants()[0], "xx½");
        assert_eq!(t.repair("2xx½"), "2.5");
    }

    #[test]
    fn half_detection_is_whole_cell() {
        let t = HalfPointTable::default();
        assert!(t.is_half("½"));
        assert!(t.is_half(" Â½ "));
        assert!(!t.is_half("1½"));
        assert!(!t.is_half(""));
    }
}
