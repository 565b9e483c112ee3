//! Static font-metric tables used to estimate how many lines a text block wraps to.
//!
//! Character widths are in em units (relative to font size). This is an approximation of the
//! browser's shaping, good enough to turn a paragraph into a line count; documents that carry
//! exact `lines` or `height` values bypass it entirely.
//!
//! Tables cover ASCII 0x20..=0x7E (95 printable characters), index = (char as usize) - 32.
//! CJK and other full-width characters measure one em; remaining non-ASCII characters fall back
//! to the table's average width.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Font families offered by the resume themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Default theme font: humanist sans-serif.
    Inter,
    /// Serif theme font.
    ComputerModern,
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inter" => Ok(FontFamily::Inter),
            "computer_modern" | "computer-modern" | "cm" => Ok(FontFamily::ComputerModern),
            other => Err(format!("unknown font family '{other}'")),
        }
    }
}

pub struct FontMetricTable {
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if is_full_width(c) {
            1.0
        } else {
            self.average_char_width
        }
    }

    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Number of lines `text` occupies when greedily wrapped at `width_em`.
    ///
    /// Explicit newlines start a new line. Words wider than the line (including unbroken CJK
    /// runs) break between characters. Empty text wraps to zero lines.
    pub fn wrapped_lines(&self, text: &str, width_em: f32) -> u32 {
        if text.trim().is_empty() || width_em <= 0.0 {
            return 0;
        }
        text.split('\n')
            .map(|paragraph| self.paragraph_lines(paragraph, width_em))
            .sum()
    }

    fn paragraph_lines(&self, paragraph: &str, width_em: f32) -> u32 {
        let mut lines = 1u32;
        let mut current = 0.0_f32;
        let mut first = true;

        for word in paragraph.split_whitespace() {
            let word_w = self.measure_str(word);
            let space_w = if first { 0.0 } else { self.space_width };

            if word_w > width_em {
                // Break character by character, continuing on the current line.
                if !first {
                    current += space_w;
                }
                for c in word.chars() {
                    let w = self.char_width(c);
                    if current + w > width_em && current > 0.0 {
                        lines += 1;
                        current = w;
                    } else {
                        current += w;
                    }
                }
                first = false;
            } else if !first && current + space_w + word_w > width_em {
                lines += 1;
                current = word_w;
            } else {
                current += space_w + word_w;
                first = false;
            }
        }
        lines
    }
}

fn is_full_width(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6)
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static INTER_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.52,
    space_width: 0.25,
};

/// Roughly 90% of Inter.
static COMPUTER_MODERN_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.23, 0.27, 0.34, 0.50, 0.50, 0.80, 0.60, 0.20, 0.30, 0.30, 0.35, 0.53, 0.25, 0.30, 0.25, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.53, 0.53, 0.53, 0.45, 0.92,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.60, 0.55, 0.55, 0.60, 0.50, 0.45, 0.60, 0.60, 0.23, 0.35, 0.55, 0.48, 0.70,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.60, 0.65, 0.50, 0.65, 0.55, 0.45, 0.50, 0.60, 0.60, 0.80, 0.55, 0.55, 0.50,
        // [     \     ]     ^     _     `
        0.25, 0.28, 0.25, 0.42, 0.50, 0.31,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.50, 0.50, 0.45, 0.50, 0.50, 0.28, 0.50, 0.50, 0.20, 0.20, 0.48, 0.20, 0.75,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.50, 0.50, 0.50, 0.30, 0.40, 0.35, 0.50, 0.45, 0.65, 0.45, 0.45, 0.40,
        // {     |     }     ~
        0.30, 0.23, 0.30, 0.53,
    ],
    average_char_width: 0.47,
    space_width: 0.23,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Inter => &INTER_TABLE,
        FontFamily::ComputerModern => &COMPUTER_MODERN_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::Inter);
        // "Rust" = R(0.61) + u(0.56) + s(0.44) + t(0.39) = 2.00
        let width = metrics.measure_str("Rust");
        assert!((width - 2.00).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_cjk_is_full_width_and_accented_falls_back() {
        let metrics = get_metrics(FontFamily::Inter);
        assert!((metrics.measure_str("简历") - 2.0).abs() < 1e-4);
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-4);
        let narrower = get_metrics(FontFamily::ComputerModern);
        assert!(narrower.average_char_width < metrics.average_char_width);
    }

    #[test]
    fn test_wrapped_lines_empty_is_zero() {
        let metrics = get_metrics(FontFamily::Inter);
        assert_eq!(metrics.wrapped_lines("", 50.0), 0);
        assert_eq!(metrics.wrapped_lines("   ", 50.0), 0);
    }

    #[test]
    fn test_wrapped_lines_short_text_is_one_line() {
        let metrics = get_metrics(FontFamily::Inter);
        assert_eq!(metrics.wrapped_lines("Rust", 50.0), 1);
    }

    #[test]
    fn test_wrapped_lines_wraps_long_text() {
        let metrics = get_metrics(FontFamily::Inter);
        // "word" = 0.72 + 0.56 + 0.33 + 0.56 = 2.17em, plus 0.25em spaces.
        // Ten words per 24em line: 10 * 2.17 + 9 * 0.25 = 23.95.
        let text = "word ".repeat(30);
        assert_eq!(metrics.wrapped_lines(&text, 24.0), 3);
    }

    #[test]
    fn test_wrapped_lines_honours_newlines() {
        let metrics = get_metrics(FontFamily::Inter);
        assert_eq!(metrics.wrapped_lines("first\nsecond\nthird", 50.0), 3);
    }

    #[test]
    fn test_unbroken_cjk_run_breaks_between_characters() {
        let metrics = get_metrics(FontFamily::Inter);
        // 120 full-width characters at 50em per line.
        let text = "负".repeat(120);
        assert_eq!(metrics.wrapped_lines(&text, 50.0), 3);
    }

    #[test]
    fn test_serif_measures_narrower_than_sans() {
        let text = "Architected distributed caching layer";
        let inter = get_metrics(FontFamily::Inter).measure_str(text);
        let cm = get_metrics(FontFamily::ComputerModern).measure_str(text);
        assert!(cm < inter);
    }

    #[test]
    fn test_font_family_from_str() {
        assert_eq!("Inter".parse::<FontFamily>(), Ok(FontFamily::Inter));
        assert_eq!(
            "computer-modern".parse::<FontFamily>(),
            Ok(FontFamily::ComputerModern)
        );
        assert!("comic-sans".parse::<FontFamily>().is_err());
    }
}
