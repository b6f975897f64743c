//! Text placement with built-in fonts

use crate::constants::{LARGE_FONT_SIZE, MEDIUM_FONT_SIZE, PARAGRAPH_LEADING, SMALL_FONT_SIZE};
use crate::types::FontChoice;
use printpdf::{Op, Point, Pt, TextItem};

/// Font sizes in points, already divided by the paper's font scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub small: f32,
    pub medium: f32,
    pub large: f32,
}

impl FontSizes {
    pub fn for_scaling(font_scaling: f32) -> Self {
        Self {
            small: SMALL_FONT_SIZE / font_scaling,
            medium: MEDIUM_FONT_SIZE / font_scaling,
            large: LARGE_FONT_SIZE / font_scaling,
        }
    }
}

/// Estimated rendered width of a line of text in points
pub fn text_width(text: &str, font: FontChoice, size: f32) -> f32 {
    text.chars().count() as f32 * size * font.char_width_ratio()
}

/// Characters of the 0x80..0x9F block of WinAnsiEncoding
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// WinAnsiEncoding code of a character, if the encoding has one
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, byte)| *byte),
    }
}

/// Encode text for a built-in font.
///
/// Characters WinAnsiEncoding cannot express become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            win_ansi_byte(c).unwrap_or_else(|| {
                log::warn!("{c:?} cannot be shown with a built-in font, replacing it with '?'");
                b'?'
            })
        })
        .collect()
}

/// Ops drawing one line with its baseline starting at (x, y)
pub fn line_ops(text: &str, x: f32, y: f32, font: FontChoice, size: f32) -> Vec<Op> {
    vec![
        Op::StartTextSection,
        Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        },
        Op::SetFontSizeBuiltinFont {
            font: font.builtin(),
            size: Pt(size),
        },
        Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: font.builtin(),
        },
        Op::EndTextSection,
    ]
}

/// Ops drawing one line horizontally centered on `center_x`
pub fn centered_line_ops(
    text: &str,
    center_x: f32,
    y: f32,
    font: FontChoice,
    size: f32,
) -> Vec<Op> {
    let x = center_x - text_width(text, font, size) / 2.0;
    line_ops(text, x, y, font, size)
}

/// Ops drawing a left-aligned paragraph whose first baseline is at (x, y).
///
/// Lines are trimmed; blank lines still advance the cursor.
pub fn paragraph_ops(text: &str, x: f32, y: f32, font: FontChoice, size: f32) -> Vec<Op> {
    let leading = size * PARAGRAPH_LEADING;
    let mut ops = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        ops.extend(line_ops(line, x, y - i as f32 * leading, font, size));
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_sizes_shrink_with_paper() {
        let a4 = FontSizes::for_scaling(1.0);
        assert_eq!((a4.small, a4.medium, a4.large), (16.0, 24.0, 40.0));

        let a6 = FontSizes::for_scaling(2.0);
        assert_eq!((a6.small, a6.medium, a6.large), (8.0, 12.0, 20.0));
    }

    #[test]
    fn test_courier_width_is_exact() {
        assert_eq!(text_width("abcd", FontChoice::Courier, 10.0), 24.0);
    }

    #[test]
    fn test_win_ansi_keeps_latin1_and_maps_punctuation() {
        assert_eq!(encode_win_ansi("\u{a9} 2021"), vec![0xA9, b' ', b'2', b'0', b'2', b'1']);
        assert_eq!(encode_win_ansi("\u{2014}\u{20AC}"), vec![0x97, 0x80]);
        assert_eq!(encode_win_ansi("plain"), b"plain".to_vec());
    }

    #[test]
    fn test_win_ansi_substitutes_unknown_characters() {
        assert_eq!(win_ansi_byte('\u{4E2D}'), None);
        assert_eq!(encode_win_ansi("a\u{4E2D}b"), b"a?b".to_vec());
    }

    #[test]
    fn test_paragraph_skips_blank_lines_but_keeps_spacing() {
        // Two text lines, two blank lines: 2 * 5 ops
        let ops = paragraph_ops("\nfirst\n\nsecond", 10.0, 100.0, FontChoice::Helvetica, 10.0);
        assert_eq!(ops.len(), 10);
    }
}
