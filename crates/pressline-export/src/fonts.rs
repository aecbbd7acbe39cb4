//! Standard Type1 fonts and their metrics.
//!
//! Only the two base-14 fonts the document layout uses are supported. Both
//! are referenced by name and never embedded, so every conforming viewer
//! ships them. Advance widths come from the Adobe AFM files, in 1/1000 em.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    /// PostScript name used as the `BaseFont` entry.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Key under which the font is registered in the page resources.
    pub fn resource_key(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    fn metrics(self) -> &'static Metrics {
        match self {
            Font::Helvetica => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    /// Distance from the top of a line box to the baseline, in points.
    pub fn ascent(self, size: f32) -> f32 {
        self.metrics().ascender as f32 / 1000.0 * size
    }

    /// Line box height including the font's built-in gap, in points.
    pub fn line_height(self, size: f32) -> f32 {
        let m = self.metrics();
        (m.bbox_top - m.bbox_bottom) as f32 / 1000.0 * size
    }

    /// Width of already encoded WinAnsi bytes, in points.
    pub fn encoded_width(self, bytes: &[u8], size: f32) -> f32 {
        let m = self.metrics();
        let units: u32 = bytes.iter().map(|&b| u32::from(m.advance(b))).sum();
        units as f32 / 1000.0 * size
    }

    /// Width of `text` as it will be drawn, in points.
    pub fn measure(self, text: &str, size: f32) -> f32 {
        self.encoded_width(&encode_win_ansi(text), size)
    }
}

struct Metrics {
    ascender: i16,
    bbox_bottom: i16,
    bbox_top: i16,
    /// Advances for 0x20..=0x7E.
    ascii: [u16; 95],
}

impl Metrics {
    fn advance(&self, byte: u8) -> u16 {
        match byte {
            0x20..=0x7E => self.ascii[usize::from(byte - 0x20)],
            0xA0 => 278,
            0x85 => 1000,
            0x91 | 0x92 => 222,
            0x93 | 0x94 => 333,
            0x95 => 350,
            0x96 => 556,
            0x97 => 1000,
            _ => 556,
        }
    }
}

#[rustfmt::skip]
static HELVETICA: Metrics = Metrics {
    ascender: 718,
    bbox_bottom: -225,
    bbox_top: 931,
    ascii: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ],
};

#[rustfmt::skip]
static HELVETICA_BOLD: Metrics = Metrics {
    ascender: 718,
    bbox_bottom: -228,
    bbox_top: 962,
    ascii: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ],
};

/// Encode text for a WinAnsiEncoding simple font.
///
/// Latin-1 maps through unchanged; the typographic punctuation that lives in
/// the 0x80..0x9F block is remapped; tabs become a space; anything else is
/// replaced with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|&c| c != '\r' && c != '\n')
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{2030}' => 0x89,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// Inverse of [`encode_win_ansi`] for the characters it produces.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80 => '\u{20AC}',
            0x82 => '\u{201A}',
            0x84 => '\u{201E}',
            0x85 => '\u{2026}',
            0x86 => '\u{2020}',
            0x87 => '\u{2021}',
            0x89 => '\u{2030}',
            0x91 => '\u{2018}',
            0x92 => '\u{2019}',
            0x93 => '\u{201C}',
            0x94 => '\u{201D}',
            0x95 => '\u{2022}',
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            0x99 => '\u{2122}',
            other => char::from(other),
        })
        .collect()
}
