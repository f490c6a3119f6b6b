//! Stroke-font text geometry
//!
//! Glyphs are drawn on a sixteen-segment layout inside a cell of width
//! [`GLYPH_WIDTH`] and height 1, baseline at y = 0. Each lit segment becomes
//! a two-point line cell. Lower case letters use the upper case shapes;
//! characters without a shape only advance the pen.

use vizcrate_core::{Point3f, PolyData};

pub const GLYPH_WIDTH: f32 = 0.6;
pub const GLYPH_ADVANCE: f32 = 0.8;
pub const LINE_ADVANCE: f32 = 1.4;

const A1: u16 = 1 << 0;
const A2: u16 = 1 << 1;
const B: u16 = 1 << 2;
const C: u16 = 1 << 3;
const D1: u16 = 1 << 4;
const D2: u16 = 1 << 5;
const E: u16 = 1 << 6;
const F: u16 = 1 << 7;
const G1: u16 = 1 << 8;
const G2: u16 = 1 << 9;
const H: u16 = 1 << 10;
const I: u16 = 1 << 11;
const J: u16 = 1 << 12;
const K: u16 = 1 << 13;
const L: u16 = 1 << 14;
const M: u16 = 1 << 15;

const A: u16 = A1 | A2;
const D: u16 = D1 | D2;
const G: u16 = G1 | G2;

/// Segment end points in glyph units `(x / GLYPH_WIDTH, y)`, indexed by bit
const SEGMENTS: [[(f32, f32); 2]; 16] = [
    [(0.0, 1.0), (0.5, 1.0)], // a1 top left
    [(0.5, 1.0), (1.0, 1.0)], // a2 top right
    [(1.0, 1.0), (1.0, 0.5)], // b  right upper
    [(1.0, 0.5), (1.0, 0.0)], // c  right lower
    [(0.0, 0.0), (0.5, 0.0)], // d1 bottom left
    [(0.5, 0.0), (1.0, 0.0)], // d2 bottom right
    [(0.0, 0.5), (0.0, 0.0)], // e  left lower
    [(0.0, 1.0), (0.0, 0.5)], // f  left upper
    [(0.0, 0.5), (0.5, 0.5)], // g1 middle left
    [(0.5, 0.5), (1.0, 0.5)], // g2 middle right
    [(0.0, 1.0), (0.5, 0.5)], // h  upper left diagonal
    [(0.5, 1.0), (0.5, 0.5)], // i  upper vertical
    [(1.0, 1.0), (0.5, 0.5)], // j  upper right diagonal
    [(0.5, 0.5), (1.0, 0.0)], // k  lower right diagonal
    [(0.5, 0.5), (0.5, 0.0)], // l  lower vertical
    [(0.5, 0.5), (0.0, 0.0)], // m  lower left diagonal
];

fn glyph(c: char) -> u16 {
    match c.to_ascii_uppercase() {
        '0' => A | B | C | D | E | F | J | M,
        '1' => B | C | J,
        '2' => A | B | G | E | D,
        '3' => A | B | G2 | C | D,
        '4' => F | G | B | C,
        '5' => A | F | G | C | D,
        '6' => A | F | E | D | C | G,
        '7' => A | B | C,
        '8' => A | B | C | D | E | F | G,
        '9' => A | B | C | D | F | G,
        'A' => A | B | C | E | F | G,
        'B' => A | B | C | D | I | L | G2,
        'C' => A | F | E | D,
        'D' => A | B | C | D | I | L,
        'E' => A | F | E | D | G1,
        'F' => A | F | E | G1,
        'G' => A | F | E | D | C | G2,
        'H' => F | E | B | C | G,
        'I' => A | I | L | D,
        'J' => B | C | D | E,
        'K' => F | E | G1 | J | K,
        'L' => F | E | D,
        'M' => F | E | H | J | B | C,
        'N' => F | E | H | K | C | B,
        'O' => A | B | C | D | E | F,
        'P' => A | B | F | E | G,
        'Q' => A | B | C | D | E | F | K,
        'R' => A | B | F | E | G | K,
        'S' => A | F | G | C | D,
        'T' => A | I | L,
        'U' => F | E | D | C | B,
        'V' => F | E | M | J,
        'W' => F | E | M | K | C | B,
        'X' => H | J | K | M,
        'Y' => H | J | L,
        'Z' => A | J | M | D,
        '-' => G,
        '+' => G | I | L,
        '_' => D,
        '=' => G | D,
        '*' => G | H | I | J | K | L | M,
        '/' => J | M,
        '\\' => H | K,
        '|' => I | L,
        '(' => J | K,
        ')' => H | M,
        '<' => J | K,
        '>' => H | M,
        '[' => A1 | F | E | D1,
        ']' => A2 | B | C | D2,
        '\'' => I,
        '"' => F | I,
        '.' | ',' => D1,
        ':' => L,
        '?' => A | B | G2 | L,
        '!' => I,
        '%' => A1 | F | J | M | C | D2,
        '#' => B | C | E | F | G | I | L,
        _ => 0,
    }
}

/// Text rendered as stroke geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorText {
    text: String,
}

impl VectorText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Line cells of every glyph; `'\n'` starts a new line below
    pub fn output(&self) -> PolyData {
        let mut data = PolyData::new();
        let mut pen_x = 0.0f32;
        let mut pen_y = 0.0f32;

        for c in self.text.chars() {
            if c == '\n' {
                pen_x = 0.0;
                pen_y -= LINE_ADVANCE;
                continue;
            }
            let mask = glyph(c);
            for (bit, segment) in SEGMENTS.iter().enumerate() {
                if mask & (1 << bit) == 0 {
                    continue;
                }
                let ids = segment
                    .iter()
                    .map(|&(sx, sy)| {
                        data.add_point(Point3f::new(pen_x + sx * GLYPH_WIDTH, pen_y + sy, 0.0))
                    })
                    .collect();
                data.lines.push(ids);
            }
            pen_x += GLYPH_ADVANCE;
        }
        data
    }
}
