//! Built-in 5x7 bitmap glyphs for the portable frame buffer.
//!
//! Only the characters a `HH:MM:SS` string can contain are defined; anything
//! else advances like a digit and draws nothing.

use crate::clock::layout::TextLayout;

pub const GLYPH_ROWS: i32 = 7;
const GLYPH_GAP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub width: i32,
    /// One bitmask per row, most significant used bit is the leftmost column.
    pub rows: [u8; GLYPH_ROWS as usize],
}

impl Glyph {
    pub fn is_set(&self, col: i32, row: i32) -> bool {
        if col < 0 || col >= self.width || row < 0 || row >= GLYPH_ROWS {
            return false;
        }
        let bit = self.width - 1 - col;
        self.rows[row as usize] & (1 << bit) != 0
    }
}

const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

const COLON: Glyph = Glyph {
    width: 1,
    rows: [0, 1, 1, 0, 1, 1, 0],
};

const BLANK: Glyph = Glyph {
    width: 5,
    rows: [0; 7],
};

pub fn glyph_for(ch: char) -> Glyph {
    match ch {
        '0'..='9' => Glyph {
            width: 5,
            rows: DIGITS[(ch as u8 - b'0') as usize],
        },
        ':' => COLON,
        _ => BLANK,
    }
}

/// Width of `text` in glyph columns, gaps between glyphs included.
pub fn text_columns(text: &str) -> i32 {
    let mut columns = 0;
    let mut count = 0;
    for ch in text.chars() {
        columns += glyph_for(ch).width;
        count += 1;
    }
    if count > 1 {
        columns += GLYPH_GAP * (count - 1);
    }
    columns
}

/// Inked cells of `text` as `(left, right, top, bottom)` glyph-cell
/// coordinates, right and bottom exclusive. `None` when nothing is inked.
pub fn ink_extent(text: &str) -> Option<(i32, i32, i32, i32)> {
    let mut extent: Option<(i32, i32, i32, i32)> = None;
    let mut pen = 0;
    for ch in text.chars() {
        let glyph = glyph_for(ch);
        for row in 0..GLYPH_ROWS {
            for col in 0..glyph.width {
                if !glyph.is_set(col, row) {
                    continue;
                }
                let x = pen + col;
                extent = Some(match extent {
                    None => (x, x + 1, row, row + 1),
                    Some((l, r, t, b)) => (l.min(x), r.max(x + 1), t.min(row), b.max(row + 1)),
                });
            }
        }
        pen += glyph.width + GLYPH_GAP;
    }
    extent
}

/// Rasterizes `text` into a row-major `0x00RRGGBB` pixel slice, clipping
/// everything that falls outside `width` x `height`.
pub fn rasterize(
    pixels: &mut [u32],
    width: i32,
    height: i32,
    text: &str,
    layout: &TextLayout,
    color: u32,
) {
    if width <= 0 || height <= 0 || pixels.len() < (width as usize) * (height as usize) {
        return;
    }

    let mut pen_x = layout.origin_x;
    for ch in text.chars() {
        let glyph = glyph_for(ch);
        for row in 0..GLYPH_ROWS {
            for col in 0..glyph.width {
                if glyph.is_set(col, row) {
                    fill_block(
                        pixels,
                        width,
                        height,
                        pen_x + col * layout.col_scale,
                        layout.origin_y + row * layout.row_scale,
                        layout.col_scale,
                        layout.row_scale,
                        color,
                    );
                }
            }
        }
        pen_x += (glyph.width + GLYPH_GAP) * layout.col_scale;
    }
}

#[allow(clippy::too_many_arguments)]
fn fill_block(
    pixels: &mut [u32],
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    block_w: i32,
    block_h: i32,
    color: u32,
) {
    let x0 = x.clamp(0, width);
    let x1 = (x + block_w).clamp(0, width);
    let y0 = y.clamp(0, height);
    let y1 = (y + block_h).clamp(0, height);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    for py in y0..y1 {
        let start = (py * width + x0) as usize;
        let end = (py * width + x1) as usize;
        pixels[start..end].fill(color);
    }
}
