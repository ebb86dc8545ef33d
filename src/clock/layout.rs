use crate::clock::glyphs::{ink_extent, text_columns, GLYPH_ROWS};
use chrono::Timelike;

/// Zero-padded 24-hour `HH:MM:SS`.
pub fn format_clock_time<T: Timelike>(time: &T) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Text width is 80% of the client width.
pub fn font_width_for_canvas(canvas_width: i32) -> i32 {
    canvas_width.max(0) * 8 / 10
}

/// Cell height is a third of the text width, rounded to nearest the way
/// `MulDiv(width, 1, 3)` rounds.
pub fn font_height_for_canvas(canvas_width: i32) -> i32 {
    (font_width_for_canvas(canvas_width) + 1) / 3
}

/// Bitmap glyph cell height: `max(1, fontHeight / 10)`.
pub fn row_scale_for_font(font_height: i32) -> i32 {
    (font_height / 10).max(1)
}

/// Bitmap glyph cell width: `max(1, fontHeight / 14)`. Keeps the 39-column
/// clock string inside the 80% text width.
pub fn col_scale_for_font(font_height: i32) -> i32 {
    (font_height / 14).max(1)
}

/// Placement of the time string inside a canvas.
///
/// `x`, `y`, `width` and `height` describe the inked pixels, which are what
/// gets centered. `origin_x`/`origin_y` is where the first glyph cell
/// starts; it differs from the ink box when the outer glyphs have blank
/// columns, as `1` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    /// Font cell height handed to native text drawing.
    pub font_height: i32,
    pub row_scale: i32,
    pub col_scale: i32,
    pub origin_x: i32,
    pub origin_y: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TextLayout {
    pub fn centered(canvas: (i32, i32), text: &str) -> Self {
        let font_height = font_height_for_canvas(canvas.0);
        let row_scale = row_scale_for_font(font_height);
        let col_scale = col_scale_for_font(font_height);
        // Text without ink centers its advance box.
        let (left, right, top, bottom) =
            ink_extent(text).unwrap_or((0, text_columns(text), 0, GLYPH_ROWS));
        let width = (right - left) * col_scale;
        let height = (bottom - top) * row_scale;
        let x = (canvas.0 - width) / 2;
        let y = (canvas.1 - height) / 2;
        Self {
            font_height,
            row_scale,
            col_scale,
            origin_x: x - left * col_scale,
            origin_y: y - top * row_scale,
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}
