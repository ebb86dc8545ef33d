use crate::clock::appearance::FontDescriptor;
use crate::clock::color::ClockColor;
use crate::clock::glyphs;
use crate::clock::layout::TextLayout;
use anyhow::{anyhow, Result};

/// An off-screen canvas the clock renders into before presenting.
pub trait ClockSurface {
    fn size(&self) -> (i32, i32);
    fn fill(&mut self, color: ClockColor);
    fn draw_text(
        &mut self,
        text: &str,
        layout: &TextLayout,
        color: ClockColor,
        font: &FontDescriptor,
    );
}

/// Portable in-memory back buffer. Pixels are row-major `0x00RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(anyhow!("frame buffer needs a non-empty size, got {width}x{height}"));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| anyhow!("frame buffer size {width}x{height} overflows"))?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|err| anyhow!("allocate {width}x{height} frame buffer: {err}"))?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<ClockColor> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y * self.width + x) as usize)
            .map(|px| ClockColor::from_pixel(*px))
    }

    /// Inclusive-exclusive bounds `(left, top, right, bottom)` of every pixel
    /// painted in `color`.
    pub fn bounds_of(&self, color: ClockColor) -> Option<(i32, i32, i32, i32)> {
        let target = color.to_pixel();
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for (idx, px) in self.pixels.iter().enumerate() {
            if *px != target {
                continue;
            }
            let x = idx as i32 % self.width;
            let y = idx as i32 / self.width;
            bounds = Some(match bounds {
                None => (x, y, x + 1, y + 1),
                Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x + 1), b.max(y + 1)),
            });
        }
        bounds
    }
}

impl ClockSurface for FrameBuffer {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: ClockColor) {
        self.pixels.fill(color.to_pixel());
    }

    fn draw_text(
        &mut self,
        text: &str,
        layout: &TextLayout,
        color: ClockColor,
        _font: &FontDescriptor,
    ) {
        glyphs::rasterize(
            &mut self.pixels,
            self.width,
            self.height,
            text,
            layout,
            color.to_pixel(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockSurface, FrameBuffer};
    use crate::clock::color::ClockColor;

    #[test]
    fn empty_sizes_are_rejected() {
        assert!(FrameBuffer::new(0, 10).is_err());
        assert!(FrameBuffer::new(10, -1).is_err());
    }

    #[test]
    fn fill_covers_every_pixel() {
        let mut frame = FrameBuffer::new(4, 3).expect("frame");
        frame.fill(ClockColor::rgb(9, 8, 7));
        assert_eq!(frame.pixels().len(), 12);
        assert_eq!(frame.bounds_of(ClockColor::rgb(9, 8, 7)), Some((0, 0, 4, 3)));
        assert_eq!(frame.pixel(3, 2), Some(ClockColor::rgb(9, 8, 7)));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn pixels_use_dib_channel_order() {
        let mut frame = FrameBuffer::new(1, 1).expect("frame");
        frame.fill(ClockColor::rgb(1, 2, 3));
        assert_eq!(frame.pixels(), &[0x0001_0203]);
    }
}
