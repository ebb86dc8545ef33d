use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClockColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ClockColor {
    pub const BLACK: ClockColor = ClockColor::rgb(0, 0, 0);
    pub const WHITE: ClockColor = ClockColor::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Win32 `COLORREF` layout: `0x00BBGGRR`. This is also the persisted value.
    pub const fn to_colorref(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }

    /// The high byte of a `COLORREF` carries palette flags and is ignored.
    pub const fn from_colorref(value: u32) -> Self {
        Self::rgb(
            (value & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            ((value >> 16) & 0xff) as u8,
        )
    }

    /// Frame pixel layout `0x00RRGGBB`, i.e. BGRA bytes in memory as a DIB expects.
    pub const fn to_pixel(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub const fn from_pixel(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }
}

impl std::fmt::Display for ClockColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::ClockColor;

    #[test]
    fn colorref_uses_bgr_byte_order() {
        let color = ClockColor::rgb(0x12, 0x34, 0x56);
        assert_eq!(color.to_colorref(), 0x0056_3412);
        assert_eq!(ClockColor::from_colorref(0x0056_3412), color);
    }

    #[test]
    fn colorref_flag_byte_is_dropped() {
        assert_eq!(
            ClockColor::from_colorref(0x0100_00ff),
            ClockColor::rgb(255, 0, 0)
        );
    }

    #[test]
    fn pixel_layout_matches_dib_bgra_memory_order() {
        let color = ClockColor::rgb(0x12, 0x34, 0x56);
        let pixel = color.to_pixel();
        assert_eq!(pixel.to_le_bytes(), [0x56, 0x34, 0x12, 0x00]);
        assert_eq!(ClockColor::from_pixel(pixel), color);
    }

    #[test]
    fn display_formats_as_hex() {
        assert_eq!(ClockColor::rgb(255, 8, 0).to_string(), "#ff0800");
    }
}
