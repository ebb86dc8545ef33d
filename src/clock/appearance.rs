use crate::clock::color::ClockColor;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT_FACE: &str = "Arial";
pub const FONT_WEIGHT_NORMAL: i32 = 400;
pub const FONT_WEIGHT_BOLD: i32 = 700;

/// Face and style of the clock text. The size is never stored here; it is
/// derived from the client width on every tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FontDescriptor {
    pub face: String,
    #[serde(default = "default_weight")]
    pub weight: i32,
    #[serde(default)]
    pub italic: bool,
}

fn default_weight() -> i32 {
    FONT_WEIGHT_NORMAL
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            face: DEFAULT_FONT_FACE.to_string(),
            weight: FONT_WEIGHT_NORMAL,
            italic: false,
        }
    }
}

impl FontDescriptor {
    pub fn with_face(face: impl Into<String>) -> Self {
        Self {
            face: face.into(),
            ..Self::default()
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= FONT_WEIGHT_BOLD
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppearanceState {
    pub text_color: ClockColor,
    pub background_color: ClockColor,
    pub font: FontDescriptor,
}

impl Default for AppearanceState {
    fn default() -> Self {
        Self {
            text_color: ClockColor::BLACK,
            background_color: ClockColor::WHITE,
            font: FontDescriptor::default(),
        }
    }
}

/// Which appearance field a chooser edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    Text,
    Background,
}

impl AppearanceState {
    pub fn color(&self, target: ColorTarget) -> ClockColor {
        match target {
            ColorTarget::Text => self.text_color,
            ColorTarget::Background => self.background_color,
        }
    }

    /// Returns `true` when the stored value changed.
    pub fn set_color(&mut self, target: ColorTarget, color: ClockColor) -> bool {
        let slot = match target {
            ColorTarget::Text => &mut self.text_color,
            ColorTarget::Background => &mut self.background_color,
        };
        let changed = *slot != color;
        *slot = color;
        changed
    }

    pub fn set_font(&mut self, font: FontDescriptor) -> bool {
        let changed = self.font != font;
        self.font = font;
        changed
    }
}
