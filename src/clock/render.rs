use crate::clock::appearance::AppearanceState;
use crate::clock::layout::{format_clock_time, TextLayout};
use crate::clock::surface::ClockSurface;
use chrono::{Local, Timelike};

/// Renders the current local time. See [`render_at`].
pub fn render<S>(surface: &mut S, appearance: &AppearanceState) -> Option<TextLayout>
where
    S: ClockSurface + ?Sized,
{
    render_at(surface, appearance, &Local::now())
}

/// Fills the surface with the background color and draws `time` centered in
/// the text color. Returns `None` without touching the surface when it has
/// no drawable area.
pub fn render_at<S, T>(
    surface: &mut S,
    appearance: &AppearanceState,
    time: &T,
) -> Option<TextLayout>
where
    S: ClockSurface + ?Sized,
    T: Timelike,
{
    let (width, height) = surface.size();
    if width <= 0 || height <= 0 {
        return None;
    }

    let text = format_clock_time(time);
    let layout = TextLayout::centered((width, height), &text);
    surface.fill(appearance.background_color);
    surface.draw_text(&text, &layout, appearance.text_color, &appearance.font);
    Some(layout)
}

#[cfg(test)]
mod tests {
    use super::render_at;
    use crate::clock::appearance::{AppearanceState, FontDescriptor};
    use crate::clock::color::ClockColor;
    use crate::clock::layout::TextLayout;
    use crate::clock::surface::{ClockSurface, FrameBuffer};
    use chrono::NaiveTime;

    #[derive(Default)]
    struct RecordingSurface {
        size: (i32, i32),
        calls: Vec<String>,
    }

    impl ClockSurface for RecordingSurface {
        fn size(&self) -> (i32, i32) {
            self.size
        }

        fn fill(&mut self, color: ClockColor) {
            self.calls.push(format!("fill {color}"));
        }

        fn draw_text(
            &mut self,
            text: &str,
            _layout: &TextLayout,
            color: ClockColor,
            font: &FontDescriptor,
        ) {
            self.calls.push(format!("text {text} {color} {}", font.face));
        }
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).expect("valid time")
    }

    #[test]
    fn background_is_filled_before_text_is_drawn() {
        let mut surface = RecordingSurface {
            size: (300, 150),
            ..Default::default()
        };
        let appearance = AppearanceState {
            text_color: ClockColor::rgb(255, 0, 0),
            ..AppearanceState::default()
        };
        render_at(&mut surface, &appearance, &time(9, 5, 3)).expect("rendered");
        assert_eq!(
            surface.calls,
            vec![
                "fill #ffffff".to_string(),
                "text 09:05:03 #ff0000 Arial".to_string()
            ]
        );
    }

    #[test]
    fn empty_surface_is_left_untouched() {
        for size in [(0, 150), (300, 0), (-5, -5)] {
            let mut surface = RecordingSurface {
                size,
                ..Default::default()
            };
            assert!(render_at(&mut surface, &AppearanceState::default(), &time(1, 2, 3)).is_none());
            assert!(surface.calls.is_empty());
        }
    }

    #[test]
    fn frame_contains_both_colors_after_render() {
        let mut frame = FrameBuffer::new(300, 150).expect("frame");
        let appearance = AppearanceState::default();
        render_at(&mut frame, &appearance, &time(12, 0, 0)).expect("rendered");
        assert!(frame.bounds_of(ClockColor::BLACK).is_some());
        assert_eq!(frame.pixel(0, 0), Some(ClockColor::WHITE));
        assert_eq!(frame.pixel(299, 149), Some(ClockColor::WHITE));
    }
}
