//! Pointer-drag repositioning of the clock window.

/// Sizes and position the drag handler needs, all in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    pub client_width: i32,
    pub client_height: i32,
    /// Outer window size, border included. Clamping uses this.
    pub window_width: i32,
    pub window_height: i32,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Screen offset of the client origin from the window origin; the
    /// border width for a `WS_BORDER` popup.
    pub client_inset_x: i32,
    pub client_inset_y: i32,
    pub screen_width: i32,
    pub screen_height: i32,
}

impl WindowGeometry {
    pub fn client_contains(&self, point: (i32, i32)) -> bool {
        point.0 >= 0 && point.0 < self.client_width && point.1 >= 0 && point.1 < self.client_height
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    pub fn client_inset(&self) -> (i32, i32) {
        (self.client_inset_x, self.client_inset_y)
    }
}

/// Keeps the whole window on screen. When the window is larger than the
/// screen along an axis the origin pins to 0 on that axis.
pub fn clamp_origin(origin: (i32, i32), window: (i32, i32), screen: (i32, i32)) -> (i32, i32) {
    let max_x = (screen.0 - window.0).max(0);
    let max_y = (screen.1 - window.1).max(0);
    (origin.0.clamp(0, max_x), origin.1.clamp(0, max_y))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position relative to the client origin at pointer-down.
        grab_offset: (i32, i32),
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Starts a session when `client_point` lies inside the client area.
    /// Returns `true` when pointer capture should be taken.
    pub fn pointer_down(&mut self, client_point: (i32, i32), geometry: &WindowGeometry) -> bool {
        if !geometry.client_contains(client_point) {
            return false;
        }
        *self = Self::Dragging {
            grab_offset: client_point,
        };
        true
    }

    /// New clamped window origin for the pointer at `screen_point`, or `None`
    /// when no drag is in progress.
    pub fn pointer_move(
        &self,
        screen_point: (i32, i32),
        geometry: &WindowGeometry,
    ) -> Option<(i32, i32)> {
        let Self::Dragging { grab_offset } = *self else {
            return None;
        };
        let (inset_x, inset_y) = geometry.client_inset();
        let raw = (
            screen_point.0 - grab_offset.0 - inset_x,
            screen_point.1 - grab_offset.1 - inset_y,
        );
        Some(clamp_origin(
            raw,
            (geometry.window_width, geometry.window_height),
            (geometry.screen_width, geometry.screen_height),
        ))
    }

    /// Ends the session. Returns `true` when capture should be released.
    pub fn pointer_up(&mut self) -> bool {
        std::mem::take(self).is_dragging()
    }

    /// Abandons the session after capture or focus was taken away.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = std::mem::take(self).is_dragging();
        if was_dragging {
            tracing::warn!("drag session cancelled after pointer capture was lost");
        }
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_origin, DragState, WindowGeometry};

    fn geometry() -> WindowGeometry {
        WindowGeometry {
            client_width: 300,
            client_height: 150,
            window_width: 300,
            window_height: 150,
            origin_x: 100,
            origin_y: 100,
            client_inset_x: 0,
            client_inset_y: 0,
            screen_width: 1920,
            screen_height: 1080,
        }
    }

    fn bordered_geometry() -> WindowGeometry {
        WindowGeometry {
            client_width: 298,
            client_height: 148,
            client_inset_x: 1,
            client_inset_y: 1,
            ..geometry()
        }
    }

    #[test]
    fn pointer_down_outside_client_area_stays_idle() {
        let mut drag = DragState::default();
        assert!(!drag.pointer_down((300, 10), &geometry()));
        assert!(!drag.pointer_down((-1, 10), &geometry()));
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn drag_to_top_left_corner_clamps_to_zero() {
        let mut drag = DragState::default();
        assert!(drag.pointer_down((50, 50), &geometry()));
        assert_eq!(drag.pointer_move((40, 40), &geometry()), Some((0, 0)));
    }

    #[test]
    fn grab_offset_is_preserved_while_moving() {
        let mut drag = DragState::default();
        drag.pointer_down((50, 20), &geometry());
        assert_eq!(drag.pointer_move((700, 400), &geometry()), Some((650, 380)));
        assert_eq!(drag.pointer_move((710, 405), &geometry()), Some((660, 385)));
        assert_eq!(
            drag,
            DragState::Dragging {
                grab_offset: (50, 20)
            }
        );
    }

    #[test]
    fn border_inset_does_not_shift_the_window() {
        let geometry = bordered_geometry();
        let mut drag = DragState::default();
        assert!(drag.pointer_down((50, 50), &geometry));
        // client (50,50) sits at screen (151,151) with a one pixel border
        assert_eq!(drag.pointer_move((151, 151), &geometry), Some((100, 100)));
        assert_eq!(drag.pointer_move((161, 146), &geometry), Some((110, 95)));
    }

    #[test]
    fn move_without_session_does_nothing() {
        assert_eq!(DragState::Idle.pointer_move((10, 10), &geometry()), None);
    }

    #[test]
    fn pointer_up_and_cancel_return_to_idle() {
        let mut drag = DragState::default();
        drag.pointer_down((1, 1), &geometry());
        assert!(drag.pointer_up());
        assert!(!drag.pointer_up());

        drag.pointer_down((1, 1), &geometry());
        assert!(drag.cancel());
        assert!(!drag.is_dragging());
        assert!(!drag.cancel());
    }

    #[test]
    fn clamp_keeps_window_fully_visible() {
        assert_eq!(clamp_origin((1800, 1000), (300, 150), (1920, 1080)), (1620, 930));
        assert_eq!(clamp_origin((-5, 2000), (300, 150), (1920, 1080)), (0, 930));
        assert_eq!(clamp_origin((50, 50), (2000, 150), (1920, 1080)), (0, 50));
    }

    #[test]
    fn clamp_holds_for_displacement_sweep() {
        let geometry = geometry();
        let mut drag = DragState::default();
        drag.pointer_down((150, 75), &geometry);
        for dx in (-4000..4000).step_by(137) {
            for dy in (-3000..3000).step_by(113) {
                let (x, y) = drag
                    .pointer_move((100 + dx, 100 + dy), &geometry)
                    .expect("dragging");
                assert!((0..=1920 - 300).contains(&x), "x={x}");
                assert!((0..=1080 - 150).contains(&y), "y={y}");
            }
        }
    }
}
