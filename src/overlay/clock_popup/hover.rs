//! Visibility of the close affordance.
//!
//! Pointer moves drive it directly. Leave notifications are not reliable once
//! the pointer crosses between overlapping regions, so a periodic poll of the
//! global cursor acts as a backstop and hides the affordance whenever the
//! cursor is outside the window.

use super::geometry::{Point, Rect, Size};

#[derive(Debug)]
pub struct HoverController {
    hot_zone: i32,
    close_visible: bool,
}

impl HoverController {
    pub fn new(hot_zone: i32) -> Self {
        Self {
            hot_zone,
            close_visible: false,
        }
    }

    pub fn close_visible(&self) -> bool {
        self.close_visible
    }

    pub fn set_hot_zone(&mut self, hot_zone: i32) {
        self.hot_zone = hot_zone;
    }

    pub fn in_hot_zone(&self, pt: Point, client: Size) -> bool {
        pt.x >= client.width - self.hot_zone && pt.y <= self.hot_zone
    }

    /// Returns true if visibility changed.
    pub fn on_pointer_move(&mut self, pt: Point, client: Size) -> bool {
        let visible = self.in_hot_zone(pt, client);
        self.set(visible)
    }

    /// Backstop check with the cursor in screen coordinates.
    pub fn on_poll(&mut self, cursor: Point, window_rect: Rect) -> bool {
        if self.close_visible && !window_rect.contains(cursor) {
            return self.set(false);
        }
        false
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        self.set(false)
    }

    pub fn force_hidden(&mut self) -> bool {
        self.set(false)
    }

    fn set(&mut self, visible: bool) -> bool {
        let changed = self.close_visible != visible;
        self.close_visible = visible;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: Size = Size::new(200, 80);

    #[test]
    fn hot_zone_is_top_right_square() {
        let mut h = HoverController::new(37);
        assert!(h.on_pointer_move(Point::new(163, 0), CLIENT));
        assert!(h.close_visible());
        assert!(!h.on_pointer_move(Point::new(199, 37), CLIENT));
        assert!(h.close_visible());
        assert!(h.on_pointer_move(Point::new(162, 10), CLIENT));
        assert!(!h.close_visible());
        h.on_pointer_move(Point::new(190, 38), CLIENT);
        assert!(!h.close_visible());
    }

    #[test]
    fn poll_hides_only_when_cursor_left_window() {
        let window = Rect::new(100, 100, 316, 219);
        let mut h = HoverController::new(37);
        h.on_pointer_move(Point::new(190, 5), CLIENT);

        assert!(!h.on_poll(Point::new(300, 110), window));
        assert!(h.close_visible());

        assert!(h.on_poll(Point::new(400, 110), window));
        assert!(!h.close_visible());
    }

    #[test]
    fn leave_hides() {
        let mut h = HoverController::new(37);
        h.on_pointer_move(Point::new(190, 5), CLIENT);
        assert!(h.on_pointer_leave());
        assert!(!h.force_hidden());
    }
}
