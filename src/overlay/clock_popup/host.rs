//! Boundary between the popup controller and the window system.

use chrono::NaiveTime;

use super::error::ChromeError;
use super::font_fit::TextMeasure;
use super::geometry::{Point, Rect, Size};
use super::state::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopupTimer {
    Clock,
    HoverPoll,
}

impl PopupTimer {
    pub const fn id(self) -> usize {
        match self {
            PopupTimer::Clock => 1,
            PopupTimer::HoverPoll => 2,
        }
    }

    pub fn from_id(id: usize) -> Option<Self> {
        match id {
            1 => Some(PopupTimer::Clock),
            2 => Some(PopupTimer::HoverPoll),
            _ => None,
        }
    }
}

/// Everything the controller needs from the native window. Implemented by
/// the Win32 host and by a recording fake in tests.
pub trait PopupHost: TextMeasure {
    fn set_visible(&mut self, visible: bool);
    fn set_maximized(&mut self, maximized: bool);
    fn move_to(&mut self, pos: Point);
    /// Outer window bounds in screen coordinates.
    fn window_rect(&self) -> Rect;
    fn client_size(&self) -> Size;

    fn cursor_pos(&self) -> Point;
    /// Usable area of every attached display.
    fn work_areas(&self) -> Vec<Rect>;
    /// Usable area of the display containing (or nearest to) `pt`.
    fn work_area_at(&self, pt: Point) -> Rect;

    fn wall_clock(&self) -> NaiveTime;
    /// (Re)arm a timer; arming an active timer replaces its interval.
    fn start_timer(&mut self, timer: PopupTimer, interval_ms: u32);
    fn stop_timer(&mut self, timer: PopupTimer);

    /// Hand the pressed primary button to the OS as a caption drag.
    fn begin_caption_drag(&mut self);

    fn set_corner_rounding(&mut self) -> Result<(), ChromeError>;
    fn set_caption_color(&mut self, color: Rgb) -> Result<(), ChromeError>;
    /// Clip the window to a polygon in window coordinates.
    fn set_clip_region(&mut self, outline: &[Point]) -> Result<(), ChromeError>;

    fn invalidate(&mut self);
}
