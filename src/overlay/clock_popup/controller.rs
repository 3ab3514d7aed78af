//! The popup controller: owns every piece of mutable popup state and turns
//! tray, theme, timer and pointer events into host calls.

use tracing::{debug, info, warn};

use super::chrome::ChromeContext;
use super::font_fit::fit_font_size;
use super::geometry::{
    flatten_outline, resolve_show_position, rounded_outline, ChromeMetrics, Point, Rect,
};
use super::host::{PopupHost, PopupTimer};
use super::hover::HoverController;
use super::state::{PopupPhase, PopupView, ThemeState, WindowState};
use super::ticker::{delay_to_next_second, format_time};

/// Arc sampling used for the clipped-region fallback.
const OUTLINE_ARC_STEPS: u32 = 8;

#[derive(Clone, Debug)]
pub struct PopupSettings {
    pub metrics: ChromeMetrics,
    pub font_family: String,
    pub hover_poll_ms: u32,
}

pub struct ClockPopup<H: PopupHost> {
    host: H,
    settings: PopupSettings,
    /// `settings.metrics` scaled to the window's current DPI.
    metrics: ChromeMetrics,
    state: WindowState,
    hover: HoverController,
    theme: ThemeState,
    text: String,
    font_size: i32,
    /// Compositor corner rounding was rejected; clip the window ourselves.
    legacy_rounding: bool,
}

impl<H: PopupHost> ClockPopup<H> {
    pub fn new(host: H, settings: PopupSettings, theme: ThemeState) -> Self {
        let hover = HoverController::new(settings.metrics.hot_zone());
        let text = format_time(host.wall_clock());
        Self {
            host,
            metrics: settings.metrics,
            settings,
            state: WindowState::default(),
            hover,
            theme,
            text,
            font_size: 0,
            legacy_rounding: false,
        }
    }

    /// One-time setup after the native window exists (still hidden).
    pub fn initialize(&mut self) {
        if let Err(e) = self.host.set_corner_rounding() {
            warn!("corner rounding unavailable, clipping manually: {e}");
            self.legacy_rounding = true;
        }
        self.apply_theme(self.theme);
        self.on_resize();
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn is_maximized(&self) -> bool {
        self.state.maximized
    }

    pub fn phase(&self) -> PopupPhase {
        self.state.phase()
    }

    pub fn metrics(&self) -> &ChromeMetrics {
        &self.metrics
    }

    /// Rescale every chrome metric for a window now rendered at `dpi`.
    pub fn set_dpi(&mut self, dpi: u32) {
        self.metrics = self.settings.metrics.scaled(dpi);
        self.hover.set_hot_zone(self.metrics.hot_zone());
        debug!(dpi, "chrome metrics rescaled");
        self.on_resize();
    }

    pub fn last_known_position(&self) -> Option<Point> {
        self.state.last_known_position
    }

    pub fn close_visible(&self) -> bool {
        self.state.visible && self.hover.close_visible()
    }

    pub fn chrome_context(&self) -> ChromeContext {
        ChromeContext {
            client_size: self.host.client_size(),
            metrics: self.metrics,
            maximized: self.state.maximized,
        }
    }

    pub fn view(&self) -> PopupView<'_> {
        PopupView {
            text: &self.text,
            font_size: self.font_size,
            font_family: &self.settings.font_family,
            palette: self.theme.palette(),
            client_size: self.state.client_size,
            close_visible: self.close_visible(),
            close_bounds: self.metrics.close_bounds(self.state.client_size),
        }
    }

    // --- public operations -------------------------------------------------

    pub fn show(&mut self) {
        if self.state.visible {
            return;
        }

        let size = self.host.window_rect().size();
        let cursor = self.host.cursor_pos();
        let (pos, restored) = resolve_show_position(
            self.state.last_known_position,
            size,
            &self.host.work_areas(),
            cursor,
            self.host.work_area_at(cursor),
            self.metrics.cursor_offset,
        );
        if !restored && self.state.last_known_position.take().is_some() {
            debug!("remembered position is off-screen, placing near cursor");
        }

        self.host.move_to(pos);

        let now = self.host.wall_clock();
        self.text = format_time(now);
        self.hover.force_hidden();

        self.host.set_visible(true);
        self.state.visible = true;

        self.host.start_timer(PopupTimer::Clock, delay_to_next_second(now));
        self.host
            .start_timer(PopupTimer::HoverPoll, self.settings.hover_poll_ms);
        self.host.invalidate();
        debug!(x = pos.x, y = pos.y, restored, "clock popup shown");
    }

    pub fn hide(&mut self) {
        if !self.state.visible {
            return;
        }

        self.host.stop_timer(PopupTimer::Clock);
        self.host.stop_timer(PopupTimer::HoverPoll);

        if self.state.maximized {
            self.host.set_maximized(false);
            self.state.maximized = false;
            self.on_resize();
        }
        let pos = self.host.window_rect().origin();
        self.state.last_known_position = Some(pos);

        self.hover.force_hidden();
        self.host.set_visible(false);
        self.state.visible = false;
        debug!("clock popup hidden");
    }

    pub fn toggle(&mut self) {
        if self.state.visible {
            self.hide();
        } else {
            self.show();
        }
    }

    pub fn toggle_maximize(&mut self) {
        if !self.state.visible {
            self.show();
        }

        let maximize = !self.state.maximized;
        self.host.set_maximized(maximize);
        self.state.maximized = maximize;
        self.on_resize();
        info!(maximized = maximize, "clock popup maximize toggled");
    }

    /// A user close gesture only ever hides the popup.
    pub fn on_close_requested(&mut self) {
        self.hide();
    }

    // --- native events ----------------------------------------------------

    pub fn on_resize(&mut self) {
        let client = self.host.client_size();
        self.state.client_size = client;
        self.font_size = fit_font_size(
            &self.host,
            &self.text,
            client,
            self.metrics.text_padding,
        );

        if self.legacy_rounding {
            self.update_clip_region();
        }
        self.host.invalidate();
    }

    fn update_clip_region(&mut self) {
        let outline = if self.state.maximized {
            Vec::new()
        } else {
            let bounds = Rect::from_origin_size(Point::default(), self.host.window_rect().size());
            flatten_outline(
                &rounded_outline(bounds, self.metrics.corner_radius),
                OUTLINE_ARC_STEPS,
            )
        };
        if let Err(e) = self.host.set_clip_region(&outline) {
            warn!("falling back to square corners: {e}");
            self.legacy_rounding = false;
        }
    }

    pub fn on_moved(&mut self, pos: Point) {
        if self.state.visible && !self.state.maximized {
                self.state.last_known_position = Some(pos);
        }
    }

    pub fn on_primary_down(&mut self, pt: Point) {
        if !self.state.visible || self.on_close_affordance(pt) {
            return;
        }
        self.host.begin_caption_drag();
    }

    pub fn on_primary_up(&mut self, pt: Point) {
        if self.on_close_affordance(pt) {
            self.hide();
        }
    }

    pub fn on_double_click(&mut self, pt: Point) {
        let bounds = self.metrics.close_bounds(self.state.client_size);
        if bounds.contains(pt) {
            return;
        }
        self.toggle_maximize();
    }

    pub fn on_pointer_move(&mut self, pt: Point) {
        if !self.state.visible {
            return;
        }
        if self.hover.on_pointer_move(pt, self.state.client_size) {
            self.host.invalidate();
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if self.hover.on_pointer_leave() {
            self.host.invalidate();
        }
    }

    pub fn on_timer(&mut self, timer: PopupTimer) {
        match timer {
            PopupTimer::Clock => self.on_clock_tick(),
            PopupTimer::HoverPoll => self.on_hover_poll(),
        }
    }

    fn on_clock_tick(&mut self) {
        if !self.state.visible {
            self.host.stop_timer(PopupTimer::Clock);
            return;
        }
        let now = self.host.wall_clock();
        self.text = format_time(now);
        self.host
            .start_timer(PopupTimer::Clock, delay_to_next_second(now));
        self.host.invalidate();
    }

    fn on_hover_poll(&mut self) {
        let cursor = self.host.cursor_pos();
        let window = self.host.window_rect();
        if self.hover.on_poll(cursor, window) {
            self.host.invalidate();
        }
    }

    pub fn apply_theme(&mut self, theme: ThemeState) {
        self.theme = theme;
        let palette = theme.palette();
        if let Err(e) = self.host.set_caption_color(palette.background) {
            debug!("caption color not applied: {e}");
        }
        self.host.invalidate();
        info!(light = theme.is_light, "theme applied");
    }

    /// True when `pt` (client coordinates) is over the visible close button.
    pub fn on_close_affordance(&self, pt: Point) -> bool {
        self.close_visible() && self.metrics.close_bounds(self.state.client_size).contains(pt)
    }
}
