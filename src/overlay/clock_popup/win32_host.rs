use std::mem::size_of;

use chrono::{Local, NaiveTime};
use windows::core::{BOOL, PCWSTR};
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Dwm::{
    DwmSetWindowAttribute, DWMWA_CAPTION_COLOR, DWMWA_WINDOW_CORNER_PREFERENCE, DWMWCP_ROUND,
    DWM_WINDOW_CORNER_PREFERENCE,
};
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::UI::Input::KeyboardAndMouse::{TrackMouseEvent, TME_LEAVE, TRACKMOUSEEVENT};
use windows::Win32::UI::WindowsAndMessaging::*;

use super::error::ChromeError;
use super::font_fit::TextMeasure;
use super::geometry::{Point, Rect, Size};
use super::host::{PopupHost, PopupTimer};
use super::state::Rgb;
use crate::overlay::utils::to_wstring;

pub(super) fn rect_from_win(r: RECT) -> Rect {
    Rect::new(r.left, r.top, r.right, r.bottom)
}

/// Creates the label font. Sizes are em heights in pixels, hence the
/// negative height passed to GDI.
pub(super) unsafe fn create_label_font(font_size: i32, face: &[u16]) -> HFONT {
    CreateFontW(
        -font_size,
        0,
        0,
        0,
        FW_SEMIBOLD.0 as i32,
        0,
        0,
        0,
        DEFAULT_CHARSET,
        OUT_DEFAULT_PRECIS,
        CLIP_DEFAULT_PRECIS,
        CLEARTYPE_QUALITY,
        (VARIABLE_PITCH.0 | FF_SWISS.0) as u32,
        PCWSTR(face.as_ptr()),
    )
}

pub struct Win32Host {
    hwnd: HWND,
    /// NUL-terminated face name for CreateFontW.
    face: Vec<u16>,
    pending_drag: bool,
    tracking_leave: bool,
}

impl Win32Host {
    pub fn new(hwnd: HWND, font_family: &str) -> Self {
        Self {
            hwnd,
            face: to_wstring(font_family),
            pending_drag: false,
            tracking_leave: false,
        }
    }

    /// The caption drag enters a modal loop that re-enters the window
    /// procedure, so it is started by the caller once the app is released.
    pub fn take_pending_drag(&mut self) -> bool {
        std::mem::take(&mut self.pending_drag)
    }

    /// Ask for a WM_MOUSELEAVE the next time the pointer exits.
    pub fn arm_leave_tracking(&mut self) {
        if self.tracking_leave {
            return;
        }
        let mut tme = TRACKMOUSEEVENT {
            cbSize: size_of::<TRACKMOUSEEVENT>() as u32,
            dwFlags: TME_LEAVE,
            hwndTrack: self.hwnd,
            dwHoverTime: 0,
        };
        unsafe {
            self.tracking_leave = TrackMouseEvent(&mut tme).is_ok();
        }
    }

    pub fn leave_tracking_ended(&mut self) {
        self.tracking_leave = false;
    }
}

impl TextMeasure for Win32Host {
    fn measure(&self, text: &str, font_size: i32) -> Size {
        let wide: Vec<u16> = text.encode_utf16().collect();
        unsafe {
            let hdc = GetDC(Some(self.hwnd));
            let hfont = create_label_font(font_size, &self.face);
            let old_font = SelectObject(hdc, hfont.into());

            let mut extent = SIZE::default();
            let _ = GetTextExtentPoint32W(hdc, &wide, &mut extent);

            SelectObject(hdc, old_font);
            let _ = DeleteObject(hfont.into());
            ReleaseDC(Some(self.hwnd), hdc);

            Size::new(extent.cx, extent.cy)
        }
    }
}

unsafe extern "system" fn collect_work_area(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let areas = &mut *(data.0 as *mut Vec<Rect>);
    let mut mi = MONITORINFO {
        cbSize: size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if GetMonitorInfoW(hmonitor, &mut mi).as_bool() {
        areas.push(rect_from_win(mi.rcWork));
    }
    true.into()
}

impl PopupHost for Win32Host {
    fn set_visible(&mut self, visible: bool) {
        unsafe {
            if visible {
                let _ = ShowWindow(self.hwnd, SW_SHOW);
                let _ = SetForegroundWindow(self.hwnd);
            } else {
                let _ = ShowWindow(self.hwnd, SW_HIDE);
                self.tracking_leave = false;
            }
        }
    }

    fn set_maximized(&mut self, maximized: bool) {
        unsafe {
            let _ = ShowWindow(self.hwnd, if maximized { SW_MAXIMIZE } else { SW_RESTORE });
        }
    }

    fn move_to(&mut self, pos: Point) {
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                None,
                pos.x,
                pos.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    fn window_rect(&self) -> Rect {
        let mut rect = RECT::default();
        unsafe {
            let _ = GetWindowRect(self.hwnd, &mut rect);
        }
        rect_from_win(rect)
    }

    fn client_size(&self) -> Size {
        let mut rect = RECT::default();
        unsafe {
            let _ = GetClientRect(self.hwnd, &mut rect);
        }
        Size::new(rect.right - rect.left, rect.bottom - rect.top)
    }

    fn cursor_pos(&self) -> Point {
        let mut pt = POINT::default();
        unsafe {
            let _ = GetCursorPos(&mut pt);
        }
        Point::new(pt.x, pt.y)
    }

    fn work_areas(&self) -> Vec<Rect> {
        let mut areas: Vec<Rect> = Vec::new();
        unsafe {
            let _ = EnumDisplayMonitors(
                None,
                None,
                Some(collect_work_area),
                LPARAM(&mut areas as *mut Vec<Rect> as isize),
            );
        }
        areas
    }

    fn work_area_at(&self, pt: Point) -> Rect {
        unsafe {
            let h_monitor = MonitorFromPoint(POINT { x: pt.x, y: pt.y }, MONITOR_DEFAULTTONEAREST);
            let mut mi = MONITORINFO {
                cbSize: size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            let _ = GetMonitorInfoW(h_monitor, &mut mi);
            rect_from_win(mi.rcWork)
        }
    }

    fn wall_clock(&self) -> NaiveTime {
        Local::now().time()
    }

    fn start_timer(&mut self, timer: PopupTimer, interval_ms: u32) {
        unsafe {
            SetTimer(Some(self.hwnd), timer.id(), interval_ms, None);
        }
    }

    fn stop_timer(&mut self, timer: PopupTimer) {
        unsafe {
            let _ = KillTimer(Some(self.hwnd), timer.id());
        }
    }

    fn begin_caption_drag(&mut self) {
        self.pending_drag = true;
    }

    fn set_corner_rounding(&mut self) -> Result<(), ChromeError> {
        let preference: DWM_WINDOW_CORNER_PREFERENCE = DWMWCP_ROUND;
        unsafe {
            DwmSetWindowAttribute(
                self.hwnd,
                DWMWA_WINDOW_CORNER_PREFERENCE,
                &preference as *const _ as *const _,
                size_of::<DWM_WINDOW_CORNER_PREFERENCE>() as u32,
            )
        }
        .map_err(|e| ChromeError::compositor("DWMWA_WINDOW_CORNER_PREFERENCE", e))
    }

    fn set_caption_color(&mut self, color: Rgb) -> Result<(), ChromeError> {
        let colorref = COLORREF(color.to_colorref());
        unsafe {
            DwmSetWindowAttribute(
                self.hwnd,
                DWMWA_CAPTION_COLOR,
                &colorref as *const _ as *const _,
                size_of::<COLORREF>() as u32,
            )
        }
        .map_err(|e| ChromeError::compositor("DWMWA_CAPTION_COLOR", e))
    }

    fn set_clip_region(&mut self, outline: &[Point]) -> Result<(), ChromeError> {
        unsafe {
            if outline.is_empty() {
                SetWindowRgn(self.hwnd, None, true);
                return Ok(());
            }

            let points: Vec<POINT> = outline.iter().map(|p| POINT { x: p.x, y: p.y }).collect();
            let rgn = CreatePolygonRgn(&points, WINDING);
            if rgn.is_invalid() {
                return Err(ChromeError::Region(format!(
                    "CreatePolygonRgn failed for {} points",
                    points.len()
                )));
            }
            // On success the window owns the region.
            if SetWindowRgn(self.hwnd, Some(rgn), true) == 0 {
                let _ = DeleteObject(rgn.into());
                return Err(ChromeError::Region("SetWindowRgn rejected the region".into()));
            }
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        unsafe {
            let _ = InvalidateRect(Some(self.hwnd), None, false);
        }
    }
}
