use std::mem::size_of;

use tracing::debug;
use windows::core::PCWSTR;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::gui::theme::is_theme_change;
use crate::gui::tray::TrayCommand;
use crate::overlay::clock_popup::chrome::{intercept, ChromeMessage, ChromeOutcome};
use crate::overlay::clock_popup::geometry::{min_track_size, track_limits, ChromeMetrics, Rect};
use crate::overlay::clock_popup::win32_host::rect_from_win;
use crate::overlay::clock_popup::paint;
use crate::overlay::clock_popup::window::{take_app, with_app};

/// Posted when a WM_SIZE arrived while the app was busy.
pub const WM_APP_RELAYOUT: u32 = WM_APP + 2;

pub unsafe fn handle_paint(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let painted = with_app(|app| paint::paint_popup(hwnd, &app.popup.view()));
    match painted {
        Some(()) => LRESULT(0),
        None => DefWindowProcW(hwnd, WM_PAINT, wparam, lparam),
    }
}

pub unsafe fn handle_sizing(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let rect = lparam.0 as *mut RECT;
    if rect.is_null() {
        return DefWindowProcW(hwnd, WM_SIZING, wparam, lparam);
    }
    let proposed = Rect::new((*rect).left, (*rect).top, (*rect).right, (*rect).bottom);
    let outcome = with_app(|app| {
        intercept(
            &app.popup.chrome_context(),
            &ChromeMessage::Sizing { proposed },
        )
    })
    .flatten();

    match outcome {
        Some(ChromeOutcome::Resized(r)) => {
            (*rect).bottom = r.bottom;
            LRESULT(1)
        }
        _ => DefWindowProcW(hwnd, WM_SIZING, wparam, lparam),
    }
}

pub unsafe fn handle_get_min_max_info(hwnd: HWND, lparam: LPARAM) -> LRESULT {
    let mmi = lparam.0 as *mut MINMAXINFO;
    if mmi.is_null() {
        return LRESULT(0);
    }

    let metrics = with_app(|app| *app.popup.metrics())
        .unwrap_or_else(|| ChromeMetrics::default().scaled(GetDpiForWindow(hwnd)));
    let min_track = min_track_size(&metrics);
    (*mmi).ptMinTrackSize.x = min_track.width;
    (*mmi).ptMinTrackSize.y = min_track.height;

    let h_monitor = MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST);
    let mut mi = MONITORINFO {
        cbSize: size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if GetMonitorInfoW(h_monitor, &mut mi).as_bool() {
        let limits = track_limits(rect_from_win(mi.rcMonitor), rect_from_win(mi.rcWork));
        (*mmi).ptMaxPosition.x = limits.max_position.x;
        (*mmi).ptMaxPosition.y = limits.max_position.y;
        (*mmi).ptMaxSize.x = limits.max_size.width;
        (*mmi).ptMaxSize.y = limits.max_size.height;
    }
    LRESULT(0)
}

pub unsafe fn handle_size(hwnd: HWND) -> LRESULT {
    if with_app(|app| app.popup.on_resize()).is_none() {
        let _ = PostMessageW(Some(hwnd), WM_APP_RELAYOUT, WPARAM(0), LPARAM(0));
    }
    LRESULT(0)
}

pub unsafe fn handle_relayout() -> LRESULT {
    with_app(|app| app.popup.on_resize());
    LRESULT(0)
}

pub unsafe fn handle_move() -> LRESULT {
    with_app(|app| {
        let pos = app.popup.host().window_rect().origin();
        app.popup.on_moved(pos);
    });
    LRESULT(0)
}

pub unsafe fn handle_dpi_changed(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let dpi = (wparam.0 & 0xFFFF) as u32;
    let suggested = lparam.0 as *const RECT;
    if !suggested.is_null() {
        let r = *suggested;
        let _ = SetWindowPos(
            hwnd,
            None,
            r.left,
            r.top,
            r.right - r.left,
            r.bottom - r.top,
            SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }
    with_app(|app| app.popup.set_dpi(dpi));
    LRESULT(0)
}

pub unsafe fn handle_setting_change(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let area = if lparam.0 != 0 {
        PCWSTR(lparam.0 as *const u16).to_string().unwrap_or_default()
    } else {
        String::new()
    };
    if is_theme_change(&area) {
        debug!("system theme changed");
        with_app(|app| app.refresh_theme());
    }
    DefWindowProcW(hwnd, WM_SETTINGCHANGE, wparam, lparam)
}

/// Alt+F4 and friends only hide the popup.
pub unsafe fn handle_close() -> LRESULT {
    with_app(|app| {
        app.popup.on_close_requested();
        app.sync_tray();
    });
    LRESULT(0)
}

pub unsafe fn handle_destroy() -> LRESULT {
    // Dropping the app removes the tray icon.
    drop(take_app());
    PostQuitMessage(0);
    LRESULT(0)
}

pub unsafe fn handle_tray_command(hwnd: HWND, wparam: WPARAM) -> LRESULT {
    let Some(cmd) = TrayCommand::from_code(wparam.0) else {
        return LRESULT(0);
    };
    match cmd {
        TrayCommand::Exit => {
            let _ = DestroyWindow(hwnd);
        }
        TrayCommand::Toggle => {
            with_app(|app| {
                app.popup.toggle();
                app.sync_tray();
            });
        }
        TrayCommand::ToggleMaximize => {
            with_app(|app| {
                app.popup.toggle_maximize();
                app.sync_tray();
            });
        }
    }
    LRESULT(0)
}
