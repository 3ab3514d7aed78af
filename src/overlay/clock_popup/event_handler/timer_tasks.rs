use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::KillTimer;

use crate::overlay::clock_popup::host::PopupTimer;
use crate::overlay::clock_popup::window::{with_app, TRAY_RETRY_TIMER_ID};

pub unsafe fn handle_timer(hwnd: HWND, wparam: WPARAM) -> LRESULT {
    let timer_id = wparam.0;

    if let Some(timer) = PopupTimer::from_id(timer_id) {
        with_app(|app| app.popup.on_timer(timer));
    } else if timer_id == TRAY_RETRY_TIMER_ID {
        if with_app(|app| app.ensure_tray()).unwrap_or(false) {
            let _ = KillTimer(Some(hwnd), TRAY_RETRY_TIMER_ID);
        }
    }
    LRESULT(0)
}
