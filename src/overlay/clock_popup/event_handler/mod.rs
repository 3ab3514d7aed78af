use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

pub mod misc;
pub mod mouse_input;
pub mod timer_tasks;

use crate::gui::tray::WM_APP_TRAY_COMMAND;

pub unsafe extern "system" fn popup_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_ERASEBKGND => LRESULT(1),

        WM_PAINT => misc::handle_paint(hwnd, wparam, lparam),

        // Client area covers the whole window; the resize frame is only a hit-test result.
        WM_NCCALCSIZE if wparam.0 != 0 => LRESULT(0),

        WM_NCHITTEST => mouse_input::handle_nc_hit_test(hwnd, wparam, lparam),

        WM_SETCURSOR => mouse_input::handle_set_cursor(hwnd, wparam, lparam),

        WM_SIZING => misc::handle_sizing(hwnd, wparam, lparam),

        WM_GETMINMAXINFO => misc::handle_get_min_max_info(hwnd, lparam),

        WM_SIZE => misc::handle_size(hwnd),

        WM_MOVE => misc::handle_move(),

        WM_DPICHANGED => misc::handle_dpi_changed(hwnd, wparam, lparam),

        WM_LBUTTONDOWN => mouse_input::handle_lbutton_down(hwnd, lparam),

        WM_LBUTTONUP => mouse_input::handle_lbutton_up(lparam),

        WM_LBUTTONDBLCLK => mouse_input::handle_lbutton_dblclk(lparam),

        WM_NCLBUTTONDBLCLK => mouse_input::handle_nc_lbutton_dblclk(hwnd, wparam, lparam),

        WM_MOUSEMOVE => mouse_input::handle_mouse_move(lparam),

        WM_MOUSELEAVE => mouse_input::handle_mouse_leave(),

        WM_TIMER => timer_tasks::handle_timer(hwnd, wparam),

        WM_SETTINGCHANGE => misc::handle_setting_change(hwnd, wparam, lparam),

        WM_CLOSE => misc::handle_close(),

        WM_DESTROY => misc::handle_destroy(),

        msg if msg == WM_APP_TRAY_COMMAND => misc::handle_tray_command(hwnd, wparam),
        msg if msg == misc::WM_APP_RELAYOUT => misc::handle_relayout(),

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
