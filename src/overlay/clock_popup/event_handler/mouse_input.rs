use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::ScreenToClient;
use windows::Win32::UI::Input::KeyboardAndMouse::ReleaseCapture;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::overlay::clock_popup::chrome::{intercept, ChromeMessage, ChromeOutcome};
use crate::overlay::clock_popup::geometry::{HitRegion, Point};
use crate::overlay::clock_popup::window::with_app;

/// Signed coordinates packed into an LPARAM (GET_X_LPARAM / GET_Y_LPARAM).
fn point_from_lparam(lparam: LPARAM) -> Point {
    let x = (lparam.0 & 0xFFFF) as u16 as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32;
    Point::new(x, y)
}

unsafe fn screen_to_client(hwnd: HWND, pt: Point) -> Point {
    let mut p = POINT { x: pt.x, y: pt.y };
    let _ = ScreenToClient(hwnd, &mut p);
    Point::new(p.x, p.y)
}

fn hit_code(region: HitRegion) -> u32 {
    match region {
        HitRegion::Client => HTCLIENT,
        HitRegion::Left => HTLEFT,
        HitRegion::Right => HTRIGHT,
        HitRegion::Top => HTTOP,
        HitRegion::Bottom => HTBOTTOM,
        HitRegion::TopLeft => HTTOPLEFT,
        HitRegion::TopRight => HTTOPRIGHT,
        HitRegion::BottomLeft => HTBOTTOMLEFT,
        HitRegion::BottomRight => HTBOTTOMRIGHT,
    }
}

pub unsafe fn handle_nc_hit_test(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let client_point = screen_to_client(hwnd, point_from_lparam(lparam));
    let outcome = with_app(|app| {
        intercept(
            &app.popup.chrome_context(),
            &ChromeMessage::HitTest { client_point },
        )
    })
    .flatten();

    match outcome {
        Some(ChromeOutcome::Region(region)) => LRESULT(hit_code(region) as isize),
        _ => DefWindowProcW(hwnd, WM_NCHITTEST, wparam, lparam),
    }
}

/// Hand cursor over the revealed close button; everything else keeps the
/// class cursor or the resize arrows.
pub unsafe fn handle_set_cursor(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let hit = (lparam.0 & 0xFFFF) as u32;
    if hit == HTCLIENT {
        let mut screen = POINT::default();
        if GetCursorPos(&mut screen).is_ok() {
            let pt = screen_to_client(hwnd, Point::new(screen.x, screen.y));
            let over_close = with_app(|app| app.popup.on_close_affordance(pt)).unwrap_or(false);
            if over_close {
                if let Ok(hand) = LoadCursorW(None, IDC_HAND) {
                    SetCursor(Some(hand));
                    return LRESULT(1);
                }
            }
        }
    }
    DefWindowProcW(hwnd, WM_SETCURSOR, wparam, lparam)
}

pub unsafe fn handle_lbutton_down(hwnd: HWND, lparam: LPARAM) -> LRESULT {
    let pt = point_from_lparam(lparam);
    let drag = with_app(|app| {
        app.popup.on_primary_down(pt);
        app.popup.host_mut().take_pending_drag()
    })
    .unwrap_or(false);

    if drag {
        // Modal move loop; re-enters the window procedure until the button is released.
        let _ = ReleaseCapture();
        SendMessageW(
            hwnd,
            WM_NCLBUTTONDOWN,
            Some(WPARAM(HTCAPTION as usize)),
            Some(LPARAM(0)),
        );
    }
    LRESULT(0)
}

pub unsafe fn handle_lbutton_up(lparam: LPARAM) -> LRESULT {
    let pt = point_from_lparam(lparam);
    with_app(|app| {
        app.popup.on_primary_up(pt);
        app.sync_tray();
    });
    LRESULT(0)
}

pub unsafe fn handle_lbutton_dblclk(lparam: LPARAM) -> LRESULT {
    let pt = point_from_lparam(lparam);
    with_app(|app| {
        app.popup.on_double_click(pt);
        app.sync_tray();
    });
    LRESULT(0)
}

/// The caption drag hands clicks to the non-client path, so a quick second
/// click arrives here. Border double-clicks are swallowed: the default
/// handler would stretch the window vertically and break the aspect lock.
pub unsafe fn handle_nc_lbutton_dblclk(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if wparam.0 as u32 == HTCAPTION {
        let pt = screen_to_client(hwnd, point_from_lparam(lparam));
        with_app(|app| {
            app.popup.on_double_click(pt);
            app.sync_tray();
        });
    }
    LRESULT(0)
}

pub unsafe fn handle_mouse_move(lparam: LPARAM) -> LRESULT {
    let pt = point_from_lparam(lparam);
    with_app(|app| {
        app.popup.host_mut().arm_leave_tracking();
        app.popup.on_pointer_move(pt);
    });
    LRESULT(0)
}

pub unsafe fn handle_mouse_leave() -> LRESULT {
    with_app(|app| {
        app.popup.host_mut().leave_tracking_ended();
        app.popup.on_pointer_leave();
    });
    LRESULT(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lparam_coordinates_are_signed() {
        let lparam = LPARAM(((0xFFF6u32 as isize) << 16) | 0x0032);
        assert_eq!(point_from_lparam(lparam), Point::new(50, -10));
    }
}
