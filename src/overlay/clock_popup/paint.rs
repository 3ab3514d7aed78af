use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;

use super::geometry::Rect;
use super::state::PopupView;
use super::win32_host::create_label_font;
use crate::overlay::utils::to_wstring;

const CLOSE_GLYPH: &str = "\u{2715}";

fn to_win_rect(r: Rect) -> RECT {
    RECT {
        left: r.left,
        top: r.top,
        right: r.right,
        bottom: r.bottom,
    }
}

unsafe fn draw_centered(hdc: HDC, text: &str, font_size: i32, face: &[u16], bounds: RECT) {
    let hfont = create_label_font(font_size, face);
    let old_font = SelectObject(hdc, hfont.into());
    let mut wide: Vec<u16> = text.encode_utf16().collect();
    let mut rect = bounds;
    DrawTextW(
        hdc,
        &mut wide,
        &mut rect,
        DT_CENTER | DT_VCENTER | DT_SINGLELINE | DT_NOPREFIX,
    );
    SelectObject(hdc, old_font);
    let _ = DeleteObject(hfont.into());
}

/// Paints the whole client area off-screen, then blits it in one go.
pub fn paint_popup(hwnd: HWND, view: &PopupView) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        let mut rect = RECT::default();
        let _ = GetClientRect(hwnd, &mut rect);
        let width = rect.right - rect.left;
        let height = rect.bottom - rect.top;
        if width <= 0 || height <= 0 {
            let _ = EndPaint(hwnd, &ps);
            return;
        }

        let mem_dc = CreateCompatibleDC(Some(hdc));
        let mem_bm = CreateCompatibleBitmap(hdc, width, height);
        let old_bm = SelectObject(mem_dc, mem_bm.into());

        let bg_brush = CreateSolidBrush(COLORREF(view.palette.background.to_colorref()));
        FillRect(mem_dc, &rect, bg_brush);
        let _ = DeleteObject(bg_brush.into());

        SetBkMode(mem_dc, TRANSPARENT);
        SetTextColor(mem_dc, COLORREF(view.palette.foreground.to_colorref()));

        let face = to_wstring(view.font_family);
        draw_centered(mem_dc, view.text, view.font_size, &face, rect);

        // Affordance goes on top of the label and hides the digits under it.
        if let Some((bounds, palette)) = view.close_tile() {
            let tile = to_win_rect(bounds);
            let tile_brush = CreateSolidBrush(COLORREF(palette.background.to_colorref()));
            FillRect(mem_dc, &tile, tile_brush);
            let _ = DeleteObject(tile_brush.into());

            SetTextColor(mem_dc, COLORREF(palette.foreground.to_colorref()));
            let glyph_size = (bounds.height() * 2 / 3).max(1);
            draw_centered(mem_dc, CLOSE_GLYPH, glyph_size, &face, tile);
        }

        let _ = BitBlt(hdc, 0, 0, width, height, Some(mem_dc), 0, 0, SRCCOPY);

        SelectObject(mem_dc, old_bm);
        let _ = DeleteObject(mem_bm.into());
        let _ = DeleteDC(mem_dc);
        let _ = EndPaint(hwnd, &ps);
    }
}
