// Procedural tray icon: a clock face at ten past ten, drawn with SDFs so no
// image assets are needed.

use image::{Rgba, RgbaImage};

use crate::overlay::paint_utils::{coverage, sd_circle, sd_ring, sd_segment};

pub const TRAY_ICON_SIZE: u32 = 32;

/// Render the icon. A dark taskbar gets a white glyph, a light one a dark glyph.
pub fn render_clock_icon(size: u32, is_system_dark: bool) -> RgbaImage {
    let ink: [u8; 3] = if is_system_dark {
        [255, 255, 255]
    } else {
        [32, 32, 32]
    };

    let s = size as f32;
    let c = s / 2.0;
    let ring_r = s * 0.40;
    let stroke = (s * 0.045).max(0.75);

    // Hands, from the center. Angles clockwise from 12 o'clock.
    let hand = |deg: f32, len: f32| {
        let rad = deg.to_radians();
        (c + rad.sin() * len, c - rad.cos() * len)
    };
    let (hx, hy) = hand(305.0, s * 0.20);
    let (mx, my) = hand(60.0, s * 0.30);

    let mut img = RgbaImage::new(size, size);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
        let (dx, dy) = (fx - c, fy - c);

        let d = sd_ring(dx, dy, ring_r, stroke)
            .min(sd_segment(fx, fy, c, c, hx, hy, stroke * 1.2))
            .min(sd_segment(fx, fy, c, c, mx, my, stroke))
            .min(sd_circle(dx, dy, stroke * 1.6));

        let alpha = (coverage(d) * 255.0).round() as u8;
        *px = Rgba([ink[0], ink[1], ink[2], alpha]);
    }
    img
}

#[cfg(windows)]
mod tray {
    use super::{render_clock_icon, TRAY_ICON_SIZE};
    use lazy_static::lazy_static;
    use tray_icon::Icon;

    // Wrapper to make Icon thread-safe for lazy_static
    struct SafeIcon(Option<Icon>);
    unsafe impl Send for SafeIcon {}
    unsafe impl Sync for SafeIcon {}

    lazy_static! {
        static ref TRAY_ICON_DARK: SafeIcon = SafeIcon(load_tray_icon(true));
        static ref TRAY_ICON_LIGHT: SafeIcon = SafeIcon(load_tray_icon(false));
    }

    fn load_tray_icon(is_system_dark: bool) -> Option<Icon> {
        let img = render_clock_icon(TRAY_ICON_SIZE, is_system_dark);
        let (width, height) = img.dimensions();
        match Icon::from_rgba(img.into_raw(), width, height) {
            Ok(icon) => Some(icon),
            Err(e) => {
                tracing::warn!("tray icon rejected: {e}");
                None
            }
        }
    }

    // is_system_dark: TRUE if Windows is in Dark Mode, FALSE if Light Mode
    pub fn get_tray_icon(is_system_dark: bool) -> Option<Icon> {
        if is_system_dark {
            TRAY_ICON_DARK.0.clone()
        } else {
            TRAY_ICON_LIGHT.0.clone()
        }
    }
}

#[cfg(windows)]
pub use tray::get_tray_icon;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_transparent_and_center_is_inked() {
        let img = render_clock_icon(TRAY_ICON_SIZE, true);
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(31, 31)[3], 0);
        assert_eq!(img.get_pixel(16, 16)[3], 255);
    }

    #[test]
    fn ink_follows_taskbar_theme() {
        let dark = render_clock_icon(TRAY_ICON_SIZE, true);
        let light = render_clock_icon(TRAY_ICON_SIZE, false);
        assert_eq!(dark.get_pixel(16, 16).0, [255, 255, 255, 255]);
        assert_eq!(light.get_pixel(16, 16).0, [32, 32, 32, 255]);
    }

    #[test]
    fn ring_is_drawn() {
        let img = render_clock_icon(TRAY_ICON_SIZE, true);
        // Left edge of the ring at radius 12.8 on the horizontal center line.
        let x = (16.0 - 0.40 * 32.0) as u32;
        assert!(img.get_pixel(x, 16)[3] > 128);
    }
}
