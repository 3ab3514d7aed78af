use super::geometry::Size;

/// Smallest font size the label ever gets, even if nothing fits.
pub const MIN_FONT_SIZE: i32 = 6;

/// Measures the extent of a single line of text at a given font size (pixels).
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: i32) -> Size;
}

/// Largest integral font size whose measured extent fits the client area
/// minus `pad` on every side. Binary search over sizes; the upper bound is
/// the available height since a line is never shorter than its font size.
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    client: Size,
    pad: i32,
) -> i32 {
    let avail_w = client.width - pad * 2;
    let avail_h = client.height - pad * 2;
    if avail_w <= 0 || avail_h <= 0 || text.is_empty() {
        return MIN_FONT_SIZE;
    }

    let mut low = MIN_FONT_SIZE;
    let mut high = avail_h;
    let mut best_fit = MIN_FONT_SIZE;

    while low <= high {
        let mid = (low + high) / 2;
        let extent = measure.measure(text, mid);
        if extent.width <= avail_w && extent.height <= avail_h {
            best_fit = mid;
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    best_fit.max(MIN_FONT_SIZE)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Roughly Segoe UI digits: 0.55em advance, 1.33em line height.
    pub(crate) struct LinearMeasure;

    impl TextMeasure for LinearMeasure {
        fn measure(&self, text: &str, font_size: i32) -> Size {
            let chars = text.chars().count() as f32;
            Size::new(
                (chars * font_size as f32 * 0.55).ceil() as i32,
                (font_size as f32 * 1.33).ceil() as i32,
            )
        }
    }

    #[test]
    fn default_client_fits_inside_padding() {
        let size = fit_font_size(&LinearMeasure, "12:34:56", Size::new(200, 80), 4);
        let extent = LinearMeasure.measure("12:34:56", size);
        assert!(extent.width <= 192 && extent.height <= 72, "{size} -> {extent:?}");
        // And one size larger would not.
        let next = LinearMeasure.measure("12:34:56", size + 1);
        assert!(next.width > 192 || next.height > 72);
    }

    #[test]
    fn grows_monotonically_with_client() {
        let mut previous = 0;
        for w in (120..=1000).step_by(40) {
            let h = (w as f32 / 2.5).round() as i32;
            let size = fit_font_size(&LinearMeasure, "12:34:56", Size::new(w, h), 4);
            assert!(size >= previous, "{w}x{h}: {size} < {previous}");
            previous = size;
        }
        let small = fit_font_size(&LinearMeasure, "12:34:56", Size::new(200, 80), 4);
        let large = fit_font_size(&LinearMeasure, "12:34:56", Size::new(400, 160), 4);
        assert!(large > small);
    }

    #[test]
    fn degenerate_area_clamps_to_minimum() {
        assert_eq!(fit_font_size(&LinearMeasure, "12:34:56", Size::new(6, 6), 4), MIN_FONT_SIZE);
        assert_eq!(fit_font_size(&LinearMeasure, "12:34:56", Size::new(30, 12), 4), MIN_FONT_SIZE);
        assert_eq!(fit_font_size(&LinearMeasure, "", Size::new(200, 80), 4), MIN_FONT_SIZE);
    }
}
