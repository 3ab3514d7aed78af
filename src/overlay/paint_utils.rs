// Signed-distance helpers for procedural drawing. Distances are in pixels,
// negative inside the shape.

#[inline(always)]
pub fn sd_circle(px: f32, py: f32, r: f32) -> f32 {
    (px * px + py * py).sqrt() - r
}

/// Distance to the segment a-b, minus half the stroke width.
#[inline(always)]
pub fn sd_segment(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32, half_width: f32) -> f32 {
    let (pax, pay) = (px - ax, py - ay);
    let (bax, bay) = (bx - ax, by - ay);
    let len_sq = bax * bax + bay * bay;
    let h = if len_sq > 0.0 {
        ((pax * bax + pay * bay) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (pax - bax * h, pay - bay * h);
    (dx * dx + dy * dy).sqrt() - half_width
}

/// Ring of the given stroke width centered on radius `r`.
#[inline(always)]
pub fn sd_ring(px: f32, py: f32, r: f32, half_width: f32) -> f32 {
    sd_circle(px, py, r).abs() - half_width
}

/// Anti-aliased coverage for a distance: 1 inside, 0 outside, a one-pixel ramp.
#[inline(always)]
pub fn coverage(d: f32) -> f32 {
    (0.5 - d).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_distance() {
        let d = sd_segment(5.0, 3.0, 0.0, 0.0, 10.0, 0.0, 1.0);
        assert!((d - 2.0).abs() < 1e-5);
        // Past the end cap measures to the endpoint.
        let d = sd_segment(13.0, 4.0, 0.0, 0.0, 10.0, 0.0, 0.0);
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn coverage_ramps_over_one_pixel() {
        assert_eq!(coverage(-3.0), 1.0);
        assert_eq!(coverage(3.0), 0.0);
        assert_eq!(coverage(0.0), 0.5);
    }
}
