//! Pure geometry for the clock popup chrome: hit-testing, aspect-locked
//! sizing, rounded outlines and on-screen placement.
//!
//! Nothing in here touches the window system. Every function is called from
//! the message path (hit-testing runs on every mouse move) so they stay cheap
//! and side-effect free.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Edge-based rectangle, same layout as a Win32 `RECT` (right/bottom exclusive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn origin(&self) -> Point {
        Point { x: self.left, y: self.top }
    }

    pub const fn size(&self) -> Size {
        Size { width: self.width(), height: self.height() }
    }

    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

/// Which part of the popup is under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitRegion {
    Client,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Geometry constants of the popup chrome, in pixels at 96 DPI.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeMetrics {
    pub default_client: Size,
    pub minimum_client: Size,
    pub aspect_ratio: f32,
    pub border: i32,
    pub corner_radius: i32,
    pub hover_size: i32,
    pub hover_margin: i32,
    pub close_size: i32,
    pub close_margin: i32,
    pub text_padding: i32,
    /// Gap between the cursor and the popup when placing it near the cursor.
    pub cursor_offset: i32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            default_client: Size::new(200, 80),
            minimum_client: Size::new(120, 48),
            aspect_ratio: 2.5,
            border: 6,
            corner_radius: 12,
            hover_size: 30,
            hover_margin: 7,
            close_size: 24,
            close_margin: 4,
            text_padding: 4,
            cursor_offset: 14,
        }
    }
}

impl ChromeMetrics {
    /// Side of the top-right square that reveals the close affordance.
    pub const fn hot_zone(&self) -> i32 {
        self.hover_size + self.hover_margin
    }

    /// Bounds of the close affordance inside a client area of `client` size.
    pub fn close_bounds(&self, client: Size) -> Rect {
        let left = client.width - self.close_size - self.close_margin;
        Rect::from_origin_size(
            Point::new(left, self.close_margin),
            Size::new(self.close_size, self.close_size),
        )
    }

    /// Metrics scaled from 96 DPI to `dpi`. The aspect ratio is unitless and kept.
    pub fn scaled(&self, dpi: u32) -> Self {
        if dpi == 0 || dpi == 96 {
            return *self;
        }
        let s = |v: i32| ((v as i64 * dpi as i64 + 48) / 96) as i32;
        let sz = |v: Size| Size::new(s(v.width), s(v.height));
        Self {
            default_client: sz(self.default_client),
            minimum_client: sz(self.minimum_client),
            aspect_ratio: self.aspect_ratio,
            border: s(self.border),
            corner_radius: s(self.corner_radius),
            hover_size: s(self.hover_size),
            hover_margin: s(self.hover_margin),
            close_size: s(self.close_size),
            close_margin: s(self.close_margin),
            text_padding: s(self.text_padding),
            cursor_offset: s(self.cursor_offset),
        }
    }
}

/// Classify a client-space point. The top edge is never a
/// resize handle; dragging happens through the content area instead.
pub fn hit_test(pt: Point, client: Size, border: i32) -> HitRegion {
    let left = pt.x < border;
    let right = pt.x >= client.width - border;
    let bottom = pt.y >= client.height - border;

    if left && bottom {
        HitRegion::BottomLeft
    } else if right && bottom {
        HitRegion::BottomRight
    } else if left {
        HitRegion::Left
    } else if right {
        HitRegion::Right
    } else if bottom {
        HitRegion::Bottom
    } else {
        HitRegion::Client
    }
}

/// Correct the vertical extent of an in-progress sizing rectangle so that
/// `width / height == aspect`. Left, top and right are left alone.
pub fn aspect_locked(rect: Rect, aspect: f32) -> Rect {
    let width = rect.width();
    let height = (width as f32 / aspect).round() as i32;
    Rect {
        bottom: rect.top.saturating_add(height),
        ..rect
    }
}

/// Where and how large the window becomes when maximized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackLimits {
    /// Maximized origin, relative to the monitor.
    pub max_position: Point,
    pub max_size: Size,
}

/// Smallest window the user can drag to. The client area is the whole
/// window, so this is also the client floor.
pub fn min_track_size(metrics: &ChromeMetrics) -> Size {
    let min = metrics.minimum_client;
    let locked = aspect_locked(Rect::new(0, 0, min.width, 0), metrics.aspect_ratio);
    Size::new(min.width, min.height.max(locked.height()))
}

/// Maximizing fills the work area of the monitor instead of covering the taskbar.
pub fn track_limits(monitor: Rect, work_area: Rect) -> TrackLimits {
    TrackLimits {
        max_position: Point::new(work_area.left - monitor.left, work_area.top - monitor.top),
        max_size: work_area.size(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Quarter (or partial) circle, angles in degrees, y axis pointing down.
    Arc {
        center: Point,
        radius: i32,
        start_deg: f32,
        sweep_deg: f32,
    },
    Close,
}

/// Closed outline of `rect` with quarter-circle corners of `radius`.
pub fn rounded_outline(rect: Rect, radius: i32) -> Vec<PathSegment> {
    let r = radius.clamp(0, rect.width().min(rect.height()) / 2);
    let (l, t, rt, b) = (rect.left, rect.top, rect.right, rect.bottom);

    let arc = |cx: i32, cy: i32, start_deg: f32| PathSegment::Arc {
        center: Point::new(cx, cy),
        radius: r,
        start_deg,
        sweep_deg: 90.0,
    };

    vec![
        PathSegment::MoveTo(Point::new(l, t + r)),
        arc(l + r, t + r, 180.0),
        PathSegment::LineTo(Point::new(rt - r, t)),
        arc(rt - r, t + r, 270.0),
        PathSegment::LineTo(Point::new(rt, b - r)),
        arc(rt - r, b - r, 0.0),
        PathSegment::LineTo(Point::new(l + r, b)),
        arc(l + r, b - r, 90.0),
        PathSegment::Close,
    ]
}

/// Sample an outline into a polygon. Each arc contributes `steps + 1` points.
pub fn flatten_outline(path: &[PathSegment], steps: u32) -> Vec<Point> {
    let steps = steps.max(1);
    let mut points: Vec<Point> = Vec::new();
    let push = |p: Point, points: &mut Vec<Point>| {
        if points.last() != Some(&p) {
            points.push(p);
        }
    };

    for seg in path {
        match *seg {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => push(p, &mut points),
            PathSegment::Arc { center, radius, start_deg, sweep_deg } => {
                for i in 0..=steps {
                    let deg = start_deg + sweep_deg * (i as f32 / steps as f32);
                    let rad = deg.to_radians();
                    let p = Point::new(
                        center.x + (radius as f32 * rad.cos()).round() as i32,
                        center.y + (radius as f32 * rad.sin()).round() as i32,
                    );
                    push(p, &mut points);
                }
            }
            PathSegment::Close => {
                if points.len() > 1 && points.first() == points.last() {
                    points.pop();
                }
            }
        }
    }
    points
}

pub fn fits_any_work_area(pos: Point, size: Size, work_areas: &[Rect]) -> bool {
    let bounds = Rect::from_origin_size(pos, size);
    work_areas.iter().any(|wa| wa.contains_rect(&bounds))
}

/// Centered horizontally on the cursor and `offset` above it, flipped below
/// when there is no room above. Horizontal position is clamped to `work_area`.
pub fn place_near_cursor(cursor: Point, size: Size, work_area: Rect, offset: i32) -> Point {
    let max_x = (work_area.right - size.width).max(work_area.left);
    let x = (cursor.x - size.width / 2).clamp(work_area.left, max_x);

    let mut y = cursor.y - size.height - offset;
    if y < work_area.top {
        y = cursor.y + offset;
    }
    Point::new(x, y)
}

/// Where `show()` puts the window: the remembered position when it is still
/// fully visible on some display, otherwise next to the cursor.
pub fn resolve_show_position(
    remembered: Option<Point>,
    size: Size,
    work_areas: &[Rect],
    cursor: Point,
    cursor_work_area: Rect,
    offset: i32,
) -> (Point, bool) {
    match remembered {
        Some(pos) if fits_any_work_area(pos, size, work_areas) => (pos, true),
        _ => (place_near_cursor(cursor, size, cursor_work_area, offset), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: Size = Size::new(200, 80);
    const B: i32 = 6;

    #[test]
    fn corners_and_edges_classify() {
        assert_eq!(hit_test(Point::new(0, 79), CLIENT, B), HitRegion::BottomLeft);
        assert_eq!(hit_test(Point::new(5, 74), CLIENT, B), HitRegion::BottomLeft);
        assert_eq!(hit_test(Point::new(199, 79), CLIENT, B), HitRegion::BottomRight);
        assert_eq!(hit_test(Point::new(194, 74), CLIENT, B), HitRegion::BottomRight);
        assert_eq!(hit_test(Point::new(2, 40), CLIENT, B), HitRegion::Left);
        assert_eq!(hit_test(Point::new(197, 40), CLIENT, B), HitRegion::Right);
        assert_eq!(hit_test(Point::new(100, 76), CLIENT, B), HitRegion::Bottom);
    }

    #[test]
    fn top_edge_and_interior_are_client() {
        for x in B..(CLIENT.width - B) {
            for y in [-3, 0, 1, 5, 40, CLIENT.height - B - 1] {
                let region = hit_test(Point::new(x, y), CLIENT, B);
                assert_eq!(region, HitRegion::Client, "({x},{y})");
            }
        }
        // Top corners only count as left/right, never top.
        assert_eq!(hit_test(Point::new(0, 0), CLIENT, B), HitRegion::Left);
        assert_eq!(hit_test(Point::new(199, 0), CLIENT, B), HitRegion::Right);
    }

    #[test]
    fn aspect_lock_holds_for_any_candidate() {
        let candidates = [
            Rect::new(0, 0, 200, 10),
            Rect::new(100, 50, 433, 900),
            Rect::new(-1920, 0, -1200, 3),
            Rect::new(10, 10, 131, 11),
            Rect::new(0, 0, 2561, 1440),
        ];
        for c in candidates {
            let r = aspect_locked(c, 2.5);
            assert_eq!((r.left, r.top, r.right), (c.left, c.top, c.right));
            let expected_h = r.width() as f32 / 2.5;
            assert!((r.height() as f32 - expected_h).abs() <= 1.0, "{r:?}");
        }
        assert_eq!(aspect_locked(Rect::new(0, 0, 200, 5), 2.5).bottom, 80);
    }

    #[test]
    fn aspect_lock_saturates_instead_of_overflowing() {
        let r = aspect_locked(Rect::new(0, 100, 200, 180), 1e-9);
        assert_eq!(r.bottom, i32::MAX);
    }

    #[test]
    fn track_limits_hold_the_minimum_at_any_dpi() {
        let monitor = Rect::new(1920, 0, 3840, 1080);
        let work = Rect::new(1920, 0, 3840, 1040);
        for (dpi, min) in [(96, Size::new(120, 48)), (144, Size::new(180, 72))] {
            let m = ChromeMetrics::default().scaled(dpi);
            assert_eq!(min_track_size(&m), min, "dpi {dpi}");
            let limits = track_limits(monitor, work);
            assert_eq!(limits.max_position, Point::new(0, 0));
            assert_eq!(limits.max_size, Size::new(1920, 1040));

            // Dragging down to the minimum width lands exactly on the minimum height.
            let locked = aspect_locked(Rect::new(0, 0, min.width, 1), m.aspect_ratio);
            assert_eq!(locked.height(), min.height, "dpi {dpi}");
        }
    }

    #[test]
    fn maximize_respects_a_top_taskbar() {
        let limits = track_limits(Rect::new(0, 0, 1920, 1080), Rect::new(0, 40, 1920, 1080));
        assert_eq!(limits.max_position, Point::new(0, 40));
        assert_eq!(limits.max_size, Size::new(1920, 1040));
    }

    #[test]
    fn min_track_never_undercuts_the_aspect_lock() {
        let m = ChromeMetrics {
            minimum_client: Size::new(120, 20),
            ..ChromeMetrics::default()
        };
        assert_eq!(min_track_size(&m), Size::new(120, 48));
    }

    #[test]
    fn outline_has_four_arcs_in_order() {
        let path = rounded_outline(Rect::new(0, 0, 200, 80), 12);
        let arcs: Vec<(f32, f32)> = path
            .iter()
            .filter_map(|s| match s {
                PathSegment::Arc { start_deg, sweep_deg, radius, .. } => {
                    assert_eq!(*radius, 12);
                    Some((*start_deg, *sweep_deg))
                }
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![(180.0, 90.0), (270.0, 90.0), (0.0, 90.0), (90.0, 90.0)]);
        assert_eq!(path.last(), Some(&PathSegment::Close));
    }

    #[test]
    fn flattened_outline_stays_inside_bounds() {
        let rect = Rect::new(10, 20, 210, 100);
        let poly = flatten_outline(&rounded_outline(rect, 12), 6);
        assert!(poly.len() >= 4 * 7);
        for p in &poly {
            assert!(p.x >= rect.left && p.x <= rect.right, "{p:?}");
            assert!(p.y >= rect.top && p.y <= rect.bottom, "{p:?}");
        }
        // Corner pixel is cut away.
        assert!(!poly.contains(&Point::new(rect.left, rect.top)));
    }

    #[test]
    fn radius_is_clamped_to_half_the_short_side() {
        let path = rounded_outline(Rect::new(0, 0, 40, 10), 12);
        let off_radius =
            |s: &PathSegment| matches!(s, PathSegment::Arc { radius, .. } if *radius != 5);
        assert!(!path.iter().any(off_radius));
    }

    #[test]
    fn placement_above_cursor_and_clamped() {
        let wa = Rect::new(0, 0, 1920, 1040);
        let size = Size::new(216, 119);
        let p = place_near_cursor(Point::new(1900, 1030), size, wa, 14);
        assert_eq!(p, Point::new(1920 - 216, 1030 - 119 - 14));

        let p = place_near_cursor(Point::new(5, 500), size, wa, 14);
        assert_eq!(p.x, 0);
    }

    #[test]
    fn placement_flips_below_when_no_room_above() {
        let wa = Rect::new(0, 40, 1920, 1080);
        let p = place_near_cursor(Point::new(800, 60), Size::new(200, 80), wa, 14);
        assert_eq!(p, Point::new(700, 74));
    }

    #[test]
    fn remembered_position_only_used_when_on_screen() {
        let areas = [Rect::new(0, 0, 1920, 1040), Rect::new(1920, 0, 3840, 1040)];
        let size = Size::new(200, 80);
        let cursor = Point::new(500, 500);

        let remembered = Some(Point::new(2000, 100));
        let (p, restored) = resolve_show_position(remembered, size, &areas, cursor, areas[0], 14);
        assert!(restored);
        assert_eq!(p, Point::new(2000, 100));

        // Straddling the right edge of the last display.
        let remembered = Some(Point::new(3700, 100));
        let (p, restored) = resolve_show_position(remembered, size, &areas, cursor, areas[0], 14);
        assert!(!restored);
        assert_eq!(p, Point::new(400, 406));
    }

    #[test]
    fn metrics_scale_with_dpi() {
        let m = ChromeMetrics::default().scaled(144);
        assert_eq!(m.default_client, Size::new(300, 120));
        assert_eq!(m.border, 9);
        assert_eq!(m.hot_zone(), 45 + 11);
        assert_eq!(ChromeMetrics::default().scaled(96), ChromeMetrics::default());
    }

    #[test]
    fn close_bounds_hug_top_right() {
        let r = ChromeMetrics::default().close_bounds(CLIENT);
        assert_eq!(r, Rect::new(172, 4, 196, 28));
    }
}
