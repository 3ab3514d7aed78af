//! Dispatch table for the native messages the popup overrides.
//!
//! The window procedure translates a raw message into a [`ChromeMessage`] and
//! asks [`intercept`] for an outcome. `None` means "let the default window
//! procedure handle it".

use super::geometry::{aspect_locked, hit_test, ChromeMetrics, HitRegion, Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    HitTest,
    Sizing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChromeMessage {
    /// Cursor already converted to client coordinates.
    HitTest { client_point: Point },
    /// Proposed window rectangle of an in-progress resize.
    Sizing { proposed: Rect },
}

impl ChromeMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            ChromeMessage::HitTest { .. } => MessageKind::HitTest,
            ChromeMessage::Sizing { .. } => MessageKind::Sizing,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChromeOutcome {
    Region(HitRegion),
    Resized(Rect),
}

/// Snapshot of the window state the hooks are allowed to look at.
#[derive(Clone, Copy, Debug)]
pub struct ChromeContext {
    pub client_size: Size,
    pub metrics: ChromeMetrics,
    pub maximized: bool,
}

type Hook = fn(&ChromeContext, &ChromeMessage) -> Option<ChromeOutcome>;

const HOOKS: [(MessageKind, Hook); 2] = [
    (MessageKind::HitTest, hit_test_hook),
    (MessageKind::Sizing, sizing_hook),
];

pub fn intercept(ctx: &ChromeContext, msg: &ChromeMessage) -> Option<ChromeOutcome> {
    let kind = msg.kind();
    HOOKS
        .iter()
        .find(|(k, _)| *k == kind)
        .and_then(|(_, hook)| hook(ctx, msg))
}

fn hit_test_hook(ctx: &ChromeContext, msg: &ChromeMessage) -> Option<ChromeOutcome> {
    let ChromeMessage::HitTest { client_point } = msg else {
        return None;
    };
    // A maximized window has no resize handles.
    if ctx.maximized {
        return Some(ChromeOutcome::Region(HitRegion::Client));
    }
    Some(ChromeOutcome::Region(hit_test(
        *client_point,
        ctx.client_size,
        ctx.metrics.border,
    )))
}

fn sizing_hook(ctx: &ChromeContext, msg: &ChromeMessage) -> Option<ChromeOutcome> {
    let ChromeMessage::Sizing { proposed } = msg else {
        return None;
    };
    Some(ChromeOutcome::Resized(aspect_locked(
        *proposed,
        ctx.metrics.aspect_ratio,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(maximized: bool) -> ChromeContext {
        ChromeContext {
            client_size: Size::new(200, 80),
            metrics: ChromeMetrics::default(),
            maximized,
        }
    }

    #[test]
    fn hit_test_routes_to_geometry() {
        let msg = ChromeMessage::HitTest { client_point: Point::new(199, 79) };
        let out = intercept(&ctx(false), &msg);
        assert_eq!(out, Some(ChromeOutcome::Region(HitRegion::BottomRight)));
    }

    #[test]
    fn maximized_window_is_all_client() {
        let msg = ChromeMessage::HitTest { client_point: Point::new(0, 79) };
        let out = intercept(&ctx(true), &msg);
        assert_eq!(out, Some(ChromeOutcome::Region(HitRegion::Client)));
    }

    #[test]
    fn sizing_is_aspect_locked() {
        let msg = ChromeMessage::Sizing { proposed: Rect::new(10, 10, 260, 40) };
        let out = intercept(&ctx(false), &msg);
        assert_eq!(out, Some(ChromeOutcome::Resized(Rect::new(10, 10, 260, 110))));
    }
}
