use super::geometry::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupPhase {
    Hidden,
    VisibleNormal,
    VisibleMaximized,
}

#[derive(Clone, Debug, Default)]
pub struct WindowState {
    pub client_size: Size,
    pub visible: bool,
    pub maximized: bool,
    /// Survives hide/show for the life of the process only.
    pub last_known_position: Option<Point>,
}

impl WindowState {
    pub fn phase(&self) -> PopupPhase {
        match (self.visible, self.maximized) {
            (false, _) => PopupPhase::Hidden,
            (true, false) => PopupPhase::VisibleNormal,
            (true, true) => PopupPhase::VisibleMaximized,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const DARK_SURFACE: Rgb = Rgb::new(32, 32, 32);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0x00BBGGRR`, the layout GDI and DWM expect.
    pub const fn to_colorref(self) -> u32 {
        (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    pub is_light: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl ThemeState {
    pub fn palette(&self) -> Palette {
        if self.is_light {
            Palette { background: Rgb::WHITE, foreground: Rgb::BLACK }
        } else {
            Palette { background: Rgb::DARK_SURFACE, foreground: Rgb::WHITE }
        }
    }
}

/// What the paint routine needs, borrowed from the controller.
#[derive(Debug)]
pub struct PopupView<'a> {
    pub text: &'a str,
    pub font_size: i32,
    pub font_family: &'a str,
    pub palette: Palette,
    pub client_size: Size,
    pub close_visible: bool,
    pub close_bounds: Rect,
}

impl PopupView<'_> {
    /// The close button is an opaque tile in the window colors, painted
    /// over whatever digits run underneath it.
    pub fn close_tile(&self) -> Option<(Rect, Palette)> {
        self.close_visible.then_some((self.close_bounds, self.palette))
    }
}
