pub mod theme;
pub mod tray;
