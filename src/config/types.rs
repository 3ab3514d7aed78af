//! Core types and serde default helpers for configuration.

use serde::{Deserialize, Serialize};

// --- CONSTANTS ---
pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";
pub const DEFAULT_HOVER_POLL_MS: u32 = 100;
/// Polling faster than this buys nothing and keeps the UI thread busy.
pub const MIN_HOVER_POLL_MS: u32 = 16;
/// Width over height. Outside this range the popup is a sliver.
pub const MIN_ASPECT_RATIO: f32 = 0.5;
pub const MAX_ASPECT_RATIO: f32 = 10.0;

// --- THEME MODE ENUM ---
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    System,
    Dark,
    Light,
}

pub fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}
pub fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}
pub fn default_hover_poll_ms() -> u32 {
    DEFAULT_HOVER_POLL_MS
}
