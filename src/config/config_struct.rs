//! Config struct definition.

use serde::{Deserialize, Serialize};

use super::types::{default_font_family, default_hover_poll_ms, default_theme_mode, ThemeMode};
use crate::overlay::clock_popup::ChromeMetrics;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// System follows the Windows "apps use light theme" preference.
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_hover_poll_ms")]
    pub hover_poll_ms: u32,

    // --- Popup Geometry ---
    #[serde(default)]
    pub metrics: ChromeMetrics,
}
