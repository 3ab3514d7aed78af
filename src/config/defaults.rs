//! Config Default implementation.

use super::config_struct::Config;
use super::types::{default_font_family, default_hover_poll_ms, ThemeMode};
use crate::overlay::clock_popup::ChromeMetrics;

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::System,
            font_family: default_font_family(),
            hover_poll_ms: default_hover_poll_ms(),
            metrics: ChromeMetrics::default(),
        }
    }
}
