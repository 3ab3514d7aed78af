//! Config I/O operations: load and save.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::config_struct::Config;
use super::types::{MAX_ASPECT_RATIO, MIN_ASPECT_RATIO, MIN_HOVER_POLL_MS};

// ============================================================================
// CONFIG PATH
// ============================================================================

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_default()
        .join("simple-tray-clock");
    let _ = std::fs::create_dir_all(&config_dir);
    config_dir.join("config.json")
}

// ============================================================================
// CONFIG LOADING
// ============================================================================

/// Load config from the default location. On first run the defaults are
/// written out so they can be edited.
pub fn load_config() -> Config {
    let path = get_config_path();
    if !path.exists() {
        let config = Config::default();
        save_config_to(&path, &config);
        return config;
    }
    load_config_from(&path)
}

/// Load config from `path`, falling back to defaults on any error
pub fn load_config_from(path: &Path) -> Config {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) => {
            debug!("no readable config at {}: {e}", path.display());
            return Config::default();
        }
    };

    let mut config: Config = match serde_json::from_str(&data) {
        Ok(c) => c,
        Err(e) => {
            warn!("ignoring malformed config {}: {e}", path.display());
            return Config::default();
        }
    };

    sanitize_config(&mut config);
    config
}

/// Repair values that would break the popup geometry
fn sanitize_config(config: &mut Config) {
    let defaults = Config::default().metrics;
    let m = &mut config.metrics;

    m.aspect_ratio = if m.aspect_ratio.is_finite() && m.aspect_ratio > 0.0 {
        m.aspect_ratio.clamp(MIN_ASPECT_RATIO, MAX_ASPECT_RATIO)
    } else {
        defaults.aspect_ratio
    };

    if m.minimum_client.width <= 0 {
        m.minimum_client = defaults.minimum_client;
    }
    if m.default_client.width < m.minimum_client.width {
        m.default_client.width = m.minimum_client.width;
    }
    // Heights follow the width so the aspect lock never fights the floor.
    m.minimum_client.height = height_for(m.minimum_client.width, m.aspect_ratio);
    m.default_client.height = height_for(m.default_client.width, m.aspect_ratio);

    m.border = m.border.max(1);
    m.corner_radius = m.corner_radius.max(0);
    for (value, default) in [
        (&mut m.text_padding, defaults.text_padding),
        (&mut m.hover_size, defaults.hover_size),
        (&mut m.close_size, defaults.close_size),
        (&mut m.cursor_offset, defaults.cursor_offset),
    ] {
        if *value <= 0 {
            *value = default;
        }
    }

    config.hover_poll_ms = config.hover_poll_ms.max(MIN_HOVER_POLL_MS);
    if config.font_family.trim().is_empty() {
        config.font_family = Config::default().font_family;
    }
}

fn height_for(width: i32, aspect: f32) -> i32 {
    ((width as f32 / aspect).round() as i32).max(1)
}

// ============================================================================
// CONFIG SAVING
// ============================================================================

pub fn save_config_to(path: &Path, config: &Config) {
    if let Ok(data) = serde_json::to_string_pretty(config) {
        if let Err(e) = std::fs::write(path, data) {
            warn!("could not write config {}: {e}", path.display());
        }
    }
}
