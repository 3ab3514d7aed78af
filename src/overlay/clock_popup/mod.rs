//! The clock popup: a small borderless, always-on-top window showing the
//! time, with custom chrome (rounded corners, aspect-locked resizing, a close
//! affordance revealed on hover).
//!
//! Everything above [`host::PopupHost`] is plain Rust and tested on any
//! platform; the Win32 side lives in `win32_host`, `paint`, `event_handler`
//! and `window`.

mod chrome;
mod controller;
mod error;
mod font_fit;
mod geometry;
mod host;
mod hover;
mod state;
mod ticker;

#[cfg(windows)]
mod event_handler;
#[cfg(windows)]
mod paint;
#[cfg(windows)]
mod win32_host;
#[cfg(windows)]
mod window;

pub use geometry::ChromeMetrics;
pub use state::ThemeState;

#[cfg(windows)]
pub use window::create_clock_popup;
