pub mod clock_popup;
pub mod paint_utils;
pub mod utils;
