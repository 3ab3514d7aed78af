use thiserror::Error;

/// Failures from the window system. None of them are fatal for the popup;
/// the controller logs them and degrades.
#[derive(Debug, Error)]
pub enum ChromeError {
    #[error("compositor rejected window attribute {attribute}: {reason}")]
    CompositorAttribute {
        attribute: &'static str,
        reason: String,
    },
    #[error("could not build the window region: {0}")]
    Region(String),
    #[error("window creation failed: {0}")]
    WindowCreation(String),
}

#[cfg(windows)]
impl ChromeError {
    pub(crate) fn compositor(attribute: &'static str, err: windows::core::Error) -> Self {
        ChromeError::CompositorAttribute {
            attribute,
            reason: err.message(),
        }
    }
}
