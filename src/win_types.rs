// Thread-safe wrappers for raw Win32 handles.

use windows::Win32::Foundation::HWND;

/// Window handle that can cross into helper threads. Only used for posting
/// messages, which is allowed from any thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SendHwnd(pub HWND);

unsafe impl Send for SendHwnd {}
unsafe impl Sync for SendHwnd {}

impl SendHwnd {
    /// Use this inside closures so the whole wrapper is captured, not the
    /// bare `HWND` field.
    pub fn get(self) -> HWND {
        self.0
    }
}
