use std::cell::RefCell;
use std::sync::Once;

use anyhow::Context;
use tracing::{info, warn};
use windows::core::w;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::HBRUSH;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::controller::{ClockPopup, PopupSettings};
use super::error::ChromeError;
use super::event_handler::popup_wnd_proc;
use super::win32_host::Win32Host;
use crate::config::Config;
use crate::gui::theme::{ConfiguredTheme, RegistryTheme, ThemeSource};
use crate::gui::tray::{spawn_event_forwarders, TrayController};
use crate::win_types::SendHwnd;

static REGISTER_POPUP_CLASS: Once = Once::new();

/// Retries tray creation while the shell is not ready yet (early at logon).
pub(super) const TRAY_RETRY_TIMER_ID: usize = 3;
const TRAY_RETRY_MS: u32 = 1000;

pub(super) struct PopupApp {
    pub popup: ClockPopup<Win32Host>,
    pub tray: Option<TrayController>,
    pub theme: ConfiguredTheme<RegistryTheme>,
}

impl PopupApp {
    /// Menu labels follow the popup after every operation.
    pub fn sync_tray(&self) {
        if let Some(tray) = &self.tray {
            tray.sync(self.popup.is_visible(), self.popup.is_maximized());
        }
    }

    pub fn refresh_theme(&mut self) {
        let state = self.theme.state();
        self.popup.apply_theme(state);
        if let Some(tray) = &mut self.tray {
            tray.set_dark(!state.is_light);
        }
    }

    /// Returns true once a tray icon exists.
    pub fn ensure_tray(&mut self) -> bool {
        if self.tray.is_some() {
            return true;
        }
        match TrayController::new(!self.theme.current_is_light()) {
            Ok(tray) => {
                self.tray = Some(tray);
                self.sync_tray();
                info!("tray icon created");
                true
            }
            Err(e) => {
                warn!("tray icon not available yet: {e:#}");
                false
            }
        }
    }
}

thread_local! {
    static POPUP_APP: RefCell<Option<PopupApp>> = const { RefCell::new(None) };
}

/// Runs `f` against the app unless it is already borrowed further up the
/// stack (a native call re-entered the window procedure) or not yet built.
pub(super) fn with_app<R>(f: impl FnOnce(&mut PopupApp) -> R) -> Option<R> {
    POPUP_APP.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

pub(super) fn take_app() -> Option<PopupApp> {
    POPUP_APP.with(|cell| cell.try_borrow_mut().ok().and_then(|mut app| app.take()))
}

/// Create the hidden popup window, its tray icon and the tray event
/// forwarders. Must be called on the thread that runs the message loop.
pub fn create_clock_popup(config: &Config) -> anyhow::Result<HWND> {
    unsafe {
        let instance = GetModuleHandleW(None).context("GetModuleHandleW")?;
        let class_name = w!("SimpleTrayClockPopup");

        REGISTER_POPUP_CLASS.call_once(|| {
            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW | CS_DBLCLKS,
                lpfnWndProc: Some(popup_wnd_proc),
                hInstance: instance.into(),
                lpszClassName: class_name,
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                hbrBackground: HBRUSH::default(),
                ..Default::default()
            };
            RegisterClassW(&wc);
        });

        let base = config.metrics.default_client;
        let hwnd = CreateWindowExW(
            WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
            class_name,
            w!("Clock"),
            WS_POPUP | WS_THICKFRAME,
            0,
            0,
            base.width,
            base.height,
            None,
            None,
            Some(instance.into()),
            None,
        )
        .map_err(|e| ChromeError::WindowCreation(e.message()))?;

        // Created at 96 DPI sizes; grow to the monitor's scale.
        let dpi = GetDpiForWindow(hwnd);
        let scaled = config.metrics.scaled(dpi).default_client;
        let _ = SetWindowPos(
            hwnd,
            None,
            0,
            0,
            scaled.width,
            scaled.height,
            SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
        );

        let theme = ConfiguredTheme::new(config.theme_mode, RegistryTheme);
        let settings = PopupSettings {
            metrics: config.metrics,
            font_family: config.font_family.clone(),
            hover_poll_ms: config.hover_poll_ms,
        };
        let mut popup = ClockPopup::new(
            Win32Host::new(hwnd, &config.font_family),
            settings,
            theme.state(),
        );
        popup.set_dpi(dpi);
        popup.initialize();

        let mut app = PopupApp {
            popup,
            tray: None,
            theme,
        };
        if !app.ensure_tray() {
            SetTimer(Some(hwnd), TRAY_RETRY_TIMER_ID, TRAY_RETRY_MS, None);
        }

        POPUP_APP.with(|cell| *cell.borrow_mut() = Some(app));
        spawn_event_forwarders(SendHwnd(hwnd));

        info!(dpi, "clock popup created");
        Ok(hwnd)
    }
}
