#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// The popup core is portable and unit-tested everywhere; only Windows runs it.
#![cfg_attr(not(windows), allow(dead_code))]

mod config;
mod gui;
mod icon_gen;
mod overlay;
#[cfg(windows)]
pub mod win_types;

use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("simple_tray_clock=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    init_tracing();
    anyhow::bail!(
        "simple-tray-clock lives in the Windows notification area and only runs on Windows"
    )
}

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use tracing::info;
    use windows::Win32::System::Com::CoInitialize;

    init_tracing();
    platform::install_crash_handler();

    // --- INIT COM ---
    // The tray icon's shell calls expect an initialized apartment.
    unsafe {
        let _ = CoInitialize(None);
    }

    platform::enable_per_monitor_dpi();
    platform::enable_dark_mode_for_app();

    // Keep the handle alive for the duration of the program
    let Some(_single_instance_mutex) = platform::acquire_single_instance() else {
        info!("another instance is already running");
        return Ok(());
    };

    let config = config::load_config();
    info!(theme = ?config.theme_mode, font = %config.font_family, "config loaded");

    overlay::clock_popup::create_clock_popup(&config)?;
    platform::run_message_loop();

    info!("exiting");
    Ok(())
}

#[cfg(windows)]
mod platform {
    use std::panic;

    use windows::core::*;
    use windows::Win32::Foundation::*;
    use windows::Win32::System::Threading::CreateMutexW;
    use windows::Win32::UI::HiDpi::{
        SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    };
    use windows::Win32::UI::WindowsAndMessaging::*;

    pub fn install_crash_handler() {
        panic::set_hook(Box::new(|panic_info| {
            let location = if let Some(location) = panic_info.location() {
                format!("File: {}\nLine: {}", location.file(), location.line())
            } else {
                "Unknown location".to_string()
            };

            let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic payload".to_string()
            };

            tracing::error!(%payload, %location, "panic");

            let error_msg = format!(
                "The clock crashed.\n\nError: {}\n\nLocation:\n{}",
                payload, location
            );
            let wide_msg: Vec<u16> = error_msg.encode_utf16().chain(std::iter::once(0)).collect();

            unsafe {
                MessageBoxW(
                    None,
                    PCWSTR(wide_msg.as_ptr()),
                    w!("Simple Tray Clock"),
                    MB_ICONERROR | MB_OK,
                );
            }
        }));
    }

    pub fn enable_per_monitor_dpi() {
        unsafe {
            let awareness =
                SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
            if let Err(e) = awareness {
                // Already set by a manifest, or an older Windows.
                tracing::debug!("per-monitor DPI awareness not set: {e}");
            }
        }
    }

    /// Enable dark mode for Win32 native menus (the tray context menu).
    /// This uses the undocumented SetPreferredAppMode API from uxtheme.dll
    pub fn enable_dark_mode_for_app() {
        use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};

        // PreferredAppMode::AllowDark
        const ALLOW_DARK: u32 = 1;

        unsafe {
            if let Ok(uxtheme) = LoadLibraryW(w!("uxtheme.dll")) {
                // SetPreferredAppMode is exported by ordinal 135 only
                let ordinal = 135u16;
                let proc_name = PCSTR::from_raw(ordinal as usize as *const u8);

                if let Some(set_preferred_app_mode) = GetProcAddress(uxtheme, proc_name) {
                    let func: extern "system" fn(u32) -> u32 =
                        std::mem::transmute(set_preferred_app_mode);
                    func(ALLOW_DARK);
                }
            }
        }
    }

    /// `None` if another instance already holds the mutex.
    pub fn acquire_single_instance() -> Option<HANDLE> {
        unsafe {
            match CreateMutexW(None, true, w!("Local\\SimpleTrayClockSingleInstanceMutex")) {
                Ok(handle) => {
                    if GetLastError() == ERROR_ALREADY_EXISTS {
                        let _ = CloseHandle(handle);
                        return None;
                    }
                    Some(handle)
                }
                // Run unguarded.
                Err(e) => {
                    tracing::warn!("single-instance mutex unavailable: {e}");
                    Some(HANDLE::default())
                }
            }
        }
    }

    pub fn run_message_loop() {
        unsafe {
            let mut msg = MSG::default();
            // GetMessageW returns -1 on error, 0 on WM_QUIT.
            while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}
