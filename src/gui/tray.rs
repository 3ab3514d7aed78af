// Tray icon and its context menu. Events arrive on tray-icon's global
// channels; helper threads forward them to the popup window as posted
// messages so all state changes happen on the UI thread.

/// Menu item ids. Also the wire format between the menu thread and the UI.
pub const MENU_ID_TOGGLE: &str = "toggle";
pub const MENU_ID_MAXIMIZE: &str = "maximize";
pub const MENU_ID_EXIT: &str = "exit";

pub const TRAY_TOOLTIP: &str = "Click to show clock";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrayCommand {
    Toggle,
    ToggleMaximize,
    Exit,
}

impl TrayCommand {
    pub fn from_menu_id(id: &str) -> Option<Self> {
        match id {
            MENU_ID_TOGGLE => Some(TrayCommand::Toggle),
            MENU_ID_MAXIMIZE => Some(TrayCommand::ToggleMaximize),
            MENU_ID_EXIT => Some(TrayCommand::Exit),
            _ => None,
        }
    }

    pub const fn code(self) -> usize {
        match self {
            TrayCommand::Toggle => 1,
            TrayCommand::ToggleMaximize => 2,
            TrayCommand::Exit => 3,
        }
    }

    pub fn from_code(code: usize) -> Option<Self> {
        match code {
            1 => Some(TrayCommand::Toggle),
            2 => Some(TrayCommand::ToggleMaximize),
            3 => Some(TrayCommand::Exit),
            _ => None,
        }
    }
}

pub fn toggle_label(visible: bool) -> &'static str {
    if visible {
        "Hide"
    } else {
        "Show"
    }
}

pub fn maximize_label(maximized: bool) -> &'static str {
    if maximized {
        "Unmaximize"
    } else {
        "Maximize"
    }
}

#[cfg(windows)]
pub use native::{spawn_event_forwarders, TrayController, WM_APP_TRAY_COMMAND};

#[cfg(windows)]
mod native {
    use super::*;
    use crate::win_types::SendHwnd;
    use anyhow::Context;
    use tracing::{debug, warn};
    use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
    use tray_icon::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
    use windows::Win32::Foundation::{LPARAM, WPARAM};
    use windows::Win32::UI::WindowsAndMessaging::{PostMessageW, WM_APP};

    /// Posted to the popup window; `wParam` is a [`TrayCommand::code`].
    pub const WM_APP_TRAY_COMMAND: u32 = WM_APP + 1;

    pub struct TrayController {
        tray: TrayIcon,
        toggle_item: MenuItem,
        maximize_item: MenuItem,
        is_dark: bool,
    }

    impl TrayController {
        pub fn new(is_dark: bool) -> anyhow::Result<Self> {
            let menu = Menu::new();
            let toggle_item = MenuItem::with_id(MENU_ID_TOGGLE, toggle_label(false), true, None);
            let maximize_item =
                MenuItem::with_id(MENU_ID_MAXIMIZE, maximize_label(false), true, None);
            let exit_item = MenuItem::with_id(MENU_ID_EXIT, "Exit", true, None);
            menu.append(&toggle_item)?;
            menu.append(&maximize_item)?;
            menu.append(&PredefinedMenuItem::separator())?;
            menu.append(&exit_item)?;

            let mut builder = TrayIconBuilder::new()
                .with_tooltip(TRAY_TOOLTIP)
                .with_menu(Box::new(menu))
                .with_menu_on_left_click(false);
            if let Some(icon) = crate::icon_gen::get_tray_icon(is_dark) {
                builder = builder.with_icon(icon);
            }
            let tray = builder.build().context("creating tray icon")?;

            Ok(Self {
                tray,
                toggle_item,
                maximize_item,
                is_dark,
            })
        }

        /// Relabel the menu after any popup operation.
        pub fn sync(&self, visible: bool, maximized: bool) {
            self.toggle_item.set_text(toggle_label(visible));
            self.maximize_item.set_text(maximize_label(maximized));
        }

        /// Swap the icon so it stays readable on the taskbar.
        pub fn set_dark(&mut self, is_dark: bool) {
            if self.is_dark == is_dark {
                return;
            }
            self.is_dark = is_dark;
            if let Err(e) = self.tray.set_icon(crate::icon_gen::get_tray_icon(is_dark)) {
                warn!("tray icon not updated: {e}");
            }
        }
    }

    /// Start the tray and menu receiver threads. They live for the whole
    /// process and only ever post to `hwnd`.
    pub fn spawn_event_forwarders(hwnd: SendHwnd) {
        let post = move |cmd: TrayCommand| unsafe {
            let _ = PostMessageW(
                Some(hwnd.get()),
                WM_APP_TRAY_COMMAND,
                WPARAM(cmd.code()),
                LPARAM(0),
            );
        };

        // Tray thread
        std::thread::spawn(move || {
            while let Ok(event) = TrayIconEvent::receiver().recv() {
                if let TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } = event
                {
                    post(TrayCommand::Toggle);
                }
            }
        });

        // Menu thread
        std::thread::spawn(move || {
            while let Ok(event) = MenuEvent::receiver().recv() {
                match TrayCommand::from_menu_id(event.id.0.as_str()) {
                    Some(cmd) => post(cmd),
                    None => debug!(id = %event.id.0, "unknown menu id"),
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_track_popup_state() {
        assert_eq!(toggle_label(false), "Show");
        assert_eq!(toggle_label(true), "Hide");
        assert_eq!(maximize_label(false), "Maximize");
        assert_eq!(maximize_label(true), "Unmaximize");
    }

    #[test]
    fn menu_ids_map_to_commands() {
        assert_eq!(TrayCommand::from_menu_id("toggle"), Some(TrayCommand::Toggle));
        assert_eq!(TrayCommand::from_menu_id("maximize"), Some(TrayCommand::ToggleMaximize));
        assert_eq!(TrayCommand::from_menu_id("exit"), Some(TrayCommand::Exit));
        assert_eq!(TrayCommand::from_menu_id("1001"), None);
    }

    #[test]
    fn command_codes_survive_a_window_message() {
        for cmd in [TrayCommand::Toggle, TrayCommand::ToggleMaximize, TrayCommand::Exit] {
            assert_eq!(TrayCommand::from_code(cmd.code()), Some(cmd));
        }
        assert_eq!(TrayCommand::from_code(0), None);
    }
}
