// Theme lookup - resolves light/dark for the popup from the configured
// ThemeMode and, in System mode, the Windows "apps use light theme" setting.

use crate::config::ThemeMode;
use crate::overlay::clock_popup::ThemeState;

/// Anything that can answer "is the current app theme light?".
pub trait ThemeSource {
    fn current_is_light(&self) -> bool;
}

/// Windows app-theme preference. Missing key means light (pre-1809 default).
#[cfg(windows)]
pub struct RegistryTheme;

#[cfg(windows)]
impl RegistryTheme {
    const PERSONALIZE_KEY: &'static str =
        "Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize";
}

#[cfg(windows)]
impl ThemeSource for RegistryTheme {
    fn current_is_light(&self) -> bool {
        use winreg::enums::HKEY_CURRENT_USER;
        use winreg::RegKey;

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        match hkcu
            .open_subkey(Self::PERSONALIZE_KEY)
            .and_then(|key| key.get_value::<u32, _>("AppsUseLightTheme"))
        {
            Ok(value) => value != 0,
            Err(e) => {
                tracing::debug!("AppsUseLightTheme not readable, assuming light: {e}");
                true
            }
        }
    }
}

/// Applies the user's configured override on top of a system source.
pub struct ConfiguredTheme<S> {
    mode: ThemeMode,
    system: S,
}

impl<S: ThemeSource> ConfiguredTheme<S> {
    pub fn new(mode: ThemeMode, system: S) -> Self {
        Self { mode, system }
    }

    pub fn state(&self) -> ThemeState {
        ThemeState {
            is_light: self.current_is_light(),
        }
    }
}

impl<S: ThemeSource> ThemeSource for ConfiguredTheme<S> {
    fn current_is_light(&self) -> bool {
        match self.mode {
            ThemeMode::Light => true,
            ThemeMode::Dark => false,
            ThemeMode::System => self.system.current_is_light(),
        }
    }
}

/// `WM_SETTINGCHANGE` carries the changed area as a string; only this one
/// signals an app theme flip.
pub const THEME_CHANGE_AREA: &str = "ImmersiveColorSet";

pub fn is_theme_change(area: &str) -> bool {
    area == THEME_CHANGE_AREA
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedSystem(Cell<bool>);

    impl ThemeSource for FixedSystem {
        fn current_is_light(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn system_mode_follows_the_system() {
        let theme = ConfiguredTheme::new(ThemeMode::System, FixedSystem(Cell::new(true)));
        assert!(theme.state().is_light);
        theme.system.0.set(false);
        assert!(!theme.state().is_light, "re-queried on every call");
    }

    #[test]
    fn explicit_modes_ignore_the_system() {
        let dark = ConfiguredTheme::new(ThemeMode::Dark, FixedSystem(Cell::new(true)));
        assert!(!dark.current_is_light());
        let light = ConfiguredTheme::new(ThemeMode::Light, FixedSystem(Cell::new(false)));
        assert!(light.current_is_light());
    }

    #[test]
    fn only_immersive_color_set_is_a_theme_change() {
        assert!(is_theme_change("ImmersiveColorSet"));
        assert!(!is_theme_change("Policy"));
        assert!(!is_theme_change(""));
    }
}
