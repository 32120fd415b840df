use crate::theme::{ThemeColor, ThemeMode, ThemePrefs};

pub(crate) const THEME_KEY: &str = "theme";
pub(crate) const THEME_COLOR_KEY: &str = "themeColor";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

/// Storage may be disabled (private mode, quota); writes are best-effort.
pub(crate) fn save_string_to_storage(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub(crate) fn load_theme_prefs() -> ThemePrefs {
    let mode = load_string_from_storage(THEME_KEY);
    let color = load_string_from_storage(THEME_COLOR_KEY);
    ThemePrefs::from_stored(mode.as_deref(), color.as_deref())
}

pub(crate) fn save_theme_mode(mode: ThemeMode) {
    save_string_to_storage(THEME_KEY, mode.as_ref());
}

pub(crate) fn save_theme_color(color: ThemeColor) {
    save_string_to_storage(THEME_COLOR_KEY, color.as_ref());
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn clear() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(THEME_KEY);
            let _ = storage.remove_item(THEME_COLOR_KEY);
        }
    }

    #[wasm_bindgen_test]
    fn test_theme_prefs_default_when_storage_empty() {
        clear();
        assert_eq!(load_theme_prefs(), ThemePrefs::default());
    }

    #[wasm_bindgen_test]
    fn test_theme_prefs_storage_roundtrip() {
        clear();
        save_theme_mode(ThemeMode::Dark);
        save_theme_color(ThemeColor::Orange);

        assert_eq!(load_string_from_storage(THEME_KEY).as_deref(), Some("dark"));
        let prefs = load_theme_prefs();
        assert_eq!(prefs.mode, ThemeMode::Dark);
        assert_eq!(prefs.color, ThemeColor::Orange);
        clear();
    }
}
