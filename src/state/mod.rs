pub(crate) mod catalog;

use crate::api::{ApiClient, EnvConfig};
use crate::catalog::CatalogController;
use crate::state::catalog::CatalogState;
use crate::storage::{load_theme_prefs, save_theme_color, save_theme_mode};
use crate::theme::{apply_theme, ThemeColor, ThemeMode, ThemePrefs};
use leptos::prelude::*;

pub(crate) type Catalog = CatalogController<ApiClient, RwSignal<CatalogState>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,

    /// Collections, items, stats and selection. Rendered through `crate::view`.
    pub catalog_state: RwSignal<CatalogState>,
    pub catalog: Catalog,

    pub theme: RwSignal<ThemePrefs>,
}

impl AppState {
    pub fn new() -> Self {
        let config = EnvConfig::new();
        let catalog_state = RwSignal::new(CatalogState::default());
        let catalog = CatalogController::new(ApiClient::from_config(&config), catalog_state);

        let prefs = load_theme_prefs();
        apply_theme(prefs);

        Self {
            config,
            catalog_state,
            catalog,
            theme: RwSignal::new(prefs),
        }
    }

    pub fn api_host(&self) -> &str {
        &self.config.api_host
    }

    pub fn set_theme_mode(&self, mode: ThemeMode) {
        save_theme_mode(mode);
        self.theme.update(|t| t.mode = mode);
        apply_theme(self.theme.get_untracked());
    }

    pub fn set_theme_color(&self, color: ThemeColor) {
        save_theme_color(color);
        self.theme.update(|t| t.color = color);
        apply_theme(self.theme.get_untracked());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
