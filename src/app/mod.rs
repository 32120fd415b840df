use crate::pages::CatalogPage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // Single page: the catalog owns every dialog, so there is no router.
    view! { <CatalogPage /> }
}
