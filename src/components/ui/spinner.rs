use icons::Loader;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Spinning loader. `label` is announced to screen readers.
#[component]
pub fn Spinner(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "Loading".to_string())] label: String,
) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <Loader class=merged_class attr:role="status" attr:aria-label=label /> }
}
