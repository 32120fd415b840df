use icons::X;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {ModalHeader, div, "mb-4 flex flex-col gap-1 pr-8"}
    clx! {ModalTitle, h3, "text-base leading-none font-semibold"}
    clx! {ModalFooter, footer, "flex items-center justify-between gap-2 pt-3"}
}

pub use components::*;

/// Overlay panel driven by a signal. Clicking the backdrop or the close
/// button runs `on_close`; clicks inside the panel stay inside.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "relative w-full max-w-md max-h-[90vh] overflow-y-auto rounded-2xl border border-border bg-background p-5 shadow-lg",
        class
    );

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                data-name="ModalBackdrop"
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/40 px-4"
                on:click=move |_| on_close.run(())
            >
                <div
                    data-name="ModalContent"
                    class=merged_class.clone()
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <button
                        type="button"
                        class="absolute top-4 right-4 rounded-sm p-1 text-muted-foreground hover:text-foreground [&_svg:not([class*='size-'])]:size-4"
                        aria-label="Close"
                        on:click=move |_| on_close.run(())
                    >
                        <X />
                    </button>
                    {move || children.with_value(|c| c())}
                </div>
            </div>
        </Show>
    }
}
