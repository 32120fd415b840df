mod dialogs;

use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, Input, Spinner,
};
use crate::forms::{CollectionForm, ItemForm};
use crate::models::{CollectionId, ItemId};
use crate::state::AppContext;
use crate::util::browser::alert;
use crate::view::{
    collection_tabs, item_grid, stats_summary, CardImage, ItemCard, ItemGrid, EMPTY_GRID_MESSAGE,
    PLACEHOLDER_GLYPH,
};
use dialogs::{CollectionModal, DetailModal, ItemModal, SettingsModal};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;

#[component]
pub fn CatalogPage() -> impl IntoView {
    let app = StoredValue::new(expect_context::<AppContext>().0);
    let catalog_state = app.with_value(|a| a.catalog_state);

    // Open dialogs. A form is `Some` while its modal is shown.
    let collection_form: RwSignal<Option<CollectionForm>> = RwSignal::new(None);
    let item_form: RwSignal<Option<ItemForm>> = RwSignal::new(None);
    let detail_id: RwSignal<Option<ItemId>> = RwSignal::new(None);
    let settings_open: RwSignal<bool> = RwSignal::new(false);

    let search: RwSignal<String> = RwSignal::new(String::new());

    {
        let catalog = app.with_value(|a| a.catalog.clone());
        spawn_local(async move {
            catalog.load_collections().await;
        });
    }

    Effect::new(move |_| {
        let query = search.get();
        app.with_value(|a| a.catalog.set_search_query(query));
    });

    let _key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            collection_form.set(None);
            item_form.set(None);
            detail_id.set(None);
            settings_open.set(false);
        }
    });

    let select_collection = move |id: CollectionId| {
        let catalog = app.with_value(|a| a.catalog.clone());
        spawn_local(async move {
            catalog.select_collection(id).await;
        });
    };

    let edit_collection = move |id: CollectionId| {
        if let Some(form) = app.with_value(|a| a.catalog.collection_edit_form(id)) {
            collection_form.set(Some(form));
        }
    };

    let open_new_item = move |_| match app.with_value(|a| a.catalog.new_item_form()) {
        Ok(form) => item_form.set(Some(form)),
        Err(e) => alert(&e.to_string()),
    };

    let show_detail = Callback::new(move |id: ItemId| {
        if catalog_state.with_untracked(|s| s.find_item(id).is_some()) {
            detail_id.set(Some(id));
        }
    });

    let edit_item = Callback::new(move |id: ItemId| {
        let form = app.with_value(|a| a.catalog.item_edit_form(id, a.api_host()));
        if let Some(form) = form {
            item_form.set(Some(form));
        }
    });

    let stats = Memo::new(move |_| catalog_state.with(stats_summary));
    let grid = Memo::new(move |_| {
        app.with_value(|a| catalog_state.with(|s| item_grid(s, a.api_host())))
    });

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <header class="bg-[image:var(--theme-gradient)] px-4 py-5 text-white shadow-sm">
                <div class="mx-auto flex max-w-4xl items-center justify-between">
                    <h1 class="text-lg font-semibold tracking-wide">"My Collection"</h1>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="text-white hover:bg-white/20"
                        attr:title="Settings"
                        on:click=move |_| settings_open.set(true)
                    >
                        "⚙"
                    </Button>
                </div>
            </header>

            <main class="mx-auto max-w-4xl space-y-4 px-4 py-4">
                <nav class="flex items-center gap-2 overflow-x-auto pb-1">
                    {move || {
                        catalog_state
                            .with(collection_tabs)
                            .into_iter()
                            .map(|tab| {
                                let id = tab.id;
                                let class = if tab.active {
                                    "bg-[var(--theme-color)] text-white"
                                } else {
                                    "bg-secondary text-secondary-foreground hover:bg-secondary/80"
                                };
                                view! {
                                    <div
                                        class=format!("inline-flex shrink-0 cursor-pointer items-center gap-1 rounded-full px-4 py-1.5 text-sm {class}")
                                        on:click=move |_| select_collection(id)
                                    >
                                        <span>{tab.name}</span>
                                        <button
                                            type="button"
                                            class="text-xs opacity-70 hover:opacity-100"
                                            title="Edit collection"
                                            on:click=move |ev: web_sys::MouseEvent| {
                                                ev.stop_propagation();
                                                edit_collection(id);
                                            }
                                        >
                                            "✎"
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Pill
                        class="shrink-0"
                        on:click=move |_| collection_form.set(Some(CollectionForm::new()))
                    >
                        "+ New"
                    </Button>
                </nav>

                <div class="grid grid-cols-2 gap-3">
                    <Card class="gap-1 py-3">
                        <CardContent class="px-4">
                            <CardDescription>"Items"</CardDescription>
                            <div class="text-xl font-semibold">{move || stats.get().total_items}</div>
                        </CardContent>
                    </Card>
                    <Card class="gap-1 py-3">
                        <CardContent class="px-4">
                            <CardDescription>"Total"</CardDescription>
                            <div class="text-xl font-semibold text-[var(--theme-color)]">
                                {move || stats.get().total_price}
                            </div>
                        </CardContent>
                    </Card>
                </div>

                <div class="flex items-center gap-2">
                    <Input
                        bind_value=search
                        r#type="search"
                        placeholder="Search by name or memo"
                        class="h-9 flex-1 border-border bg-background"
                    />
                    <Button variant=ButtonVariant::Gradient on:click=open_new_item>
                        "+ Add item"
                    </Button>
                </div>

                {move || match grid.get() {
                    ItemGrid::NoCollection => view! {
                        <p class="py-12 text-center text-sm text-muted-foreground">
                            "Create a collection to get started"
                        </p>
                    }
                    .into_any(),
                    ItemGrid::Loading => view! {
                        <div class="flex justify-center py-12 text-muted-foreground">
                            <Spinner label="Loading items" class="size-6" />
                        </div>
                    }
                    .into_any(),
                    ItemGrid::Empty => view! {
                        <p class="py-12 text-center text-sm text-muted-foreground">
                            {EMPTY_GRID_MESSAGE}
                        </p>
                    }
                    .into_any(),
                    ItemGrid::Cards(cards) => view! {
                        <div class="grid grid-cols-2 gap-3 md:grid-cols-3">
                            {cards
                                .into_iter()
                                .map(|card| view! { <ItemCardView card=card on_open=show_detail on_edit=edit_item /> })
                                .collect_view()}
                        </div>
                    }
                    .into_any(),
                }}
            </main>

            <CollectionModal form=collection_form />
            <ItemModal form=item_form />
            <DetailModal item_id=detail_id />
            <SettingsModal open=settings_open />
        </div>
    }
}

#[component]
fn ItemCardView(card: ItemCard, on_open: Callback<ItemId>, on_edit: Callback<ItemId>) -> impl IntoView {
    let id = card.id;
    let name = card.name;
    let tooltip = name.clone();

    let image = match card.image {
        CardImage::Photo(src) => view! {
            <img src=src alt=name.clone() loading="lazy" class="h-full w-full object-cover" />
        }
        .into_any(),
        CardImage::Placeholder => view! {
            <span class="text-4xl">{PLACEHOLDER_GLYPH}</span>
        }
        .into_any(),
    };

    view! {
        <div
            data-name="ItemCard"
            class="group relative cursor-pointer overflow-hidden rounded-xl border border-border bg-card shadow-xs transition hover:shadow-md"
            on:click=move |_| on_open.run(id)
        >
            <div class="flex aspect-square items-center justify-center bg-muted">{image}</div>
            <div class="space-y-0.5 px-3 py-2">
                <div class="truncate text-sm font-medium" title=tooltip>
                    {name}
                </div>
                {card.price_label.map(|price| view! {
                    <div class="text-xs font-semibold text-[var(--theme-color)]">{price}</div>
                })}
            </div>
            <button
                type="button"
                class="absolute top-2 right-2 rounded-full bg-background/80 px-2 py-0.5 text-xs shadow-xs hover:bg-background"
                title="Edit item"
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    on_edit.run(id);
                }
            >
                "✎"
            </button>
        </div>
    }
}
