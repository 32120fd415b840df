use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Input, Label, Modal, ModalFooter, ModalHeader, ModalTitle,
    Spinner, Textarea,
};
use crate::forms::{CollectionForm, ItemForm};
use crate::models::ItemId;
use crate::state::AppContext;
use crate::theme::{color_swatches, ThemeMode};
use crate::util::browser::{alert, confirm, read_file, selected_file};
use crate::view::item_detail;
use icons::Check;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

#[component]
pub(crate) fn CollectionModal(form: RwSignal<Option<CollectionForm>>) -> impl IntoView {
    let app = StoredValue::new(expect_context::<AppContext>().0);

    let name: RwSignal<String> = RwSignal::new(String::new());
    let description: RwSignal<String> = RwSignal::new(String::new());
    let busy: RwSignal<bool> = RwSignal::new(false);

    Effect::new(move |_| {
        if let Some(f) = form.get() {
            name.set(f.name);
            description.set(f.description);
            busy.set(false);
        }
    });

    let close = Callback::new(move |_| form.set(None));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mut draft) = form.get_untracked() else {
            return;
        };
        draft.name = name.get_untracked();
        draft.description = description.get_untracked();

        busy.set(true);
        let catalog = app.with_value(|a| a.catalog.clone());
        spawn_local(async move {
            match catalog.save_collection(&draft).await {
                Ok(()) => form.set(None),
                Err(e) => alert(&format!("Save failed: {e}")),
            }
            busy.set(false);
        });
    };

    let on_delete = move |_| {
        let Some(id) = form.with_untracked(|f| f.as_ref().and_then(|f| f.id)) else {
            return;
        };
        let label = app
            .with_value(|a| {
                a.catalog_state
                    .with_untracked(|s| s.find_collection(id).map(|c| c.name.clone()))
            })
            .unwrap_or_default();
        if !confirm(&format!(
            "Delete collection \"{label}\"?\nAll items in this collection will be deleted too."
        )) {
            return;
        }

        busy.set(true);
        let catalog = app.with_value(|a| a.catalog.clone());
        spawn_local(async move {
            match catalog.delete_collection(id).await {
                Ok(()) => form.set(None),
                Err(e) => alert(&format!("Delete failed: {e}")),
            }
            busy.set(false);
        });
    };

    view! {
        <Modal open=Signal::derive(move || form.with(Option::is_some)) on_close=close>
            <ModalHeader>
                <ModalTitle>
                    {move || form.with(|f| f.as_ref().map(CollectionForm::title).unwrap_or_default())}
                </ModalTitle>
            </ModalHeader>

            <form class="space-y-3" on:submit=on_submit>
                <div class="space-y-1">
                    <Label html_for="collection-name" required=true>"Name"</Label>
                    <Input
                        id="collection-name"
                        bind_value=name
                        required=true
                        autofocus=true
                        class="h-9 border-border bg-background"
                    />
                </div>
                <div class="space-y-1">
                    <Label html_for="collection-description">"Description"</Label>
                    <Textarea
                        id="collection-description"
                        bind_value=description
                        class="border-border bg-background"
                    />
                </div>

                <ModalFooter>
                    <div>
                        <Show
                            when=move || form.with(|f| f.as_ref().is_some_and(CollectionForm::is_edit))
                            fallback=|| ().into_view()
                        >
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:r#type="button"
                                attr:disabled=move || busy.get()
                                on:click=on_delete
                            >
                                "Delete"
                            </Button>
                        </Show>
                    </div>
                    <div class="flex items-center gap-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:r#type="button"
                            attr:disabled=move || busy.get()
                            on:click=move |_| form.set(None)
                        >
                            "Cancel"
                        </Button>
                        <Button size=ButtonSize::Sm attr:disabled=move || busy.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || busy.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                "Save"
                            </span>
                        </Button>
                    </div>
                </ModalFooter>
            </form>
        </Modal>
    }
}

#[component]
pub(crate) fn ItemModal(form: RwSignal<Option<ItemForm>>) -> impl IntoView {
    let app = StoredValue::new(expect_context::<AppContext>().0);

    let name: RwSignal<String> = RwSignal::new(String::new());
    let purchase_date: RwSignal<String> = RwSignal::new(String::new());
    let price: RwSignal<String> = RwSignal::new(String::new());
    let memo: RwSignal<String> = RwSignal::new(String::new());
    let saving: RwSignal<bool> = RwSignal::new(false);

    // Image changes rewrite the form while it is open; only (re)opening
    // should reset the text fields.
    let opened = Memo::new(move |_| form.with(|f| f.as_ref().map(|f| f.id)));
    Effect::new(move |_| {
        if opened.get().is_none() {
            return;
        }
        form.with_untracked(|f| {
            if let Some(f) = f {
                name.set(f.name.clone());
                purchase_date.set(f.purchase_date.clone());
                price.set(f.price.clone());
                memo.set(f.memo.clone());
            }
        });
        saving.set(false);
    });

    let close = Callback::new(move |_| form.set(None));

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            let host = app.with_value(|a| a.api_host().to_string());
            form.update(|f| {
                if let Some(f) = f {
                    f.clear_image_choice(&host);
                }
            });
            return;
        };

        form.update(|f| {
            if let Some(f) = f {
                f.begin_image_read(&file.name());
            }
        });

        spawn_local(async move {
            match read_file(&file).await {
                Ok(image) => form.update(|f| {
                    // The dialog may have been closed or the choice cleared meanwhile.
                    if let Some(f) = f.as_mut().filter(|f| f.image_reading) {
                        f.attach_image(image);
                    }
                }),
                Err(e) => {
                    warn!("[catalog] reading {} failed: {e}", file.name());
                    let host = app.with_value(|a| a.api_host().to_string());
                    form.update(|f| {
                        if let Some(f) = f {
                            f.clear_image_choice(&host);
                        }
                    });
                    alert("Could not read the selected image");
                }
            }
        });
    };

    let image_reading = move || form.with(|f| f.as_ref().is_some_and(|f| f.image_reading));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mut draft) = form.get_untracked() else {
            return;
        };
        draft.name = name.get_untracked();
        draft.purchase_date = purchase_date.get_untracked();
        draft.price = price.get_untracked();
        draft.memo = memo.get_untracked();

        saving.set(true);
        let catalog = app.with_value(|a| a.catalog.clone());
        spawn_local(async move {
            match catalog.save_item(&mut draft).await {
                Ok(()) => form.set(None),
                Err(e) => {
                    // Keep a finished upload so the retry does not send the file again.
                    form.update(|f| {
                        if let Some(f) = f.as_mut().filter(|f| f.id == draft.id) {
                            if let Some(url) = draft.stored_image_url.clone() {
                                if f.stored_image_url.as_deref() != Some(url.as_str()) {
                                    f.mark_uploaded(url);
                                }
                            }
                        }
                    });
                    alert(&e.to_string());
                }
            }
            saving.set(false);
        });
    };

    let on_delete = move |_| {
        let Some(id) = form.with_untracked(|f| f.as_ref().and_then(|f| f.id)) else {
            return;
        };
        let label = name.get_untracked();
        if !confirm(&format!("Delete \"{label}\"?")) {
            return;
        }

        saving.set(true);
        let catalog = app.with_value(|a| a.catalog.clone());
        spawn_local(async move {
            match catalog.delete_item(id).await {
                Ok(()) => form.set(None),
                Err(e) => alert(&format!("Delete failed: {e}")),
            }
            saving.set(false);
        });
    };

    view! {
        <Modal open=Signal::derive(move || form.with(Option::is_some)) on_close=close>
            <ModalHeader>
                <ModalTitle>
                    {move || form.with(|f| f.as_ref().map(ItemForm::title).unwrap_or_default())}
                </ModalTitle>
            </ModalHeader>

            <form class="space-y-3" on:submit=on_submit>
                <div class="space-y-1">
                    <Label>"Photo"</Label>
                    <label
                        for="item-image"
                        class="flex h-9 cursor-pointer items-center justify-center rounded-md border border-dashed border-border px-3 text-sm text-muted-foreground hover:bg-border/30"
                    >
                        {move || form.with(|f| f.as_ref().map(|f| f.file_label.clone()).unwrap_or_default())}
                    </label>
                    <input
                        id="item-image"
                        type="file"
                        accept="image/*"
                        class="hidden"
                        disabled=move || saving.get()
                        on:change=on_file
                    />
                    {move || {
                        form.with(|f| f.as_ref().and_then(|f| f.preview_src.clone()))
                            .map(|src| view! {
                                <img src=src alt="" class="mt-2 max-h-48 w-full rounded-md object-contain" />
                            })
                    }}
                </div>

                <div class="space-y-1">
                    <Label html_for="item-name" required=true>"Name"</Label>
                    <Input id="item-name" bind_value=name required=true class="h-9 border-border bg-background" />
                </div>

                <div class="grid grid-cols-2 gap-3">
                    <div class="space-y-1">
                        <Label html_for="item-date">"Purchase date"</Label>
                        <Input
                            id="item-date"
                            r#type="date"
                            bind_value=purchase_date
                            class="h-9 border-border bg-background"
                        />
                    </div>
                    <div class="space-y-1">
                        <Label html_for="item-price">"Price"</Label>
                        <Input
                            id="item-price"
                            r#type="number"
                            step="any"
                            placeholder="0"
                            bind_value=price
                            class="h-9 border-border bg-background"
                        />
                    </div>
                </div>

                <div class="space-y-1">
                    <Label html_for="item-memo">"Memo"</Label>
                    <Textarea id="item-memo" bind_value=memo class="border-border bg-background" />
                </div>

                <ModalFooter>
                    <div>
                        <Show
                            when=move || form.with(|f| f.as_ref().is_some_and(ItemForm::is_edit))
                            fallback=|| ().into_view()
                        >
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:r#type="button"
                                attr:disabled=move || saving.get()
                                on:click=on_delete
                            >
                                "Delete"
                            </Button>
                        </Show>
                    </div>
                    <div class="flex items-center gap-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:r#type="button"
                            attr:disabled=move || saving.get()
                            on:click=move |_| form.set(None)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            attr:disabled=move || saving.get() || image_reading()
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || saving.get() || image_reading() fallback=|| ().into_view()>
                                    <Spinner label="Saving" />
                                </Show>
                                {move || if saving.get() { "Saving..." } else { "Save" }}
                            </span>
                        </Button>
                    </div>
                </ModalFooter>
            </form>
        </Modal>
    }
}

#[component]
pub(crate) fn DetailModal(item_id: RwSignal<Option<ItemId>>) -> impl IntoView {
    let app = StoredValue::new(expect_context::<AppContext>().0);

    let detail = Memo::new(move |_| {
        let id = item_id.get()?;
        app.with_value(|a| a.catalog_state.with(|s| item_detail(s, id, a.api_host())))
    });

    let close = Callback::new(move |_| item_id.set(None));

    view! {
        <Modal open=Signal::derive(move || detail.with(Option::is_some)) on_close=close>
            {move || detail.get().map(|d| view! {
                {d.image_url.map(|src| view! {
                    <img src=src alt=d.name.clone() class="mb-4 max-h-64 w-full rounded-lg object-contain" />
                })}
                <ModalHeader>
                    <ModalTitle>{d.name.clone()}</ModalTitle>
                </ModalHeader>
                <dl class="grid grid-cols-[auto_1fr] gap-x-4 gap-y-2 text-sm">
                    <dt class="text-muted-foreground">"Purchase date"</dt>
                    <dd>{d.purchase_date}</dd>
                    <dt class="text-muted-foreground">"Price"</dt>
                    <dd class="font-semibold text-[var(--theme-color)]">{d.price}</dd>
                    <dt class="text-muted-foreground">"Memo"</dt>
                    <dd class="whitespace-pre-wrap">{d.memo}</dd>
                </dl>
            })}
        </Modal>
    }
}

#[component]
pub(crate) fn SettingsModal(open: RwSignal<bool>) -> impl IntoView {
    let app = StoredValue::new(expect_context::<AppContext>().0);
    let theme = app.with_value(|a| a.theme);

    let close = Callback::new(move |_| open.set(false));

    view! {
        <Modal open=open on_close=close>
            <ModalHeader>
                <ModalTitle>"Settings"</ModalTitle>
            </ModalHeader>

            <div class="space-y-4">
                <div class="space-y-2">
                    <Label>"Theme"</Label>
                    <div class="flex gap-2">
                        {move || {
                            let active = theme.get().mode;
                            ThemeMode::iter()
                                .map(|mode| {
                                    let label = match mode {
                                        ThemeMode::Light => "Light",
                                        ThemeMode::Dark => "Dark",
                                    };
                                    let variant = if mode == active {
                                        ButtonVariant::Default
                                    } else {
                                        ButtonVariant::Outline
                                    };
                                    view! {
                                        <Button
                                            variant=variant
                                            size=ButtonSize::Sm
                                            class="flex-1"
                                            on:click=move |_| app.with_value(|a| a.set_theme_mode(mode))
                                        >
                                            {label}
                                        </Button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>

                <div class="space-y-2">
                    <Label>"Color"</Label>
                    <div class="flex flex-wrap gap-3">
                        {move || {
                            color_swatches(theme.get().color)
                                .into_iter()
                                .map(|swatch| {
                                    let color = swatch.color;
                                    let ring = if swatch.active { "ring-2 ring-offset-2 ring-foreground" } else { "" };
                                    view! {
                                        <button
                                            type="button"
                                            title=swatch.palette.label
                                            class=format!("flex size-9 items-center justify-center rounded-full text-white shadow-xs transition hover:scale-105 {ring}")
                                            style=format!("background: {}", swatch.palette.gradient)
                                            on:click=move |_| app.with_value(|a| a.set_theme_color(color))
                                        >
                                            {swatch.active.then(|| view! { <Check /> })}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>
        </Modal>
    }
}
