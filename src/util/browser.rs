//! Thin wrappers over browser APIs used by event handlers.

use crate::models::PendingImage;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Blocking modal alert. Used for every failed user-initiated mutation.
pub(crate) fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// First file selected in an `<input type="file">` change event.
pub(crate) fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

pub(crate) async fn read_file(file: &web_sys::File) -> Result<PendingImage, String> {
    let buf = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();

    Ok(PendingImage {
        file_name: file.name(),
        mime: file.type_(),
        bytes,
    })
}
