use crate::models::{
    Collection, CollectionId, CollectionPayload, Item, ItemId, ItemPayload, PendingImage,
};
use crate::util::{data_url, date_input_value, resolve_image_url};

pub(crate) const FILE_LABEL_DEFAULT: &str = "Select image";
pub(crate) const FILE_LABEL_REPLACE: &str = "Change image";
const FILE_LABEL_MAX_CHARS: usize = 20;

/// Create/edit state for the collection modal. `id == None` means create.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CollectionForm {
    pub id: Option<CollectionId>,
    pub name: String,
    pub description: String,
}

impl CollectionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(collection: &Collection) -> Self {
        Self {
            id: Some(collection.id),
            name: collection.name.clone(),
            description: collection.description.clone().unwrap_or_default(),
        }
    }

    /// Delete is only offered for an existing collection.
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit collection"
        } else {
            "New collection"
        }
    }

    pub fn payload(&self) -> CollectionPayload {
        CollectionPayload {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ItemForm {
    pub id: Option<ItemId>,
    pub name: String,
    /// `YYYY-MM-DD` as held by the date input; empty when unset.
    pub purchase_date: String,
    /// Raw text of the price input.
    pub price: String,
    pub memo: String,

    /// URL already stored on the server (edit mode, or a previous upload).
    pub stored_image_url: Option<String>,
    /// Newly chosen file, uploaded on save.
    pub pending_image: Option<PendingImage>,
    /// A chosen file is still being read into `pending_image`.
    pub image_reading: bool,

    pub preview_src: Option<String>,
    pub file_label: String,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            purchase_date: String::new(),
            price: String::new(),
            memo: String::new(),
            stored_image_url: None,
            pending_image: None,
            image_reading: false,
            preview_src: None,
            file_label: FILE_LABEL_DEFAULT.to_string(),
        }
    }
}

impl ItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(item: &Item, api_host: &str) -> Self {
        let stored_image_url = item.image_url.clone().filter(|u| !u.trim().is_empty());
        let preview_src = stored_image_url
            .as_deref()
            .map(|u| resolve_image_url(api_host, u));
        let file_label = if stored_image_url.is_some() {
            FILE_LABEL_REPLACE
        } else {
            FILE_LABEL_DEFAULT
        };

        Self {
            id: Some(item.id),
            name: item.name.clone(),
            purchase_date: item
                .purchase_date
                .as_deref()
                .map(date_input_value)
                .unwrap_or_default(),
            price: item.price.map(|p| p.to_string()).unwrap_or_default(),
            memo: item.memo.clone().unwrap_or_default(),
            stored_image_url,
            pending_image: None,
            image_reading: false,
            preview_src,
            file_label: file_label.to_string(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit item"
        } else {
            "New item"
        }
    }

    /// A file was chosen; its bytes arrive later through `attach_image`.
    pub fn begin_image_read(&mut self, file_name: &str) {
        self.image_reading = true;
        self.file_label = truncate_file_label(file_name);
    }

    /// Stage a chosen file: preview it locally, upload only on save.
    pub fn attach_image(&mut self, image: PendingImage) {
        self.image_reading = false;
        self.preview_src = Some(data_url(&image.mime, &image.bytes));
        self.file_label = truncate_file_label(&image.file_name);
        self.pending_image = Some(image);
    }

    /// The file input was cleared. The preview keeps whatever is still
    /// going to be saved.
    pub fn clear_image_choice(&mut self, api_host: &str) {
        self.image_reading = false;
        self.pending_image = None;
        self.file_label = FILE_LABEL_DEFAULT.to_string();
        self.preview_src = self
            .stored_image_url
            .as_deref()
            .map(|u| resolve_image_url(api_host, u));
    }

    /// An upload finished; later retries reuse it instead of uploading again.
    pub fn mark_uploaded(&mut self, image_url: String) {
        self.stored_image_url = Some(image_url);
        self.pending_image = None;
    }

    pub fn payload(&self, collection_id: CollectionId, image_url: Option<String>) -> ItemPayload {
        ItemPayload {
            collection_id,
            name: self.name.clone(),
            image_url,
            purchase_date: non_empty(&self.purchase_date),
            price: parse_price(&self.price),
            memo: non_empty(&self.memo),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Lenient price parsing: the longest leading decimal number wins
/// (`"150円"` -> 150). Empty or non-numeric input is `None`.
pub(crate) fn parse_price(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Long file names are cut to 20 characters plus an ellipsis.
pub(crate) fn truncate_file_label(file_name: &str) -> String {
    if file_name.chars().count() > FILE_LABEL_MAX_CHARS {
        let head: String = file_name.chars().take(FILE_LABEL_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        file_name.to_string()
    }
}
