//! Catalog operations: every user action that talks to the backend.
//!
//! The controller owns no view state of its own. It reads and writes
//! [`CatalogState`] through a [`StateStore`], so the same code drives the
//! Leptos signal in the browser and a plain cell in tests.

use crate::api::{ApiError, ApiResult, CatalogApi};
use crate::forms::{CollectionForm, ItemForm};
use crate::models::{CollectionId, ItemId, PendingImage};
use crate::state::catalog::{CatalogState, StateStore};
use leptos::logging::{error, log, warn};


#[derive(Clone, Debug, thiserror::Error)]
pub(crate) enum SaveItemError {
    #[error("Select a collection first")]
    NoCollection,
    #[error("The selected image is still loading")]
    ImageNotReady,
    #[error("Image upload failed: {0}")]
    Upload(ApiError),
    #[error("Save failed: {0}")]
    Save(ApiError),
}

#[derive(Clone)]
pub(crate) struct CatalogController<A, S> {
    api: A,
    store: S,
}

impl<A, S> CatalogController<A, S>
where
    A: CatalogApi + Clone,
    S: StateStore,
{
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    pub fn current_collection_id(&self) -> Option<CollectionId> {
        self.store.read_state(|s| s.current_collection_id)
    }

    /// Fetch the collection list. Failures are logged and leave the previous
    /// list on screen.
    pub async fn load_collections(&self) {
        let request_id = self.store.update_state(CatalogState::begin_collections_request);

        let list = match self.api.list_collections().await {
            Ok(list) => list,
            Err(e) => {
                error!("[catalog] load collections failed: {e}");
                return;
            }
        };

        let applied = self
            .store
            .update_state(|s| s.finish_collections_request(request_id, list));
        if !applied {
            log!("[catalog] stale collections response {request_id} ignored");
            return;
        }

        if let Some(first) = self.store.read_state(CatalogState::auto_selection) {
            self.select_collection(first).await;
        }
    }

    /// Select a collection, then refresh its items and stats. Unknown ids are
    /// not rejected; the backend simply returns nothing for them.
    pub async fn select_collection(&self, id: CollectionId) {
        self.store.update_state(|s| s.select(id));
        self.load_items().await;
        self.load_stats().await;
    }

    pub async fn load_items(&self) {
        let Some(ticket) = self.store.update_state(CatalogState::begin_items_request) else {
            return;
        };

        match self.api.list_items(ticket.collection_id).await {
            Ok(items) => {
                let applied = self
                    .store
                    .update_state(|s| s.finish_items_request(ticket, items));
                if !applied {
                    log!(
                        "[catalog] stale items response for collection {} ignored",
                        ticket.collection_id
                    );
                }
            }
            Err(e) => {
                error!(
                    "[catalog] load items for collection {} failed: {e}",
                    ticket.collection_id
                );
                self.store.update_state(|s| s.fail_items_request(ticket));
            }
        }
    }

    pub async fn load_stats(&self) {
        let Some(ticket) = self.store.update_state(CatalogState::begin_stats_request) else {
            return;
        };

        match self.api.collection_stats(ticket.collection_id).await {
            Ok(stats) => {
                let applied = self
                    .store
                    .update_state(|s| s.finish_stats_request(ticket, stats));
                if !applied {
                    log!(
                        "[catalog] stale stats response for collection {} ignored",
                        ticket.collection_id
                    );
                }
            }
            Err(e) => error!(
                "[catalog] load stats for collection {} failed: {e}",
                ticket.collection_id
            ),
        }
    }

    pub fn set_search_query(&self, query: String) {
        self.store.update_state(|s| s.search_query = query);
    }

    /// Pre-filled edit form, or `None` for an id that is not loaded.
    pub fn collection_edit_form(&self, id: CollectionId) -> Option<CollectionForm> {
        self.store
            .read_state(|s| s.find_collection(id).map(CollectionForm::edit))
    }

    /// Create or update, then reload the list.
    pub async fn save_collection(&self, form: &CollectionForm) -> ApiResult<()> {
        let payload = form.payload();
        let result = match form.id {
            Some(id) => self.api.update_collection(id, &payload).await,
            None => self.api.create_collection(&payload).await,
        };

        if let Err(e) = result {
            error!("[catalog] save collection failed: {e}");
            return Err(e);
        }

        self.load_collections().await;
        Ok(())
    }

    /// Delete a collection (the backend removes its items too). Callers must
    /// have obtained user confirmation.
    pub async fn delete_collection(&self, id: CollectionId) -> ApiResult<()> {
        if let Err(e) = self.api.delete_collection(id).await {
            error!("[catalog] delete collection {id} failed: {e}");
            return Err(e);
        }

        self.store.update_state(|s| s.clear_selection_if(id));
        self.load_collections().await;
        Ok(())
    }

    pub fn new_item_form(&self) -> Result<ItemForm, SaveItemError> {
        if self.current_collection_id().is_none() {
            return Err(SaveItemError::NoCollection);
        }
        Ok(ItemForm::new())
    }

    /// Pre-filled edit form from the loaded list; never refetched.
    pub fn item_edit_form(&self, id: ItemId, api_host: &str) -> Option<ItemForm> {
        self.store
            .read_state(|s| s.find_item(id).map(|item| ItemForm::edit(item, api_host)))
    }

    pub async fn upload_image(&self, image: &PendingImage) -> ApiResult<String> {
        self.api.upload_image(image).await.inspect_err(|e| {
            error!("[catalog] upload of {} failed: {e}", image.file_name);
        })
    }

    /// Upload a pending image first (aborting on failure), then create or
    /// update the item and refresh items and stats. Refused while a chosen
    /// file is still being read.
    ///
    /// A successful upload is recorded on `form` before the item request, so
    /// retrying after a failed save does not upload the file again.
    pub async fn save_item(&self, form: &mut ItemForm) -> Result<(), SaveItemError> {
        let Some(collection_id) = self.current_collection_id() else {
            return Err(SaveItemError::NoCollection);
        };
        if form.image_reading {
            return Err(SaveItemError::ImageNotReady);
        }

        let mut uploaded = None;
        if let Some(image) = form.pending_image.clone() {
            let url = self
                .upload_image(&image)
                .await
                .map_err(SaveItemError::Upload)?;
            form.mark_uploaded(url.clone());
            uploaded = Some(url);
        }

        let payload = form.payload(collection_id, form.stored_image_url.clone());
        let result = match form.id {
            Some(id) => self.api.update_item(id, &payload).await,
            None => self.api.create_item(&payload).await,
        };

        if let Err(e) = result {
            error!("[catalog] save item failed: {e}");
            if let Some(url) = uploaded {
                warn!("[catalog] uploaded image {url} is not referenced by any item yet");
            }
            return Err(SaveItemError::Save(e));
        }

        self.load_items().await;
        self.load_stats().await;
        Ok(())
    }

    /// Callers must have obtained user confirmation.
    pub async fn delete_item(&self, id: ItemId) -> ApiResult<()> {
        if let Err(e) = self.api.delete_item(id).await {
            error!("[catalog] delete item {id} failed: {e}");
            return Err(e);
        }

        self.load_items().await;
        self.load_stats().await;
        Ok(())
    }
}
