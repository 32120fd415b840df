use crate::models::{
    Collection, CollectionId, CollectionPayload, Item, ItemId, ItemPayload, PendingImage, Stats,
    UploadResponse,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub(crate) const LOCAL_API_HOST: &str = "http://localhost:8080";
pub(crate) const REMOTE_API_HOST: &str = "https://collection-api-ljag.onrender.com";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: e.to_string(),
        }
    }

    /// Non-2xx response. The message is the status reason text, which is what
    /// the user sees in the alert.
    pub(crate) fn http(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));

        Self {
            kind: ApiErrorKind::Http,
            status: Some(status),
            message: reason,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_host: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let hostname = web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default();
        Self::for_hostname(&hostname)
    }

    /// The development server is only reachable from a page served on `localhost`.
    pub fn for_hostname(hostname: &str) -> Self {
        let api_host = if hostname == "localhost" {
            LOCAL_API_HOST
        } else {
            REMOTE_API_HOST
        };
        Self {
            api_host: api_host.to_string(),
        }
    }

    pub fn api_base(&self) -> String {
        format!("{}/api", self.api_host)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the catalog needs from the backend.
pub(crate) trait CatalogApi {
    async fn list_collections(&self) -> ApiResult<Vec<Collection>>;
    async fn create_collection(&self, payload: &CollectionPayload) -> ApiResult<()>;
    async fn update_collection(&self, id: CollectionId, payload: &CollectionPayload)
        -> ApiResult<()>;
    async fn delete_collection(&self, id: CollectionId) -> ApiResult<()>;

    async fn list_items(&self, collection_id: CollectionId) -> ApiResult<Vec<Item>>;
    async fn collection_stats(&self, collection_id: CollectionId) -> ApiResult<Stats>;
    async fn create_item(&self, payload: &ItemPayload) -> ApiResult<()>;
    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> ApiResult<()>;
    async fn delete_item(&self, id: ItemId) -> ApiResult<()>;

    /// Returns the server-assigned image URL.
    async fn upload_image(&self, image: &PendingImage) -> ApiResult<String>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.api_base())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;
        if res.status().is_success() {
            Ok(res)
        } else {
            Err(ApiError::http(res.status().as_u16()))
        }
    }

    async fn request_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ApiResult<T> {
        let res = Self::send(req).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// Mutations answer with `{message, status}` or the stored row; only the
    /// status code matters to the client.
    async fn request_ok(&self, req: reqwest::RequestBuilder) -> ApiResult<()> {
        Self::send(req).await.map(|_| ())
    }
}

impl CatalogApi for ApiClient {
    async fn list_collections(&self) -> ApiResult<Vec<Collection>> {
        let client = reqwest::Client::new();
        self.request_json(client.get(self.url("/collections"))).await
    }

    async fn create_collection(&self, payload: &CollectionPayload) -> ApiResult<()> {
        let client = reqwest::Client::new();
        self.request_ok(client.post(self.url("/collections")).json(payload))
            .await
    }

    async fn update_collection(
        &self,
        id: CollectionId,
        payload: &CollectionPayload,
    ) -> ApiResult<()> {
        let client = reqwest::Client::new();
        self.request_ok(client.put(self.url(&format!("/collections/{id}"))).json(payload))
            .await
    }

    async fn delete_collection(&self, id: CollectionId) -> ApiResult<()> {
        let client = reqwest::Client::new();
        self.request_ok(client.delete(self.url(&format!("/collections/{id}"))))
            .await
    }

    async fn list_items(&self, collection_id: CollectionId) -> ApiResult<Vec<Item>> {
        let client = reqwest::Client::new();
        self.request_json(client.get(self.url(&format!("/collections/{collection_id}/items"))))
            .await
    }

    async fn collection_stats(&self, collection_id: CollectionId) -> ApiResult<Stats> {
        let client = reqwest::Client::new();
        self.request_json(client.get(self.url(&format!("/collections/{collection_id}/stats"))))
            .await
    }

    async fn create_item(&self, payload: &ItemPayload) -> ApiResult<()> {
        let client = reqwest::Client::new();
        self.request_ok(client.post(self.url("/items")).json(payload))
            .await
    }

    async fn update_item(&self, id: ItemId, payload: &ItemPayload) -> ApiResult<()> {
        let client = reqwest::Client::new();
        self.request_ok(client.put(self.url(&format!("/items/{id}"))).json(payload))
            .await
    }

    async fn delete_item(&self, id: ItemId) -> ApiResult<()> {
        let client = reqwest::Client::new();
        self.request_ok(client.delete(self.url(&format!("/items/{id}"))))
            .await
    }

    async fn upload_image(&self, image: &PendingImage) -> ApiResult<String> {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(ApiError::parse)?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let client = reqwest::Client::new();
        let data: UploadResponse = self
            .request_json(client.post(self.url("/upload")).multipart(form))
            .await?;
        Ok(data.image_url)
    }
}
