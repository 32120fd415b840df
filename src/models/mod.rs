use serde::{Deserialize, Serialize};

pub(crate) type CollectionId = i64;
pub(crate) type ItemId = i64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Collection {
    pub id: CollectionId,
    pub name: String,
    /// The backend stores an empty string when no description was given.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Item {
    pub id: ItemId,
    pub collection_id: CollectionId,
    pub name: String,

    /// Relative path on the API host (e.g. `/uploads/1700000000.jpg`).
    #[serde(default)]
    pub image_url: Option<String>,

    /// `YYYY-MM-DD` or a full timestamp, depending on the backend driver.
    #[serde(default)]
    pub purchase_date: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Stats {
    pub total_items: u64,
    pub total_price: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct CollectionPayload {
    pub name: String,
    pub description: String,
}

/// Body for `POST /items` and `PUT /items/{id}`.
///
/// Optional fields serialize as explicit `null`; the backend overwrites every
/// column on update.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct ItemPayload {
    pub collection_id: CollectionId,
    pub name: String,
    pub image_url: Option<String>,
    pub purchase_date: Option<String>,
    pub price: Option<f64>,
    pub memo: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UploadResponse {
    pub image_url: String,
}

/// A file chosen in the item form that has not been uploaded yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_contract_deserialize_with_nulls() {
        let json = r#"{
            "id": 7,
            "collection_id": 2,
            "name": "Pen",
            "image_url": null,
            "purchase_date": "2024-03-01T00:00:00Z",
            "price": 150,
            "memo": null,
            "created_at": "2024-03-02T10:00:00Z",
            "updated_at": "2024-03-02T10:00:00Z"
        }"#;
        let item: Item = serde_json::from_str(json).expect("item should parse");
        assert_eq!(item.id, 7);
        assert_eq!(item.collection_id, 2);
        assert_eq!(item.price, Some(150.0));
        assert!(item.image_url.is_none());
        assert!(item.memo.is_none());
    }

    #[test]
    fn test_collection_contract_deserialize_minimal() {
        let parsed: Collection =
            serde_json::from_str(r#"{"id": 1, "name": "Books"}"#).expect("collection should parse");
        assert_eq!(parsed.name, "Books");
        assert!(parsed.description.is_none());
    }

    #[test]
    fn test_item_payload_serializes_explicit_nulls() {
        let payload = ItemPayload {
            collection_id: 3,
            name: "Pen".to_string(),
            image_url: None,
            purchase_date: None,
            price: Some(150.0),
            memo: None,
        };
        let v = serde_json::to_value(payload).expect("should serialize");
        assert_eq!(v["collection_id"], 3);
        assert!(v["image_url"].is_null());
        assert!(v.as_object().is_some_and(|o| o.contains_key("memo")));
        assert_eq!(v["price"], 150.0);
    }

    #[test]
    fn test_stats_contract_deserialize() {
        let stats: Stats = serde_json::from_str(r#"{"total_items": 3, "total_price": 1234.5}"#)
            .expect("stats should parse");
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_price, 1234.5);
    }
}
