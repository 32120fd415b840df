//! State -> render instructions. Nothing here touches the DOM.

use crate::models::{CollectionId, ItemId};
use crate::state::catalog::CatalogState;
use crate::util::{format_price, format_purchase_date, resolve_image_url};

pub(crate) const PLACEHOLDER_GLYPH: &str = "📦";
pub(crate) const EMPTY_GRID_MESSAGE: &str = "No items yet";
pub(crate) const NO_MEMO: &str = "No memo";
const MISSING: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CollectionTab {
    pub id: CollectionId,
    pub name: String,
    pub active: bool,
}

pub(crate) fn collection_tabs(state: &CatalogState) -> Vec<CollectionTab> {
    state
        .collections
        .iter()
        .map(|c| CollectionTab {
            id: c.id,
            name: c.name.clone(),
            active: state.current_collection_id == Some(c.id),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CardImage {
    Photo(String),
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ItemCard {
    pub id: ItemId,
    /// Rendered truncated; the full value also goes into the tooltip.
    pub name: String,
    pub image: CardImage,
    pub price_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ItemGrid {
    NoCollection,
    Loading,
    Empty,
    Cards(Vec<ItemCard>),
}

fn card_image(api_host: &str, image_url: Option<&str>) -> CardImage {
    match image_url.filter(|u| !u.trim().is_empty()) {
        Some(url) => CardImage::Photo(resolve_image_url(api_host, url)),
        None => CardImage::Placeholder,
    }
}

/// The grid for the current selection, narrowed by the search query.
pub(crate) fn item_grid(state: &CatalogState, api_host: &str) -> ItemGrid {
    let Some(current) = state.current_collection_id else {
        return ItemGrid::NoCollection;
    };
    if state.items_loaded_for != Some(current) {
        if state.items_failed_for == Some(current) {
            return ItemGrid::Empty;
        }
        return ItemGrid::Loading;
    }

    let visible = state.visible_items();
    if visible.is_empty() {
        return ItemGrid::Empty;
    }

    ItemGrid::Cards(
        visible
            .into_iter()
            .map(|item| ItemCard {
                id: item.id,
                name: item.name.clone(),
                image: card_image(api_host, item.image_url.as_deref()),
                price_label: item.price.map(format_price),
            })
            .collect(),
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StatsSummary {
    pub total_items: String,
    pub total_price: String,
}

/// Placeholders until the first stats response for the selection arrives.
pub(crate) fn stats_summary(state: &CatalogState) -> StatsSummary {
    match state.stats {
        Some(stats) => StatsSummary {
            total_items: stats.total_items.to_string(),
            total_price: format_price(stats.total_price),
        },
        None => StatsSummary {
            total_items: MISSING.to_string(),
            total_price: MISSING.to_string(),
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ItemDetail {
    pub id: ItemId,
    pub name: String,
    pub purchase_date: String,
    pub price: String,
    pub memo: String,
    pub image_url: Option<String>,
}

/// Read-only detail panel for a loaded item; `None` if it is not loaded.
pub(crate) fn item_detail(state: &CatalogState, id: ItemId, api_host: &str) -> Option<ItemDetail> {
    let item = state.find_item(id)?;
    Some(ItemDetail {
        id: item.id,
        name: item.name.clone(),
        purchase_date: item
            .purchase_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(format_purchase_date)
            .unwrap_or_else(|| MISSING.to_string()),
        price: item
            .price
            .map(format_price)
            .unwrap_or_else(|| MISSING.to_string()),
        memo: item
            .memo
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| NO_MEMO.to_string()),
        image_url: match card_image(api_host, item.image_url.as_deref()) {
            CardImage::Photo(url) => Some(url),
            CardImage::Placeholder => None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Collection, Item, Stats};

    const HOST: &str = "https://api.example.com";

    fn item(id: ItemId, name: &str) -> Item {
        Item {
            id,
            collection_id: 1,
            name: name.to_string(),
            image_url: None,
            purchase_date: None,
            price: None,
            memo: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(items: Vec<Item>) -> CatalogState {
        let mut state = CatalogState::default();
        state.select(1);
        let ticket = state.begin_items_request().expect("selected");
        state.finish_items_request(ticket, items);
        state
    }

    #[test]
    fn test_collection_tabs_mark_active() {
        let mut state = CatalogState::default();
        for (id, name) in [(1, "Books"), (2, "Stamps")] {
            state.collections.push(Collection {
                id,
                name: name.to_string(),
                description: None,
                created_at: None,
                updated_at: None,
            });
        }
        state.select(2);

        let tabs = collection_tabs(&state);
        assert_eq!(tabs.len(), 2);
        assert!(!tabs[0].active);
        assert!(tabs[1].active);
        assert_eq!(tabs[1].name, "Stamps");
    }

    #[test]
    fn test_item_grid_states() {
        assert_eq!(item_grid(&CatalogState::default(), HOST), ItemGrid::NoCollection);

        let mut selected = CatalogState::default();
        selected.select(1);
        assert_eq!(item_grid(&selected, HOST), ItemGrid::Loading);

        assert_eq!(item_grid(&loaded(vec![]), HOST), ItemGrid::Empty);
    }

    #[test]
    fn test_item_grid_failed_read_is_not_loading() {
        let mut state = CatalogState::default();
        state.select(1);
        let ticket = state.begin_items_request().expect("selected");
        state.fail_items_request(ticket);
        assert_eq!(item_grid(&state, HOST), ItemGrid::Empty);
    }

    #[test]
    fn test_item_card_image_and_price() {
        let mut with_photo = item(1, "Camera");
        with_photo.image_url = Some("/uploads/cam.jpg".to_string());
        with_photo.price = Some(1234.5);
        let state = loaded(vec![with_photo, item(2, "Lens")]);

        let ItemGrid::Cards(cards) = item_grid(&state, HOST) else {
            panic!("expected cards");
        };
        assert_eq!(
            cards[0].image,
            CardImage::Photo("https://api.example.com/uploads/cam.jpg".to_string())
        );
        assert_eq!(cards[0].price_label.as_deref(), Some("¥1,235"));
        assert_eq!(cards[1].image, CardImage::Placeholder);
        assert!(cards[1].price_label.is_none());
    }

    #[test]
    fn test_search_with_no_hits_shows_empty_state() {
        let mut state = loaded(vec![item(1, "Camera")]);
        state.search_query = "tripod".to_string();
        assert_eq!(item_grid(&state, HOST), ItemGrid::Empty);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_stats_summary_formats_total() {
        let mut state = CatalogState::default();
        assert_eq!(stats_summary(&state).total_items, "-");

        state.stats = Some(Stats {
            total_items: 3,
            total_price: 1234.5,
        });
        let summary = stats_summary(&state);
        assert_eq!(summary.total_items, "3");
        assert_eq!(summary.total_price, "¥1,235");
    }

    #[test]
    fn test_item_detail_fallbacks() {
        let state = loaded(vec![item(1, "Camera")]);
        let detail = item_detail(&state, 1, HOST).expect("loaded");
        assert_eq!(detail.purchase_date, "-");
        assert_eq!(detail.price, "-");
        assert_eq!(detail.memo, NO_MEMO);
        assert!(detail.image_url.is_none());

        assert!(item_detail(&state, 99, HOST).is_none());
    }

    #[test]
    fn test_item_detail_formats_fields() {
        let mut full = item(1, "Camera");
        full.purchase_date = Some("2024-01-05T00:00:00Z".to_string());
        full.price = Some(200.75);
        full.memo = Some("mint".to_string());
        let state = loaded(vec![full]);

        let detail = item_detail(&state, 1, HOST).expect("loaded");
        assert_eq!(detail.purchase_date, "2024/1/5");
        assert_eq!(detail.price, "¥201");
        assert_eq!(detail.memo, "mint");
    }
}
