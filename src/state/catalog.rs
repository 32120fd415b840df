use crate::models::{Collection, CollectionId, Item, ItemId, Stats};
use crate::util::contains_ignore_case;
use leptos::prelude::*;

/// A read issued for a specific selection. The response is applied only if
/// no newer read for the same path has been issued since.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ReadTicket {
    pub request_id: u64,
    pub collection_id: CollectionId,
}

/// Everything the catalog view renders from.
#[derive(Clone, Debug, Default)]
pub(crate) struct CatalogState {
    pub collections: Vec<Collection>,
    pub current_collection_id: Option<CollectionId>,

    /// Items of `items_loaded_for`; emptied whenever the selection changes.
    pub items: Vec<Item>,
    pub items_loaded_for: Option<CollectionId>,
    /// Set when the latest items read for this collection failed.
    pub items_failed_for: Option<CollectionId>,

    pub stats: Option<Stats>,

    /// Live search box contents. Never narrows `items` itself.
    pub search_query: String,

    collections_request_id: u64,
    items_request_id: u64,
    stats_request_id: u64,
}

impl CatalogState {
    pub fn begin_collections_request(&mut self) -> u64 {
        self.collections_request_id = self.collections_request_id.saturating_add(1);
        self.collections_request_id
    }

    /// Replace the collection list. A selection that no longer exists is
    /// dropped. Returns `false` for a stale response.
    pub fn finish_collections_request(&mut self, request_id: u64, list: Vec<Collection>) -> bool {
        if request_id != self.collections_request_id {
            return false;
        }

        self.collections = list;
        if let Some(id) = self.current_collection_id {
            if self.find_collection(id).is_none() {
                self.clear_selection();
            }
        }
        true
    }

    /// Pick the first collection when nothing is selected yet.
    pub fn auto_selection(&self) -> Option<CollectionId> {
        if self.current_collection_id.is_some() {
            return None;
        }
        self.collections.first().map(|c| c.id)
    }

    /// Returns `true` if the selection changed. Data belonging to the
    /// previous selection is discarded immediately.
    pub fn select(&mut self, id: CollectionId) -> bool {
        if self.current_collection_id == Some(id) {
            return false;
        }
        self.current_collection_id = Some(id);
        self.items.clear();
        self.items_loaded_for = None;
        self.items_failed_for = None;
        self.stats = None;
        true
    }

    pub fn clear_selection(&mut self) {
        self.current_collection_id = None;
        self.items.clear();
        self.items_loaded_for = None;
        self.items_failed_for = None;
        self.stats = None;
    }

    pub fn clear_selection_if(&mut self, id: CollectionId) -> bool {
        if self.current_collection_id == Some(id) {
            self.clear_selection();
            true
        } else {
            false
        }
    }

    pub fn begin_items_request(&mut self) -> Option<ReadTicket> {
        let collection_id = self.current_collection_id?;
        self.items_request_id = self.items_request_id.saturating_add(1);
        Some(ReadTicket {
            request_id: self.items_request_id,
            collection_id,
        })
    }

    pub fn finish_items_request(&mut self, ticket: ReadTicket, items: Vec<Item>) -> bool {
        if !self.is_current(ticket, self.items_request_id) {
            return false;
        }
        self.items = items;
        self.items_loaded_for = Some(ticket.collection_id);
        self.items_failed_for = None;
        true
    }

    /// The read failed. Whatever is loaded stays; a selection with nothing
    /// loaded stops waiting.
    pub fn fail_items_request(&mut self, ticket: ReadTicket) -> bool {
        if !self.is_current(ticket, self.items_request_id) {
            return false;
        }
        self.items_failed_for = Some(ticket.collection_id);
        true
    }

    pub fn begin_stats_request(&mut self) -> Option<ReadTicket> {
        let collection_id = self.current_collection_id?;
        self.stats_request_id = self.stats_request_id.saturating_add(1);
        Some(ReadTicket {
            request_id: self.stats_request_id,
            collection_id,
        })
    }

    pub fn finish_stats_request(&mut self, ticket: ReadTicket, stats: Stats) -> bool {
        if !self.is_current(ticket, self.stats_request_id) {
            return false;
        }
        self.stats = Some(stats);
        true
    }

    fn is_current(&self, ticket: ReadTicket, latest_request_id: u64) -> bool {
        ticket.request_id == latest_request_id
            && self.current_collection_id == Some(ticket.collection_id)
    }

    pub fn find_collection(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    pub fn find_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn visible_items(&self) -> Vec<&Item> {
        filter_items(&self.items, &self.search_query)
    }
}

/// Items whose name or memo contains `query`, ignoring case. Whitespace in
/// the query is significant.
pub(crate) fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            contains_ignore_case(&item.name, &needle)
                || item
                    .memo
                    .as_deref()
                    .is_some_and(|m| contains_ignore_case(m, &needle))
        })
        .collect()
}

/// Where the controller keeps `CatalogState`: a signal in the app, a plain
/// cell in tests.
pub(crate) trait StateStore: Clone {
    fn read_state<R: Default>(&self, f: impl FnOnce(&CatalogState) -> R) -> R;
    fn update_state<R: Default>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R;
}

impl StateStore for RwSignal<CatalogState> {
    fn read_state<R: Default>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        self.try_with_untracked(f).unwrap_or_default()
    }

    fn update_state<R: Default>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
        self.try_update(f).unwrap_or_default()
    }
}

#[cfg(test)]
impl StateStore for std::rc::Rc<std::cell::RefCell<CatalogState>> {
    fn read_state<R: Default>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&self.borrow())
    }

    fn update_state<R: Default>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ItemId, collection_id: CollectionId, name: &str, memo: Option<&str>) -> Item {
        Item {
            id,
            collection_id,
            name: name.to_string(),
            image_url: None,
            purchase_date: None,
            price: None,
            memo: memo.map(str::to_string),
            created_at: None,
            updated_at: None,
        }
    }

    fn collection(id: CollectionId, name: &str) -> Collection {
        Collection {
            id,
            name: name.to_string(),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_filter_items_matches_name_or_memo_ignoring_case() {
        let items = vec![
            item(1, 1, "Blue Pen", None),
            item(2, 1, "Notebook", Some("for the PEN case")),
            item(3, 1, "Stapler", Some("office")),
        ];
        let before = items.clone();

        let hits: Vec<ItemId> = filter_items(&items, "pen").iter().map(|i| i.id).collect();
        assert_eq!(hits, vec![1, 2]);
        assert_eq!(items, before);

        assert_eq!(filter_items(&items, "").len(), 3);
        assert!(filter_items(&items, "zzz").is_empty());
    }

    #[test]
    fn test_filter_items_keeps_surrounding_whitespace() {
        let items = vec![
            item(1, 1, "Blue Pen", None),
            item(2, 1, "Penny", None),
            item(3, 1, "Pen holder", None),
        ];

        let hits: Vec<ItemId> = filter_items(&items, "pen ").iter().map(|i| i.id).collect();
        assert_eq!(hits, vec![3]);

        let hits: Vec<ItemId> = filter_items(&items, " ").iter().map(|i| i.id).collect();
        assert_eq!(hits, vec![1, 3]);

        assert!(filter_items(&items[..2], "pen ").is_empty());
    }

    #[test]
    fn test_failed_items_read_only_marks_current_selection() {
        let mut state = CatalogState::default();
        state.select(1);
        let stale = state.begin_items_request().expect("selected");
        let current = state.begin_items_request().expect("selected");

        assert!(!state.fail_items_request(stale));
        assert!(state.items_failed_for.is_none());
        assert!(state.fail_items_request(current));
        assert_eq!(state.items_failed_for, Some(1));

        state.select(2);
        assert!(state.items_failed_for.is_none());
    }

    #[test]
    fn test_select_discards_previous_collection_data() {
        let mut state = CatalogState::default();
        state.select(1);
        let ticket = state.begin_items_request().expect("selected");
        assert!(state.finish_items_request(ticket, vec![item(1, 1, "a", None)]));

        assert!(state.select(2));
        assert!(state.items.is_empty());
        assert!(state.items_loaded_for.is_none());
        assert!(!state.select(2));
    }

    #[test]
    fn test_stale_items_response_is_discarded() {
        let mut state = CatalogState::default();
        state.select(1);
        let first = state.begin_items_request().expect("selected");
        state.select(2);
        let second = state.begin_items_request().expect("selected");

        assert!(state.finish_items_request(second, vec![item(5, 2, "b", None)]));
        assert!(!state.finish_items_request(first, vec![item(4, 1, "a", None)]));
        assert_eq!(state.items_loaded_for, Some(2));
        assert_eq!(state.items[0].collection_id, 2);
    }

    #[test]
    fn test_same_collection_reissued_ignores_older_request() {
        let mut state = CatalogState::default();
        state.select(1);
        let older = state.begin_stats_request().expect("selected");
        let newer = state.begin_stats_request().expect("selected");
        assert!(!state.finish_stats_request(older, Stats::default()));
        assert!(state.finish_stats_request(
            newer,
            Stats {
                total_items: 2,
                total_price: 10.0
            }
        ));
        assert_eq!(state.stats.map(|s| s.total_items), Some(2));
    }

    #[test]
    fn test_no_selection_means_no_item_request() {
        let mut state = CatalogState::default();
        assert!(state.begin_items_request().is_none());
        assert!(state.begin_stats_request().is_none());
    }

    #[test]
    fn test_collections_reload_drops_missing_selection() {
        let mut state = CatalogState::default();
        let req = state.begin_collections_request();
        assert!(state.finish_collections_request(req, vec![collection(1, "A"), collection(2, "B")]));
        assert_eq!(state.auto_selection(), Some(1));

        state.select(2);
        assert_eq!(state.auto_selection(), None);

        let req = state.begin_collections_request();
        assert!(state.finish_collections_request(req, vec![collection(1, "A")]));
        assert_eq!(state.current_collection_id, None);
        assert_eq!(state.auto_selection(), Some(1));
    }

    #[test]
    fn test_stale_collections_response_is_discarded() {
        let mut state = CatalogState::default();
        let older = state.begin_collections_request();
        let newer = state.begin_collections_request();
        assert!(state.finish_collections_request(newer, vec![collection(1, "A")]));
        assert!(!state.finish_collections_request(older, vec![]));
        assert_eq!(state.collections.len(), 1);
    }

    #[test]
    fn test_clear_selection_if_only_matches_selected() {
        let mut state = CatalogState::default();
        state.select(3);
        assert!(!state.clear_selection_if(4));
        assert_eq!(state.current_collection_id, Some(3));
        assert!(state.clear_selection_if(3));
        assert_eq!(state.current_collection_id, None);
    }
}
