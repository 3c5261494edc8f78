use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::views::filter::FilterState;
use crate::features::views::sort::SortSpec;
use crate::modules::storage::BlobStore;
use crate::shared::constants::STORAGE_KEY_SAVED_VIEWS;

/// A named, reusable combination of filter and sort settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedView {
    pub id: String,
    pub name: String,
    pub filters: FilterState,
    pub sort: Option<SortSpec>,
}

/// User-managed collection of saved dashboard views, persisted to its own
/// blob-store key. Views are immutable once saved; users create and delete
/// them.
pub struct SavedViewStore {
    views: Vec<SavedView>,
    blob: Arc<dyn BlobStore>,
}

impl SavedViewStore {
    /// Load saved views; a missing or unreadable blob starts empty
    pub fn load(blob: Arc<dyn BlobStore>) -> Self {
        let views = match blob.get(STORAGE_KEY_SAVED_VIEWS) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::error!("Failed to decode saved views: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read saved views: {}", e);
                Vec::new()
            }
        };

        Self { views, blob }
    }

    pub fn views(&self) -> &[SavedView] {
        &self.views
    }

    /// Snapshot the given filter/sort state under a name.
    /// Blank names are rejected with a `None`.
    pub fn save_view(
        &mut self,
        name: &str,
        filters: FilterState,
        sort: Option<SortSpec>,
    ) -> Option<SavedView> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let view = SavedView {
            id: format!("view-{}", Uuid::new_v4()),
            name: name.to_string(),
            filters,
            sort,
        };
        self.views.push(view.clone());
        self.persist();

        Some(view)
    }

    /// Delete by id; false when the id is unknown
    pub fn delete_view(&mut self, id: &str) -> bool {
        let before = self.views.len();
        self.views.retain(|v| v.id != id);
        let deleted = self.views.len() != before;
        if deleted {
            self.persist();
        }
        deleted
    }

    /// Find the view structurally equal to the live filter/sort state,
    /// used to highlight the active view in the picker
    pub fn find_matching(
        &self,
        filters: &FilterState,
        sort: Option<SortSpec>,
    ) -> Option<&SavedView> {
        self.views
            .iter()
            .find(|v| v.filters == *filters && v.sort == sort)
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.views) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode saved views: {}", e);
                return;
            }
        };
        if let Err(e) = self.blob.put(STORAGE_KEY_SAVED_VIEWS, &json) {
            tracing::error!("Failed to persist saved views: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::views::filter::WorkerFilter;
    use crate::features::views::sort::{SortDirection, SortKey};
    use crate::modules::storage::MemoryBlobStore;

    fn sample_filters() -> FilterState {
        FilterState {
            search: "main".to_string(),
            worker: WorkerFilter::Unassigned,
            status: None,
            danger: None,
        }
    }

    #[test]
    fn test_save_and_delete_views() {
        let mut store = SavedViewStore::load(Arc::new(MemoryBlobStore::new()));

        let view = store
            .save_view("Unassigned on Main", sample_filters(), None)
            .unwrap();
        assert_eq!(store.views().len(), 1);

        assert!(store.delete_view(&view.id));
        assert!(store.views().is_empty());
        assert!(!store.delete_view(&view.id));
    }

    #[test]
    fn test_blank_names_rejected() {
        let mut store = SavedViewStore::load(Arc::new(MemoryBlobStore::new()));
        assert!(store.save_view("   ", sample_filters(), None).is_none());
        assert!(store.views().is_empty());
    }

    #[test]
    fn test_find_matching_is_structural() {
        let mut store = SavedViewStore::load(Arc::new(MemoryBlobStore::new()));
        let sort = Some(SortSpec::new(SortKey::Upvotes, SortDirection::Desc));
        store.save_view("My view", sample_filters(), sort);

        assert!(store.find_matching(&sample_filters(), sort).is_some());
        // Different sort: no match
        assert!(store.find_matching(&sample_filters(), None).is_none());
        // Different filters: no match
        assert!(store.find_matching(&FilterState::default(), sort).is_none());
    }

    #[test]
    fn test_views_persist_across_loads() {
        let blob: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::new());

        let mut store = SavedViewStore::load(Arc::clone(&blob));
        store.save_view("Kept", sample_filters(), None);
        drop(store);

        let reloaded = SavedViewStore::load(blob);
        assert_eq!(reloaded.views().len(), 1);
        assert_eq!(reloaded.views()[0].name, "Kept");
    }
}
