use crate::store::CatalogStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
}

impl AppState {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
