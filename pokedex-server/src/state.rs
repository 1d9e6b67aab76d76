//! Application state shared across handlers

use std::sync::Arc;

use pokedex_core::{PokeApiClient, PokedexStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: PokedexStore,
    catalog: PokeApiClient,
}

impl AppState {
    pub fn new(store: PokedexStore, catalog: PokeApiClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, catalog }),
        }
    }

    pub fn store(&self) -> &PokedexStore {
        &self.inner.store
    }

    pub fn catalog(&self) -> &PokeApiClient {
        &self.inner.catalog
    }
}
