use crate::catalog::Catalog;
use crate::session::VisitStore;
use axum::extract::FromRef;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalog = Arc<Catalog>;
pub type GuardedVisitStore = Arc<Mutex<VisitStore>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedCatalog,
    pub visit_store: GuardedVisitStore,
}

impl ServerState {
    pub fn new(config: ServerConfig, catalog: Catalog, visit_store: GuardedVisitStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog: Arc::new(catalog),
            visit_store,
        }
    }
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedVisitStore {
    fn from_ref(input: &ServerState) -> Self {
        input.visit_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
