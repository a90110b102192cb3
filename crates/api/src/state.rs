use std::sync::Arc;

use hc_collector::{Collector, CycleRunner, ResourceQuery};
use hc_db::CacheStore;
use hc_upstream::GameDataSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Cached game data.
    pub store: CacheStore,
    /// Periodic collector (started and stopped by the binary).
    pub collector: Arc<Collector>,
    /// Live-then-cache lookups and manual refreshes.
    pub query: ResourceQuery,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the store, data source and collector together.
    pub fn new(store: CacheStore, source: Arc<dyn GameDataSource>, config: ServerConfig) -> Self {
        let runner = CycleRunner::new(source, store.clone());
        let collector = Arc::new(Collector::new(runner.clone(), config.scrape_interval));
        Self {
            store,
            collector,
            query: ResourceQuery::new(runner),
            config: Arc::new(config),
        }
    }
}
