//! Shared application state threaded through every handler.

use campaign_catalog::Catalog;
use campaign_events::EventLog;
use campaign_serving::ServingEngine;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub events: Arc<EventLog>,
    pub serving: ServingEngine,
    pub node_id: String,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(node_id: String) -> Self {
        let catalog = Arc::new(Catalog::new());
        let events = Arc::new(EventLog::new());
        let serving = ServingEngine::new(catalog.clone(), events.clone());
        Self {
            catalog,
            events,
            serving,
            node_id,
            start_time: Instant::now(),
        }
    }
}
