//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{DashboardService, LogService, QueryCache, ThreatService};
use crate::domain::repositories::{DatabaseHealth, LogRepository, ThreatRepository};

/// State shared by all handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub threat_service: Arc<ThreatService>,
    pub log_service: Arc<LogService>,
    pub dashboard_service: Arc<DashboardService>,
    pub database: Arc<dyn DatabaseHealth>,
    pub cache: Arc<QueryCache>,
}

impl AppState {
    /// Wires the services over the given repositories and cache.
    pub fn new(
        threats: Arc<dyn ThreatRepository>,
        logs: Arc<dyn LogRepository>,
        database: Arc<dyn DatabaseHealth>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            threat_service: Arc::new(ThreatService::new(threats.clone(), cache.clone())),
            log_service: Arc::new(LogService::new(logs, cache.clone())),
            dashboard_service: Arc::new(DashboardService::new(threats, cache.clone())),
            database,
            cache,
        }
    }
}
