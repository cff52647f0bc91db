use crate::config::config::{AppConfig, LimitsConfig};
use crate::observability::AppMetrics;
use crate::services::session::SessionService;
use std::sync::Arc;
use std::time::Duration;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Session service for mood, breathing, reflection and feedback flows
    pub session_service: Arc<dyn SessionService>,
    /// Process-wide counters
    pub metrics: Arc<AppMetrics>,
    /// Input size limits
    pub limits: LimitsConfig,
    /// Interval between breathing progress events on the SSE stream
    pub stream_tick: Duration,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session_service", &"Arc<dyn SessionService>")
            .field("metrics", &"Arc<AppMetrics>")
            .field("limits", &self.limits)
            .field("stream_tick", &self.stream_tick)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        session_service: Box<dyn SessionService>,
        metrics: Arc<AppMetrics>,
        config: &AppConfig,
    ) -> Self {
        Self {
            session_service: Arc::from(session_service),
            metrics,
            limits: config.limits.clone(),
            stream_tick: Duration::from_millis(config.breathing.stream_tick_ms.max(1)),
        }
    }
}
