use moodmate::api::{self, app_state::AppState};
use moodmate::config::loader::ConfigLoader;
use moodmate::models::breathing::BreathingPlan;
use moodmate::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing, probe_journal,
};
use moodmate::services::mood_mapper::MoodMapper;
use moodmate::services::sentiment::create_sentiment_classifier;
use moodmate::services::session::{create_session_service, spawn_idle_sweeper};
use moodmate::storage::journal::{FileJournal, Journal};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;
    init_tracing("moodmate", &config.logging);
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let metrics = Arc::new(AppMetrics::default());
    let observability_state =
        ObservabilityState::new(env!("CARGO_PKG_VERSION").to_string(), metrics.clone());

    let journal: Arc<dyn Journal> = Arc::new(FileJournal::new(&config.journal));
    observability_state
        .add_health_check(probe_journal(journal.as_ref()).await)
        .await;
    info!("Journal initialized");

    let classifier = create_sentiment_classifier();
    info!("Sentiment classifier initialized: {}", classifier.name());
    let mapper = MoodMapper::new(Arc::from(classifier));

    let plan = BreathingPlan::new(
        Duration::from_millis(config.breathing.time_unit_ms),
        config.breathing.cycles,
    );
    let session_service =
        create_session_service(mapper, Arc::clone(&journal), plan, metrics.clone());
    info!(
        "Session service initialized (breathing exercise lasts {:?})",
        plan.total_duration()
    );

    let app_state = AppState::new(session_service, metrics, &config);
    let idle_ttl = Duration::from_secs(config.sessions.session_idle_ttl_secs);
    spawn_idle_sweeper(
        Arc::clone(&app_state.session_service),
        idle_ttl,
        Duration::from_secs(config.sessions.sweep_interval_secs),
    );
    info!("Idle sessions are evicted after {:?}", idle_ttl);

    let sessions = Arc::clone(&app_state.session_service);
    let observability_state = Arc::new(
        observability_state
            .with_session_gauge(move || sessions.count())
            .with_journal(journal),
    );

    let mut router =
        create_observability_router(observability_state).merge(api::create_router(app_state));
    if config.server.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
