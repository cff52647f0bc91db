//! 可观测性模块
//!
//! 提供 Prometheus 格式指标、结构化日志和健康检查。

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::config::LoggingConfig;
use crate::models::Mood;
use crate::storage::journal::Journal;

// ===== Simple Metrics (atomics, rendered in Prometheus text format) =====

/// 应用指标
#[derive(Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_sum: AtomicU64,
    pub sessions_created_total: AtomicU64,
    pub sessions_evicted_total: AtomicU64,
    pub moods_happy: AtomicU64,
    pub moods_sad: AtomicU64,
    pub moods_stressed: AtomicU64,
    pub moods_neutral: AtomicU64,
    pub breathing_started_total: AtomicU64,
    pub breathing_completed_total: AtomicU64,
    pub breathing_cancelled_total: AtomicU64,
    pub reflections_saved_total: AtomicU64,
    pub reflection_failures_total: AtomicU64,
    pub feedback_total: AtomicU64,
    pub errors_total: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    pub fn record_session_created(&self) {
        self.sessions_created_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录因空闲超时被回收的会话
    pub fn record_sessions_evicted(&self, count: usize) {
        self.sessions_evicted_total
            .fetch_add(count as u64, Ordering::SeqCst);
    }

    /// 记录一次心情识别
    pub fn record_mood(&self, mood: Mood) {
        let counter = match mood {
            Mood::Happy => &self.moods_happy,
            Mood::Sad => &self.moods_sad,
            Mood::Stressed => &self.moods_stressed,
            Mood::Neutral => &self.moods_neutral,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_breathing_started(&self) {
        self.breathing_started_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_breathing_completed(&self) {
        self.breathing_completed_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_breathing_cancelled(&self) {
        self.breathing_cancelled_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_reflection(&self, saved: bool) {
        if saved {
            self.reflections_saved_total.fetch_add(1, Ordering::SeqCst);
        } else {
            self.reflection_failures_total.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn record_feedback(&self) {
        self.feedback_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self, sessions_active: usize) -> String {
        let load = |c: &AtomicU64| c.load(Ordering::SeqCst);
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP sessions_active Live sessions
# TYPE sessions_active gauge
sessions_active {}
# HELP sessions_created_total Sessions created
# TYPE sessions_created_total counter
sessions_created_total {}
# HELP sessions_evicted_total Idle sessions evicted
# TYPE sessions_evicted_total counter
sessions_evicted_total {}
# HELP moods_detected_total Detected moods by label
# TYPE moods_detected_total counter
moods_detected_total{{mood="happy"}} {}
moods_detected_total{{mood="sad"}} {}
moods_detected_total{{mood="stressed"}} {}
moods_detected_total{{mood="neutral"}} {}
# HELP breathing_exercises_total Breathing exercises by outcome
# TYPE breathing_exercises_total counter
breathing_exercises_total{{outcome="started"}} {}
breathing_exercises_total{{outcome="completed"}} {}
breathing_exercises_total{{outcome="cancelled"}} {}
# HELP reflections_total Reflection writes by result
# TYPE reflections_total counter
reflections_total{{result="saved"}} {}
reflections_total{{result="failed"}} {}
# HELP feedback_total Feedback submissions
# TYPE feedback_total counter
feedback_total {}
# HELP errors_total Total errors
# TYPE errors_total counter
errors_total {}
"#,
            load(&self.http_requests_total),
            load(&self.http_request_duration_sum) as f64 / 1000.0,
            load(&self.http_requests_total),
            sessions_active,
            load(&self.sessions_created_total),
            load(&self.sessions_evicted_total),
            load(&self.moods_happy),
            load(&self.moods_sad),
            load(&self.moods_stressed),
            load(&self.moods_neutral),
            load(&self.breathing_started_total),
            load(&self.breathing_completed_total),
            load(&self.breathing_cancelled_total),
            load(&self.reflections_saved_total),
            load(&self.reflection_failures_total),
            load(&self.feedback_total),
            load(&self.errors_total),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
}

/// 健康检查结果
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub message: String,
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub health_checks: Arc<Mutex<Vec<HealthCheckResult>>>,
    pub start_time: DateTime<Utc>,
    pub version: String,
    sessions_active: Arc<dyn Fn() -> usize + Send + Sync>,
    journal: Option<Arc<dyn Journal>>,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            health_checks: Arc::new(Mutex::new(Vec::new())),
            start_time: Utc::now(),
            version,
            sessions_active: Arc::new(|| 0),
            journal: None,
        }
    }

    /// 就绪检查时重新探测该日志是否可写
    pub fn with_journal(mut self, journal: Arc<dyn Journal>) -> Self {
        self.journal = Some(journal);
        self
    }

    /// 指定活跃会话数的来源
    pub fn with_session_gauge(mut self, gauge: impl Fn() -> usize + Send + Sync + 'static) -> Self {
        self.sessions_active = Arc::new(gauge);
        self
    }

    /// 添加健康检查结果，同名检查会被替换
    pub async fn add_health_check(&self, result: HealthCheckResult) {
        let mut checks = self.health_checks.lock().await;
        checks.retain(|c| c.name != result.name);
        checks.push(result);
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: checks
            .iter()
            .map(|c| HealthCheck {
                name: c.name.clone(),
                status: if c.healthy { "healthy" } else { "unhealthy" }.to_string(),
                message: Some(c.message.clone()),
            })
            .collect(),
    };

    let status_code = if all_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 探测心情记录是否可写（打开并在需要时补写表头）
pub async fn probe_journal(journal: &dyn Journal) -> HealthCheckResult {
    match journal.initialize().await {
        Ok(()) => HealthCheckResult {
            name: "journal".to_string(),
            healthy: true,
            message: "mood log writable".to_string(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "mood log is not writable");
            HealthCheckResult {
                name: "journal".to_string(),
                healthy: false,
                message: e.to_string(),
            }
        }
    }
}

/// 就绪检查；配置了日志时先重新探测其可写性
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    if let Some(journal) = &state.journal {
        let result = probe_journal(journal.as_ref()).await;
        state.add_health_check(result).await;
    }

    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    if all_healthy {
        (axum::http::StatusCode::OK, "Ready")
    } else {
        (axum::http::StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let output = state.metrics.gather((state.sessions_active)());
    (axum::http::StatusCode::OK, output)
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// RUST_LOG 优先于配置中的级别。重复初始化（例如测试中）会被忽略。
pub fn init_tracing(service_name: &str, config: &LoggingConfig) {
    let default_level = if config.level.is_empty() {
        "info"
    } else {
        config.level.as_str()
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},{}={}", default_level, service_name, default_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true);

    let _ = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    metrics.record_http_request(duration_ms);
    if response.status().is_server_error() {
        metrics.record_error();
    }

    response
}
