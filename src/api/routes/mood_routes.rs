//! Mood Routes

use axum::{Router, routing::post};

use crate::api::app_state::AppState;
use crate::api::handlers::mood_handler::*;

/// 创建心情路由器
pub fn create_mood_router() -> Router<AppState> {
    Router::new().route("/sessions/:id/moods", post(submit_mood))
}
