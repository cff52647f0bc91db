//! Journal Routes
//!
//! 反思与反馈的写入路由。

use axum::{Router, routing::post};

use crate::api::app_state::AppState;
use crate::api::handlers::feedback_handler::*;
use crate::api::handlers::reflection_handler::*;

/// 创建反思与反馈路由器
pub fn create_journal_router() -> Router<AppState> {
    Router::new()
        .route("/sessions/:id/reflections", post(save_reflection))
        .route("/sessions/:id/feedback/open", post(open_feedback))
        .route("/sessions/:id/feedback", post(submit_feedback))
}
