//! Breathing Routes
//!
//! 呼吸练习的启动、查询、取消与进度推送。

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;
use crate::api::handlers::breathing_handler::*;

/// 创建呼吸练习路由器
pub fn create_breathing_router() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions/:id/breathing",
            post(start_breathing)
                .get(get_breathing)
                .delete(cancel_breathing),
        )
        .route("/sessions/:id/breathing/stream", get(stream_breathing))
}
