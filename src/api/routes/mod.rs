//! Routes 模块
//!
//! 定义 API 路由。

pub mod breathing_routes;
pub mod journal_routes;
pub mod mood_routes;
pub mod session_routes;
