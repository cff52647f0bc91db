//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod breathing_handler;
pub mod feedback_handler;
pub mod mood_handler;
pub mod page_handler;
pub mod reflection_handler;
pub mod session_handler;

pub use breathing_handler::*;
pub use feedback_handler::*;
pub use mood_handler::*;
pub use page_handler::*;
pub use reflection_handler::*;
pub use session_handler::*;
