//! DTO 模块
//!
//! 数据传输对象，用于 API 请求和响应的序列化。

pub mod feedback_dto;
pub mod mood_dto;
pub mod reflection_dto;
pub mod session_dto;

pub use feedback_dto::*;
pub use mood_dto::*;
pub use reflection_dto::*;
pub use session_dto::*;
