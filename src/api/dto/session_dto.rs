//! 会话 DTO
//!
//! 定义会话相关的响应数据结构。

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

use crate::models::breathing::BreathingSnapshot;
use crate::models::session::SessionState;

/// 会话响应
///
/// 对应页面上各区块的可见性。`detected_mood` 为空字符串表示尚未识别。
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// 会话 ID
    pub id: String,
    /// 是否展示 "Start Breathing Exercise"
    pub show_breathing: bool,
    /// 是否展示反馈表单
    pub show_feedback: bool,
    /// 最近一次识别出的心情
    pub detected_mood: String,
    /// 是否展示 "Give Feedback"
    pub can_give_feedback: bool,
    /// 是否展示反思输入
    pub reflection_unlocked: bool,
    /// 是否已提交过反馈
    pub feedback_submitted: bool,
    /// 当前或最近一次呼吸练习
    pub breathing: Option<BreathingSnapshot>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,
}

impl From<&SessionState> for SessionResponse {
    fn from(session: &SessionState) -> Self {
        let now = Instant::now();
        Self {
            id: session.id.clone(),
            show_breathing: session.show_breathing,
            show_feedback: session.show_feedback,
            detected_mood: session
                .detected_mood
                .map(|m| m.to_string())
                .unwrap_or_default(),
            can_give_feedback: session.can_open_feedback(),
            reflection_unlocked: session.reflection_unlocked,
            feedback_submitted: session.feedback_submitted,
            breathing: session.breathing.as_ref().map(|b| b.snapshot_at(now)),
            created_at: session.created_at,
            last_active_at: session.last_active_at,
        }
    }
}

impl From<SessionState> for SessionResponse {
    fn from(session: SessionState) -> Self {
        Self::from(&session)
    }
}
