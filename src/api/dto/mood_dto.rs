//! 心情 DTO

use serde::{Deserialize, Serialize};

use crate::api::dto::session_dto::SessionResponse;
use crate::config::config::LimitsConfig;
use crate::models::mood::Mood;
use crate::security::validation::{Validatable, ValidationResult, check_max_chars};
use crate::services::session::MoodOutcome;
use crate::storage::csv::TIMESTAMP_FORMAT;

/// 提交心情请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SubmitMoodRequest {
    /// 用户输入的一句话
    pub text: String,
}

impl Validatable for SubmitMoodRequest {
    fn validate(&self, limits: &LimitsConfig) -> ValidationResult<()> {
        check_max_chars("text", &self.text, limits.max_input_chars)
    }
}

/// 心情识别响应
#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub mood: Mood,
    pub polarity: f64,
    /// 固定鼓励语
    pub message: String,
    /// 写入心情记录的时间
    pub timestamp: String,
    pub session: SessionResponse,
}

impl From<MoodOutcome> for MoodResponse {
    fn from(outcome: MoodOutcome) -> Self {
        Self {
            mood: outcome.analysis.mood,
            polarity: outcome.analysis.polarity,
            message: outcome.analysis.message.to_string(),
            timestamp: outcome.event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            session: SessionResponse::from(&outcome.session),
        }
    }
}
