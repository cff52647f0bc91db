//! 反思 DTO

use serde::{Deserialize, Serialize};

use crate::api::dto::session_dto::SessionResponse;
use crate::config::config::LimitsConfig;
use crate::security::validation::{Validatable, ValidationResult, check_max_chars};
use crate::services::session::ReflectionOutcome;

/// 保存反思请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SaveReflectionRequest {
    /// "Write how you feel now after the breathing"
    pub text: String,
}

impl Validatable for SaveReflectionRequest {
    fn validate(&self, limits: &LimitsConfig) -> ValidationResult<()> {
        check_max_chars("text", &self.text, limits.max_note_chars)
    }
}

/// 保存反思响应；写入失败时 saved 为 false，message 为给用户看的错误提示
#[derive(Debug, Serialize)]
pub struct ReflectionResponse {
    pub saved: bool,
    pub message: String,
    pub session: SessionResponse,
}

impl From<ReflectionOutcome> for ReflectionResponse {
    fn from(outcome: ReflectionOutcome) -> Self {
        Self {
            saved: outcome.saved,
            message: outcome.message,
            session: SessionResponse::from(&outcome.session),
        }
    }
}
