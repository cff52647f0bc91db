//! 反馈 DTO

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::api::dto::session_dto::SessionResponse;
use crate::config::config::LimitsConfig;
use crate::models::mood::Mood;
use crate::security::validation::{Validatable, ValidationResult, check_max_chars, check_range};
use crate::services::session::{FeedbackInput, FeedbackOutcome};
use crate::storage::csv::TIMESTAMP_FORMAT;

/// 提交反馈请求
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    /// "How do you feel now (1 = very bad, 5 = very good)?"
    #[serde(default = "default_rating")]
    pub post_mood_rating: i64,
    /// "Did you feel supported by MoodMate?" 接受 true/false 或 "Yes"/"No"
    #[serde(deserialize_with = "deserialize_supported")]
    pub supported: bool,
    /// "Any feedback or suggestions?"
    #[serde(default)]
    pub comment: String,
}

/// 滑块默认值
fn default_rating() -> i64 {
    3
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SupportedValue {
    Flag(bool),
    Answer(String),
}

fn deserialize_supported<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match SupportedValue::deserialize(deserializer)? {
        SupportedValue::Flag(flag) => Ok(flag),
        SupportedValue::Answer(answer) => match answer.trim().to_lowercase().as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(de::Error::custom(format!(
                "supported must be \"Yes\" or \"No\", got \"{}\"",
                other
            ))),
        },
    }
}

impl Validatable for SubmitFeedbackRequest {
    fn validate(&self, limits: &LimitsConfig) -> ValidationResult<()> {
        check_range("post_mood_rating", self.post_mood_rating, 1, 5)?;
        check_max_chars("comment", &self.comment, limits.max_note_chars)
    }
}

impl SubmitFeedbackRequest {
    /// 调用前需先通过 validate
    pub fn into_input(self) -> FeedbackInput {
        FeedbackInput {
            post_mood_rating: self.post_mood_rating.clamp(1, 5) as u8,
            supported: self.supported,
            comment: self.comment,
        }
    }
}

/// 提交反馈响应
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub timestamp: String,
    pub detected_mood: Mood,
    pub post_mood_rating: u8,
    /// "Yes" / "No"
    pub supported: String,
    pub user_comment: String,
    pub session: SessionResponse,
}

impl From<FeedbackOutcome> for FeedbackResponse {
    fn from(outcome: FeedbackOutcome) -> Self {
        let event = outcome.event;
        Self {
            message: outcome.message,
            timestamp: event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            detected_mood: event.detected_mood,
            post_mood_rating: event.post_mood_rating,
            supported: if event.supported { "Yes" } else { "No" }.to_string(),
            user_comment: event.user_comment,
            session: SessionResponse::from(&outcome.session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;

    #[test]
    fn test_supported_accepts_yes_no_and_bool() {
        let yes: SubmitFeedbackRequest =
            serde_json::from_str(r#"{"post_mood_rating":5,"supported":"Yes","comment":"great"}"#)
                .unwrap();
        assert!(yes.supported);

        let no: SubmitFeedbackRequest =
            serde_json::from_str(r#"{"post_mood_rating":2,"supported":"no"}"#).unwrap();
        assert!(!no.supported);
        assert_eq!(no.comment, "");

        let flag: SubmitFeedbackRequest =
            serde_json::from_str(r#"{"supported":true}"#).unwrap();
        assert!(flag.supported);
        assert_eq!(flag.post_mood_rating, 3);
    }

    #[test]
    fn test_supported_rejects_other_answers() {
        let result: Result<SubmitFeedbackRequest, _> =
            serde_json::from_str(r#"{"post_mood_rating":5,"supported":"maybe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rating_range_validated() {
        let limits = AppConfig::development().limits;
        let request: SubmitFeedbackRequest =
            serde_json::from_str(r#"{"post_mood_rating":0,"supported":"Yes"}"#).unwrap();
        assert!(request.validate(&limits).is_err());

        let request: SubmitFeedbackRequest =
            serde_json::from_str(r#"{"post_mood_rating":5,"supported":"Yes"}"#).unwrap();
        assert!(request.validate(&limits).is_ok());
        assert_eq!(request.into_input().post_mood_rating, 5);
    }
}
