//! 追加写入日志文件的三类记录，创建后不可变。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::mood::Mood;

/// 心情记录：每次提交非空输入产生一条
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEvent {
    pub timestamp: DateTime<Local>,
    pub user_input: String,
    /// 极性分数，范围 [-1, 1]
    pub polarity: f64,
    pub mood: Mood,
}

impl MoodEvent {
    pub fn new(user_input: &str, polarity: f64, mood: Mood) -> Self {
        Self {
            timestamp: Local::now(),
            user_input: user_input.to_string(),
            polarity,
            mood,
        }
    }
}

/// 呼吸练习后的反思
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reflection {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl Reflection {
    pub fn new(text: &str) -> Self {
        Self {
            timestamp: Local::now(),
            text: text.to_string(),
        }
    }
}

/// 用户反馈
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub timestamp: DateTime<Local>,
    pub detected_mood: Mood,
    /// 1 = very bad, 5 = very good
    pub post_mood_rating: u8,
    pub supported: bool,
    pub user_comment: String,
}

impl FeedbackEvent {
    pub fn new(detected_mood: Mood, post_mood_rating: u8, supported: bool, comment: &str) -> Self {
        Self {
            timestamp: Local::now(),
            detected_mood,
            post_mood_rating,
            supported,
            user_comment: comment.to_string(),
        }
    }
}
