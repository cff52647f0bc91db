use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 心情分类
///
/// 只存在四种固定取值，由极性分数与压力关键词共同决定。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Stressed,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Stressed, Mood::Neutral];

    /// 日志与接口中使用的标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
            Mood::Neutral => "neutral",
        }
    }

    /// 每种心情对应的固定鼓励语
    pub fn message(&self) -> &'static str {
        match self {
            Mood::Happy => "😊 Glad that you're in a happy mood. Keep it that way!",
            Mood::Sad => "🤗 I hope you feel better soon. You got this.",
            Mood::Stressed => {
                "😣 You will figure it all out. Close your eyes and take a deep breath."
            }
            Mood::Neutral => {
                "🌸 Hey, look around, the world is such a beautiful place with you in it."
            }
        }
    }

    /// 是否需要引导呼吸练习
    pub fn triggers_breathing(&self) -> bool {
        matches!(self, Mood::Sad | Mood::Stressed)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown mood: {}", s))
    }
}
