//! 心情映射
//!
//! 极性分数 → 四种心情之一。阈值按固定优先级判断：
//! 1. polarity > 0.2 → happy
//! 2. polarity < -0.2 → sad
//! 3. 其余情况看小写输入是否包含压力关键词（字面子串匹配）：是 → stressed，否 → neutral

use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::mood::Mood;
use crate::services::sentiment::SentimentClassifier;

pub const HAPPY_THRESHOLD: f64 = 0.2;
pub const SAD_THRESHOLD: f64 = -0.2;

/// 压力关键词，"burned out" 作为完整短语匹配
pub const STRESS_KEYWORDS: [&str; 7] = [
    "tired",
    "overwhelmed",
    "stressed",
    "anxious",
    "nervous",
    "worried",
    "burned out",
];

/// 一次分析的结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodAnalysis {
    pub polarity: f64,
    pub mood: Mood,
    pub message: &'static str,
}

pub fn contains_stress_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    STRESS_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// 纯函数：由极性与原始文本得到心情
pub fn classify(polarity: f64, text: &str) -> Mood {
    if polarity > HAPPY_THRESHOLD {
        Mood::Happy
    } else if polarity < SAD_THRESHOLD {
        Mood::Sad
    } else if contains_stress_keyword(text) {
        Mood::Stressed
    } else {
        Mood::Neutral
    }
}

#[derive(Clone)]
pub struct MoodMapper {
    classifier: Arc<dyn SentimentClassifier>,
}

impl std::fmt::Debug for MoodMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodMapper")
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

impl MoodMapper {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }

    /// 分析一句非空输入
    pub fn analyze(&self, text: &str) -> Result<MoodAnalysis> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("mood text must not be empty".to_string()));
        }

        let polarity = self.classifier.polarity(text)?;
        if !polarity.is_finite() {
            return Err(AppError::Sentiment(format!(
                "classifier {} returned {}",
                self.classifier.name(),
                polarity
            )));
        }
        let polarity = polarity.clamp(-1.0, 1.0);
        let mood = classify(polarity, text);

        Ok(MoodAnalysis {
            polarity,
            mood,
            message: mood.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sentiment::LexiconSentimentClassifier;
    use rstest::rstest;

    /// 固定返回给定分数的分类器
    struct FixedClassifier(f64);

    impl SentimentClassifier for FixedClassifier {
        fn polarity(&self, _text: &str) -> Result<f64> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn mapper_with(polarity: f64) -> MoodMapper {
        MoodMapper::new(Arc::new(FixedClassifier(polarity)))
    }

    #[rstest]
    #[case(0.21, "anything", Mood::Happy)]
    #[case(0.9, "so tired", Mood::Happy)]
    #[case(-0.21, "anything", Mood::Sad)]
    #[case(-0.8, "worried", Mood::Sad)]
    #[case(0.2, "I'm stressed", Mood::Stressed)]
    #[case(-0.2, "feeling ANXIOUS", Mood::Stressed)]
    #[case(0.0, "totally burned out", Mood::Stressed)]
    #[case(0.0, "just retired", Mood::Stressed)]
    #[case(0.2, "a quiet afternoon", Mood::Neutral)]
    #[case(-0.2, "burned toast", Mood::Neutral)]
    #[case(0.0, "burnedout", Mood::Neutral)]
    fn test_classify_precedence(#[case] polarity: f64, #[case] text: &str, #[case] expected: Mood) {
        assert_eq!(classify(polarity, text), expected);
        let analysis = mapper_with(polarity).analyze(text).unwrap();
        assert_eq!(analysis.mood, expected);
        assert_eq!(analysis.message, expected.message());
    }

    #[test]
    fn test_blank_input_rejected() {
        let mapper = mapper_with(0.5);
        assert!(matches!(mapper.analyze("   \t"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_non_finite_polarity_rejected() {
        let mapper = mapper_with(f64::NAN);
        assert!(matches!(mapper.analyze("hello"), Err(AppError::Sentiment(_))));
    }

    #[test]
    fn test_out_of_range_polarity_clamped() {
        let analysis = mapper_with(3.0).analyze("hello").unwrap();
        assert_eq!(analysis.polarity, 1.0);
        assert_eq!(analysis.mood, Mood::Happy);
    }

    #[test]
    fn test_stressed_scenario_with_lexicon() {
        let mapper = MoodMapper::new(Arc::new(LexiconSentimentClassifier::new()));
        let analysis = mapper.analyze("I feel tired and overwhelmed today").unwrap();
        assert!(analysis.polarity.abs() <= 0.2);
        assert_eq!(analysis.mood, Mood::Stressed);
        assert!(analysis.mood.triggers_breathing());
    }

    #[test]
    fn test_happy_scenario_with_lexicon() {
        let mapper = MoodMapper::new(Arc::new(LexiconSentimentClassifier::new()));
        let analysis = mapper.analyze("I am so happy and excited!").unwrap();
        assert!(analysis.polarity > 0.2);
        assert_eq!(analysis.mood, Mood::Happy);
        assert_eq!(
            analysis.message,
            "😊 Glad that you're in a happy mood. Keep it that way!"
        );
    }
}
