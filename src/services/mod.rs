//! 服务模块

pub mod mood_mapper;
pub mod sentiment;
pub mod session;

pub use mood_mapper::{MoodAnalysis, MoodMapper, STRESS_KEYWORDS, classify};
pub use sentiment::{LexiconSentimentClassifier, SentimentClassifier, create_sentiment_classifier};
pub use session::{
    FeedbackInput, FeedbackOutcome, MoodOutcome, ReflectionOutcome, SessionService,
    SessionServiceImpl, create_session_service, spawn_idle_sweeper,
};
