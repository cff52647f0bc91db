//! 核心数据模型模块
//!
//! 定义 MoodMate 的核心数据结构：Mood, SessionState, 呼吸练习状态机，
//! 以及写入日志文件的 MoodEvent / Reflection / FeedbackEvent。

pub mod breathing;
pub mod journal_entry;
pub mod mood;
pub mod session;

pub use breathing::{BreathingExercise, BreathingPhase, BreathingPlan, BreathingSnapshot, BreathingStatus};
pub use journal_entry::{FeedbackEvent, MoodEvent, Reflection};
pub use mood::Mood;
pub use session::SessionState;
