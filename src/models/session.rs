use chrono::{DateTime, Utc};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::breathing::{BreathingExercise, BreathingPlan};
use crate::models::mood::Mood;

/// 会话状态
///
/// 每个会话独立持有一份，承载界面上哪些区块可见，以及最近一次识别出的心情。
/// 状态转换全部在这里完成，服务层只负责查找会话与写日志。
#[derive(Debug, Clone)]
pub struct SessionState {
    /// 会话唯一标识
    pub id: String,

    /// 是否展示呼吸练习入口
    pub show_breathing: bool,

    /// 是否展示反馈表单
    pub show_feedback: bool,

    /// 最近一次识别出的心情，None 即为空
    pub detected_mood: Option<Mood>,

    /// 呼吸练习完成后解锁反思输入，保存成功后重新锁定
    pub reflection_unlocked: bool,

    /// 本会话是否已提交过反馈
    pub feedback_submitted: bool,

    /// 当前或最近一次呼吸练习
    pub breathing: Option<BreathingExercise>,

    /// 会话创建时间
    pub created_at: DateTime<Utc>,

    /// 最后活跃时间
    pub last_active_at: DateTime<Utc>,
}

impl SessionState {
    /// 创建新会话，所有标志为默认值
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            show_breathing: false,
            show_feedback: false,
            detected_mood: None,
            reflection_unlocked: false,
            feedback_submitted: false,
            breathing: None,
            created_at: now,
            last_active_at: now,
        }
    }

    /// 更新最后活跃时间
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// 识别出心情后的状态转换；新心情不需要呼吸练习时取消进行中的练习
    pub fn apply_detection(&mut self, mood: Mood) {
        if !mood.triggers_breathing() {
            self.cancel_breathing(Instant::now());
        }
        self.detected_mood = Some(mood);
        self.show_breathing = mood.triggers_breathing();
        self.show_feedback = false;
        self.touch();
    }

    /// 是否可以点击 "Give Feedback"
    pub fn can_open_feedback(&self) -> bool {
        !self.show_feedback && self.detected_mood.is_some() && !self.feedback_submitted
    }

    pub fn open_feedback(&mut self) -> Result<()> {
        if !self.can_open_feedback() {
            return Err(AppError::Conflict(
                "feedback cannot be opened in the current session state".to_string(),
            ));
        }
        self.show_feedback = true;
        self.touch();
        Ok(())
    }

    /// 反思保存成功：重新锁定反思输入，并直接展示反馈表单
    pub fn complete_reflection(&mut self) {
        self.reflection_unlocked = false;
        if !self.feedback_submitted {
            self.show_feedback = true;
        }
        self.touch();
    }

    /// 反馈表单提交前的检查，返回反馈所针对的心情
    pub fn feedback_target(&self) -> Result<Mood> {
        if self.feedback_submitted {
            return Err(AppError::Conflict(
                "feedback has already been submitted for this session".to_string(),
            ));
        }
        if !self.show_feedback {
            return Err(AppError::Conflict("feedback form is not open".to_string()));
        }
        self.detected_mood
            .ok_or_else(|| AppError::Conflict("no mood has been detected yet".to_string()))
    }

    pub fn record_feedback(&mut self) {
        self.feedback_submitted = true;
        self.show_feedback = false;
        self.touch();
    }

    pub fn is_breathing(&self) -> bool {
        self.breathing.as_ref().is_some_and(|b| b.is_running())
    }

    pub fn start_breathing(&mut self, plan: BreathingPlan, now: Instant) -> Result<&BreathingExercise> {
        if !self.show_breathing {
            return Err(AppError::Conflict(
                "breathing exercise is not offered for the current mood".to_string(),
            ));
        }
        if self.is_breathing() {
            return Err(AppError::Conflict(
                "breathing exercise is already running".to_string(),
            ));
        }
        self.touch();
        Ok(self.breathing.insert(BreathingExercise::start(plan, now)))
    }

    /// 推进呼吸练习；首次观察到完成时关闭练习入口并解锁反思
    pub fn poll_breathing(&mut self, now: Instant) -> bool {
        let completed = self
            .breathing
            .as_mut()
            .is_some_and(|exercise| exercise.poll(now));
        if completed {
            self.show_breathing = false;
            self.reflection_unlocked = true;
        }
        completed
    }

    pub fn cancel_breathing(&mut self, now: Instant) -> bool {
        self.breathing
            .as_mut()
            .is_some_and(|exercise| exercise.cancel(now))
    }

    /// 回到初始状态，保留会话 ID
    pub fn reset(&mut self) {
        let id = std::mem::take(&mut self.id);
        *self = Self {
            id,
            ..Self::new()
        };
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
