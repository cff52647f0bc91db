//! 会话服务
//!
//! 管理内存中的会话，并把用户操作翻译成会话状态转换与日志写入。
//! 每个会话有自己的锁，同一会话上的操作串行执行；不同会话互不影响。

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::breathing::{BreathingPlan, BreathingSnapshot};
use crate::models::journal_entry::{FeedbackEvent, MoodEvent, Reflection};
use crate::models::session::SessionState;
use crate::observability::AppMetrics;
use crate::services::mood_mapper::{MoodAnalysis, MoodMapper};
use crate::storage::journal::Journal;

pub const REFLECTION_SAVED_MESSAGE: &str = "Reflection saved ✅";
pub const FEEDBACK_THANKS_MESSAGE: &str = "✅ Thank you for your feedback!";

/// 提交心情后的结果
#[derive(Debug, Clone)]
pub struct MoodOutcome {
    pub analysis: MoodAnalysis,
    pub event: MoodEvent,
    pub session: SessionState,
}

/// 保存反思的结果；写入失败不是错误，而是带提示的结果
#[derive(Debug, Clone)]
pub struct ReflectionOutcome {
    pub saved: bool,
    pub message: String,
    pub session: SessionState,
}

/// 反馈表单内容
#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub post_mood_rating: u8,
    pub supported: bool,
    pub comment: String,
}

/// 提交反馈后的结果
#[derive(Debug, Clone)]
pub struct FeedbackOutcome {
    pub event: FeedbackEvent,
    pub message: String,
    pub session: SessionState,
}

/// 会话服务 trait
#[async_trait]
pub trait SessionService: Send + Sync {
    /// 创建会话
    async fn create(&self) -> Result<SessionState>;

    /// 获取会话（顺带推进呼吸练习）
    async fn get(&self, id: &str) -> Result<SessionState>;

    /// 结束并丢弃会话
    async fn delete(&self, id: &str) -> Result<()>;

    /// 提交一句心情；空白输入返回 None，不写日志
    async fn submit_mood(&self, id: &str, text: &str) -> Result<Option<MoodOutcome>>;

    /// 开始呼吸练习
    async fn start_breathing(&self, id: &str) -> Result<BreathingSnapshot>;

    /// 当前呼吸练习进度
    async fn breathing_snapshot(&self, id: &str) -> Result<BreathingSnapshot>;

    /// 取消正在进行的呼吸练习
    async fn cancel_breathing(&self, id: &str) -> Result<BreathingSnapshot>;

    /// 保存反思
    async fn save_reflection(&self, id: &str, text: &str) -> Result<ReflectionOutcome>;

    /// 打开反馈表单（"Give Feedback"）
    async fn open_feedback(&self, id: &str) -> Result<SessionState>;

    /// 提交反馈
    async fn submit_feedback(&self, id: &str, input: FeedbackInput) -> Result<FeedbackOutcome>;

    /// 重置会话到初始状态
    async fn reset(&self, id: &str) -> Result<SessionState>;

    /// 当前会话数
    fn count(&self) -> usize;

    /// 回收空闲超过 idle_ttl 的会话，返回回收数量；正被请求持有的会话跳过
    fn evict_idle(&self, idle_ttl: Duration) -> usize;
}

/// 会话服务实现
pub struct SessionServiceImpl {
    sessions: DashMap<String, Arc<Mutex<SessionState>>>,
    mapper: MoodMapper,
    journal: Arc<dyn Journal>,
    plan: BreathingPlan,
    metrics: Arc<AppMetrics>,
}

impl SessionServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        mapper: MoodMapper,
        journal: Arc<dyn Journal>,
        plan: BreathingPlan,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            sessions: DashMap::new(),
            mapper,
            journal,
            plan,
            metrics,
        }
    }

    fn handle(&self, id: &str) -> Result<Arc<Mutex<SessionState>>> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))
    }

    /// 锁住会话、刷新活跃时间并推进呼吸练习
    async fn lock(&self, id: &str) -> Result<OwnedMutexGuard<SessionState>> {
        let mut session = self.handle(id)?.lock_owned().await;
        session.touch();
        if session.poll_breathing(Instant::now()) {
            self.metrics.record_breathing_completed();
            info!(session_id = %session.id, "breathing exercise completed");
        }
        Ok(session)
    }

    fn current_snapshot(session: &SessionState, now: Instant) -> Result<BreathingSnapshot> {
        session
            .breathing
            .as_ref()
            .map(|exercise| exercise.snapshot_at(now))
            .ok_or_else(|| {
                AppError::NotFound(format!("No breathing exercise for session: {}", session.id))
            })
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    async fn create(&self) -> Result<SessionState> {
        let session = SessionState::new();
        self.sessions
            .insert(session.id.clone(), Arc::new(Mutex::new(session.clone())));
        self.metrics.record_session_created();
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    async fn get(&self, id: &str) -> Result<SessionState> {
        Ok(self.lock(id).await?.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions
            .remove(id)
            .map(|_| info!(session_id = %id, "session ended"))
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))
    }

    async fn submit_mood(&self, id: &str, text: &str) -> Result<Option<MoodOutcome>> {
        let mut session = self.lock(id).await?;

        if text.trim().is_empty() {
            debug!(session_id = %id, "blank mood input ignored");
            return Ok(None);
        }

        let analysis = self.mapper.analyze(text)?;
        let event = MoodEvent::new(text, analysis.polarity, analysis.mood);
        self.journal.append_mood(&event).await?;

        let was_breathing = session.is_breathing();
        session.apply_detection(analysis.mood);
        if was_breathing && !session.is_breathing() {
            self.metrics.record_breathing_cancelled();
            info!(session_id = %id, "breathing exercise cancelled by new mood");
        }
        self.metrics.record_mood(analysis.mood);
        info!(
            session_id = %id,
            mood = %analysis.mood,
            polarity = analysis.polarity,
            show_breathing = session.show_breathing,
            "mood detected"
        );

        Ok(Some(MoodOutcome {
            analysis,
            event,
            session: session.clone(),
        }))
    }

    async fn start_breathing(&self, id: &str) -> Result<BreathingSnapshot> {
        let mut session = self.lock(id).await?;
        let now = Instant::now();
        let snapshot = session.start_breathing(self.plan, now)?.snapshot_at(now);

        self.metrics.record_breathing_started();
        info!(
            session_id = %id,
            exercise_id = %snapshot.exercise_id,
            total_ms = self.plan.total_duration().as_millis() as u64,
            "breathing exercise started"
        );
        Ok(snapshot)
    }

    async fn breathing_snapshot(&self, id: &str) -> Result<BreathingSnapshot> {
        let session = self.lock(id).await?;
        Self::current_snapshot(&session, Instant::now())
    }

    async fn cancel_breathing(&self, id: &str) -> Result<BreathingSnapshot> {
        let mut session = self.lock(id).await?;
        let now = Instant::now();
        if !session.cancel_breathing(now) {
            return Err(AppError::Conflict(
                "no breathing exercise is running".to_string(),
            ));
        }

        self.metrics.record_breathing_cancelled();
        info!(session_id = %id, "breathing exercise cancelled");
        Self::current_snapshot(&session, now)
    }

    async fn save_reflection(&self, id: &str, text: &str) -> Result<ReflectionOutcome> {
        let mut session = self.lock(id).await?;
        if !session.reflection_unlocked {
            return Err(AppError::Conflict(
                "complete a breathing exercise before saving a reflection".to_string(),
            ));
        }

        let reflection = Reflection::new(text);
        match self.journal.append_reflection(&reflection).await {
            Ok(()) => {
                session.complete_reflection();
                self.metrics.record_reflection(true);
                info!(session_id = %id, "reflection saved");
                Ok(ReflectionOutcome {
                    saved: true,
                    message: REFLECTION_SAVED_MESSAGE.to_string(),
                    session: session.clone(),
                })
            }
            Err(e) => {
                let detail = match &e {
                    AppError::Io(msg) => msg.clone(),
                    other => other.to_string(),
                };
                self.metrics.record_reflection(false);
                warn!(session_id = %id, error = %detail, "failed to save reflection");
                Ok(ReflectionOutcome {
                    saved: false,
                    message: format!("Failed to save reflection: {}", detail),
                    session: session.clone(),
                })
            }
        }
    }

    async fn open_feedback(&self, id: &str) -> Result<SessionState> {
        let mut session = self.lock(id).await?;
        session.open_feedback()?;
        debug!(session_id = %id, "feedback form opened");
        Ok(session.clone())
    }

    async fn submit_feedback(&self, id: &str, input: FeedbackInput) -> Result<FeedbackOutcome> {
        if !(1..=5).contains(&input.post_mood_rating) {
            return Err(AppError::Validation(format!(
                "post_mood_rating must be between 1 and 5, got {}",
                input.post_mood_rating
            )));
        }

        let mut session = self.lock(id).await?;
        let mood = session.feedback_target()?;
        let event = FeedbackEvent::new(
            mood,
            input.post_mood_rating,
            input.supported,
            &input.comment,
        );
        self.journal.append_feedback(&event).await?;

        session.record_feedback();
        self.metrics.record_feedback();
        info!(
            session_id = %id,
            mood = %mood,
            rating = input.post_mood_rating,
            supported = input.supported,
            "feedback recorded"
        );

        Ok(FeedbackOutcome {
            event,
            message: FEEDBACK_THANKS_MESSAGE.to_string(),
            session: session.clone(),
        })
    }

    async fn reset(&self, id: &str) -> Result<SessionState> {
        let mut session = self.lock(id).await?;
        if session.cancel_breathing(Instant::now()) {
            self.metrics.record_breathing_cancelled();
        }
        session.reset();
        info!(session_id = %id, "session reset");
        Ok(session.clone())
    }

    fn count(&self) -> usize {
        self.sessions.len()
    }

    fn evict_idle(&self, idle_ttl: Duration) -> usize {
        let now = Utc::now();
        let mut evicted = 0;
        self.sessions.retain(|_, session| match session.try_lock() {
            Ok(state) => {
                let idle = (now - state.last_active_at).to_std().unwrap_or_default();
                let keep = idle < idle_ttl;
                if !keep {
                    evicted += 1;
                }
                keep
            }
            Err(_) => true,
        });

        if evicted > 0 {
            self.metrics.record_sessions_evicted(evicted);
            info!(evicted, remaining = self.sessions.len(), "idle sessions evicted");
        }
        evicted
    }
}

/// 后台定期回收空闲会话
pub fn spawn_idle_sweeper(
    service: Arc<dyn SessionService>,
    idle_ttl: Duration,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // 第一次 tick 立即返回
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = service.evict_idle(idle_ttl);
            debug!(evicted, "idle session sweep finished");
        }
    })
}

/// 创建会话服务
pub fn create_session_service(
    mapper: MoodMapper,
    journal: Arc<dyn Journal>,
    plan: BreathingPlan,
    metrics: Arc<AppMetrics>,
) -> Box<dyn SessionService> {
    Box::new(SessionServiceImpl::new(mapper, journal, plan, metrics))
}
