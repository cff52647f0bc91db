//! 呼吸练习状态机
//!
//! 每个循环依次经过吸气（4 个时间单位）、屏息（2 个）、呼气（4 个），
//! 每个阶段的进度条分 100 步推进。练习以开始时刻为锚点，任意时刻的
//! 进度都由已流逝时间推算，因此不需要阻塞等待，也可以随时取消。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// 每个阶段进度条的离散步数
pub const PROGRESS_STEPS: u32 = 100;

/// 练习开始时展示的标题
pub fn breathing_heading(cycles: u32) -> String {
    format!("🧘 Breathe with Me. Repeat {} times.", cycles)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    pub const SEQUENCE: [BreathingPhase; 3] = [
        BreathingPhase::Inhale,
        BreathingPhase::Hold,
        BreathingPhase::Exhale,
    ];

    /// 阶段时长（时间单位数）
    pub fn units(&self) -> u32 {
        match self {
            BreathingPhase::Inhale => 4,
            BreathingPhase::Hold => 2,
            BreathingPhase::Exhale => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BreathingPhase::Inhale => "Inhale... 🌬️",
            BreathingPhase::Hold => "Hold... ✋",
            BreathingPhase::Exhale => "Exhale... 😌",
        }
    }
}

/// 练习计划：时间单位长度与循环次数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingPlan {
    pub time_unit: Duration,
    pub cycles: u32,
}

impl Default for BreathingPlan {
    fn default() -> Self {
        Self {
            time_unit: Duration::from_secs(1),
            cycles: 3,
        }
    }
}

impl BreathingPlan {
    pub fn new(time_unit: Duration, cycles: u32) -> Self {
        Self { time_unit, cycles }
    }

    pub fn phase_duration(&self, phase: BreathingPhase) -> Duration {
        self.time_unit * phase.units()
    }

    pub fn cycle_duration(&self) -> Duration {
        BreathingPhase::SEQUENCE
            .iter()
            .map(|p| self.phase_duration(*p))
            .sum()
    }

    pub fn total_duration(&self) -> Duration {
        self.cycle_duration() * self.cycles
    }

    /// 根据已流逝时间计算进度
    pub fn progress_at(&self, elapsed: Duration) -> BreathingProgress {
        let total = self.total_duration();
        if elapsed >= total || total.is_zero() {
            return BreathingProgress {
                cycle: self.cycles,
                phase: BreathingPhase::Exhale,
                step: PROGRESS_STEPS,
                overall: 1.0,
                finished: true,
            };
        }

        let cycle_nanos = self.cycle_duration().as_nanos();
        let elapsed_nanos = elapsed.as_nanos();
        let cycle_index = (elapsed_nanos / cycle_nanos) as u32;
        let mut within = elapsed_nanos % cycle_nanos;

        let mut phase = BreathingPhase::Exhale;
        let mut step = PROGRESS_STEPS;
        for candidate in BreathingPhase::SEQUENCE {
            let phase_nanos = self.phase_duration(candidate).as_nanos();
            if within < phase_nanos {
                phase = candidate;
                step = (within * PROGRESS_STEPS as u128 / phase_nanos) as u32;
                break;
            }
            within -= phase_nanos;
        }

        BreathingProgress {
            cycle: cycle_index + 1,
            phase,
            step,
            overall: elapsed_nanos as f64 / total.as_nanos() as f64,
            finished: false,
        }
    }
}

/// 某一时刻的进度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathingProgress {
    /// 当前循环（从 1 开始）
    pub cycle: u32,
    pub phase: BreathingPhase,
    /// 当前阶段已推进的步数，0..=100
    pub step: u32,
    /// 整体完成比例，0.0..=1.0
    pub overall: f64,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreathingStatus {
    Running,
    Completed,
    Cancelled,
}

/// 一次呼吸练习
#[derive(Debug, Clone)]
pub struct BreathingExercise {
    pub id: String,
    pub plan: BreathingPlan,
    pub status: BreathingStatus,
    pub started_at: DateTime<Utc>,
    anchor: Instant,
    /// 完成或取消时冻结的流逝时间
    stopped_elapsed: Option<Duration>,
}

impl BreathingExercise {
    pub fn start(plan: BreathingPlan, now: Instant) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            plan,
            status: BreathingStatus::Running,
            started_at: Utc::now(),
            anchor: now,
            stopped_elapsed: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == BreathingStatus::Running
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.stopped_elapsed {
            Some(elapsed) => elapsed,
            None => now.saturating_duration_since(self.anchor),
        }
    }

    /// 若已到达终点则转为 Completed；只在首次转换时返回 true
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        let elapsed = self.elapsed_at(now);
        if elapsed < self.plan.total_duration() {
            return false;
        }
        self.status = BreathingStatus::Completed;
        self.stopped_elapsed = Some(self.plan.total_duration());
        true
    }

    /// 取消仍在进行的练习，返回是否真的取消了
    pub fn cancel(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        self.stopped_elapsed = Some(self.elapsed_at(now));
        self.status = BreathingStatus::Cancelled;
        true
    }

    pub fn snapshot_at(&self, now: Instant) -> BreathingSnapshot {
        let elapsed = self.elapsed_at(now);
        let progress = self.plan.progress_at(elapsed);
        let total = self.plan.total_duration();

        BreathingSnapshot {
            exercise_id: self.id.clone(),
            status: self.status,
            heading: breathing_heading(self.plan.cycles),
            cycle: progress.cycle,
            total_cycles: self.plan.cycles,
            cycle_label: format!("Cycle {} of {}", progress.cycle, self.plan.cycles),
            phase: progress.phase,
            phase_label: progress.phase.label().to_string(),
            step: progress.step,
            steps_per_phase: PROGRESS_STEPS,
            overall_progress: progress.overall,
            elapsed_ms: elapsed.min(total).as_millis() as u64,
            remaining_ms: total.saturating_sub(elapsed).as_millis() as u64,
            started_at: self.started_at,
        }
    }
}

/// 对外暴露的进度快照
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreathingSnapshot {
    pub exercise_id: String,
    pub status: BreathingStatus,
    pub heading: String,
    pub cycle: u32,
    pub total_cycles: u32,
    pub cycle_label: String,
    pub phase: BreathingPhase,
    pub phase_label: String,
    pub step: u32,
    pub steps_per_phase: u32,
    pub overall_progress: f64,
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> BreathingPlan {
        BreathingPlan::new(Duration::from_millis(1000), 3)
    }

    #[test]
    fn test_durations() {
        let plan = plan();
        assert_eq!(plan.cycle_duration(), Duration::from_secs(10));
        assert_eq!(plan.total_duration(), Duration::from_secs(30));
        assert_eq!(
            plan.phase_duration(BreathingPhase::Hold),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_progress_walks_phases_in_order() {
        let plan = plan();

        let start = plan.progress_at(Duration::ZERO);
        assert_eq!(start.cycle, 1);
        assert_eq!(start.phase, BreathingPhase::Inhale);
        assert_eq!(start.step, 0);

        let mid_inhale = plan.progress_at(Duration::from_millis(2000));
        assert_eq!(mid_inhale.phase, BreathingPhase::Inhale);
        assert_eq!(mid_inhale.step, 50);

        let hold = plan.progress_at(Duration::from_millis(4500));
        assert_eq!(hold.phase, BreathingPhase::Hold);
        assert_eq!(hold.step, 25);

        let exhale = plan.progress_at(Duration::from_millis(9960));
        assert_eq!(exhale.phase, BreathingPhase::Exhale);
        assert_eq!(exhale.step, 99);
        assert_eq!(exhale.cycle, 1);

        let second = plan.progress_at(Duration::from_millis(10_000));
        assert_eq!(second.cycle, 2);
        assert_eq!(second.phase, BreathingPhase::Inhale);
        assert_eq!(second.step, 0);

        let third = plan.progress_at(Duration::from_millis(26_000));
        assert_eq!(third.cycle, 3);
        assert_eq!(third.phase, BreathingPhase::Exhale);
        assert!(!third.finished);
    }

    #[test]
    fn test_progress_finishes_at_total() {
        let progress = plan().progress_at(Duration::from_secs(30));
        assert!(progress.finished);
        assert_eq!(progress.cycle, 3);
        assert_eq!(progress.step, PROGRESS_STEPS);
        assert_eq!(progress.overall, 1.0);
    }

    #[test]
    fn test_poll_completes_exactly_once() {
        let now = Instant::now();
        let mut exercise = BreathingExercise::start(plan(), now);

        assert!(!exercise.poll(now + Duration::from_secs(29)));
        assert!(exercise.is_running());

        assert!(exercise.poll(now + Duration::from_secs(31)));
        assert_eq!(exercise.status, BreathingStatus::Completed);
        assert!(!exercise.poll(now + Duration::from_secs(40)));

        let snapshot = exercise.snapshot_at(now + Duration::from_secs(90));
        assert_eq!(snapshot.elapsed_ms, 30_000);
        assert_eq!(snapshot.remaining_ms, 0);
        assert_eq!(snapshot.cycle_label, "Cycle 3 of 3");
        assert_eq!(snapshot.heading, "🧘 Breathe with Me. Repeat 3 times.");
    }

    #[test]
    fn test_cancel_freezes_progress() {
        let now = Instant::now();
        let mut exercise = BreathingExercise::start(plan(), now);

        assert!(exercise.cancel(now + Duration::from_secs(5)));
        assert_eq!(exercise.status, BreathingStatus::Cancelled);
        assert!(!exercise.cancel(now + Duration::from_secs(6)));
        assert!(!exercise.poll(now + Duration::from_secs(60)));

        let snapshot = exercise.snapshot_at(now + Duration::from_secs(60));
        assert_eq!(snapshot.elapsed_ms, 5_000);
        assert_eq!(snapshot.phase, BreathingPhase::Hold);
        assert_eq!(snapshot.phase_label, "Hold... ✋");
    }
}
