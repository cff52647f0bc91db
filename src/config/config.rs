use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 是否允许跨域访问
    pub cors_permissive: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式（JSON）
    pub structured: bool,
}

/// 日志文件（心情记录、反思、反馈）配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JournalConfig {
    /// 心情记录 CSV 路径
    pub mood_log_path: PathBuf,
    /// 反思文本文件路径
    pub reflection_path: PathBuf,
    /// 反馈 CSV 路径
    pub feedback_log_path: PathBuf,
}

/// 呼吸练习配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BreathingConfig {
    /// 一个时间单位的毫秒数
    pub time_unit_ms: u64,
    /// 循环次数
    pub cycles: u32,
    /// 进度推送间隔（毫秒）
    pub stream_tick_ms: u64,
}

/// 输入限制
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LimitsConfig {
    /// 心情输入最大字符数
    pub max_input_chars: usize,
    /// 反思/评论最大字符数
    pub max_note_chars: usize,
}

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// 超过该秒数未活动的会话会被回收
    pub session_idle_ttl_secs: u64,
    /// 回收扫描间隔（秒）
    pub sweep_interval_secs: u64,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 日志文件配置
    pub journal: JournalConfig,
    /// 呼吸练习配置
    pub breathing: BreathingConfig,
    /// 输入限制
    pub limits: LimitsConfig,
    /// 会话配置
    pub sessions: SessionConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8501,
                cors_permissive: true,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
            },
            journal: JournalConfig {
                mood_log_path: PathBuf::from("mood_logs.csv"),
                reflection_path: PathBuf::from("reflections.txt"),
                feedback_log_path: PathBuf::from("user_feedback.csv"),
            },
            breathing: BreathingConfig {
                time_unit_ms: 1000,
                cycles: 3,
                stream_tick_ms: 100,
            },
            limits: LimitsConfig {
                max_input_chars: 2_000,
                max_note_chars: 10_000,
            },
            sessions: SessionConfig {
                session_idle_ttl_secs: 1800,
                sweep_interval_secs: 60,
            },
            app_name: "moodmate".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.server.host = "0.0.0.0".into();
        config.server.cors_permissive = false;
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}
