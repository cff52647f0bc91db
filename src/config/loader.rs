use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序（后者覆盖前者）：
    /// 1. 环境默认值（MOODMATE_ENVIRONMENT=production 时为生产配置，否则为开发配置）
    /// 2. ./moodmate.toml
    /// 3. MOODMATE_ 前缀的环境变量，如 MOODMATE_SERVER__PORT=9000
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(Self::defaults()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MOODMATE_").split("__"))
    }

    fn defaults() -> AppConfig {
        match std::env::var("MOODMATE_ENVIRONMENT").as_deref() {
            Ok("production") => AppConfig::production(),
            _ => AppConfig::development(),
        }
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        let journal = &config.journal;
        for (name, path) in [
            ("journal.mood_log_path", &journal.mood_log_path),
            ("journal.reflection_path", &journal.reflection_path),
            ("journal.feedback_log_path", &journal.feedback_log_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigValidationError::InvalidPath(name.to_string()));
            }
        }

        if config.breathing.time_unit_ms == 0 || config.breathing.cycles == 0 {
            return Err(ConfigValidationError::InvalidBreathing);
        }

        if config.breathing.stream_tick_ms == 0 {
            return Err(ConfigValidationError::InvalidBreathing);
        }

        let sessions = &config.sessions;
        if sessions.session_idle_ttl_secs == 0 || sessions.sweep_interval_secs == 0 {
            return Err(ConfigValidationError::InvalidSessions);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("配置路径无效: {0}")]
    InvalidPath(String),

    #[error("呼吸练习配置无效，时间单位、循环次数与推送间隔都必须大于 0")]
    InvalidBreathing,

    #[error("会话配置无效，空闲超时与扫描间隔都必须大于 0")]
    InvalidSessions,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("moodmate.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_is_valid() {
        let config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());
        assert_eq!(config.breathing.cycles, 3);
        assert_eq!(config.journal.mood_log_path, PathBuf::from("mood_logs.csv"));
    }

    #[test]
    fn test_production_overrides() {
        let config = AppConfig::production();
        assert_eq!(config.environment, "production");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.structured);
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = AppConfig::development();
        config.server.port = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPort)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let mut config = AppConfig::development();
        config.journal.feedback_log_path = PathBuf::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPath(ref name)) if name == "journal.feedback_log_path"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_time_unit() {
        let mut config = AppConfig::development();
        config.breathing.time_unit_ms = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidBreathing)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_session_ttl() {
        let mut config = AppConfig::development();
        config.sessions.session_idle_ttl_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidSessions)
        ));
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = ConfigLoader::load_from(PathBuf::from("does-not-exist.toml")).unwrap();
        assert_eq!(config.app_name, "moodmate");
        assert_eq!(config.breathing.time_unit_ms, 1000);
    }

    #[test]
    fn test_load_from_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moodmate.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9100\n\n[breathing]\ntime_unit_ms = 10\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from(path).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.breathing.time_unit_ms, 10);
        assert_eq!(config.breathing.cycles, 3);
    }
}
