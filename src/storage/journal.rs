//! 日志文件写入
//!
//! 三个互相独立的只追加文件：心情记录、反思、反馈。每次写入都是
//! 打开（不存在则创建并写表头）、追加一行、关闭；不重试，也不跨文件保证一致。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::config::JournalConfig;
use crate::error::Result;
use crate::models::journal_entry::{FeedbackEvent, MoodEvent, Reflection};
use crate::storage::csv::{CsvRecord, header_line, record_line};

/// 反思行使用的完整时间格式（精确到微秒）
pub const REFLECTION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// 日志写入 trait
#[async_trait]
pub trait Journal: Send + Sync {
    /// 启动时确保心情记录文件存在且带表头
    async fn initialize(&self) -> Result<()>;

    /// 追加心情记录
    async fn append_mood(&self, event: &MoodEvent) -> Result<()>;

    /// 追加反思
    async fn append_reflection(&self, reflection: &Reflection) -> Result<()>;

    /// 追加反馈
    async fn append_feedback(&self, event: &FeedbackEvent) -> Result<()>;
}

/// 基于本地文件的日志实现
#[derive(Debug, Clone)]
pub struct FileJournal {
    mood_log_path: PathBuf,
    reflection_path: PathBuf,
    feedback_log_path: PathBuf,
}

impl FileJournal {
    pub fn new(config: &JournalConfig) -> Self {
        Self {
            mood_log_path: config.mood_log_path.clone(),
            reflection_path: config.reflection_path.clone(),
            feedback_log_path: config.feedback_log_path.clone(),
        }
    }

    pub fn mood_log_path(&self) -> &Path {
        &self.mood_log_path
    }

    pub fn reflection_path(&self) -> &Path {
        &self.reflection_path
    }

    pub fn feedback_log_path(&self) -> &Path {
        &self.feedback_log_path
    }

    async fn open_append(path: &Path) -> Result<fs::File> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(file)
    }

    /// 追加一行 CSV，文件为新建（或为空）时先写表头
    async fn append_csv<R: CsvRecord + Sync>(path: &Path, record: &R) -> Result<()> {
        let mut file = Self::open_append(path).await?;
        let mut buf = String::new();
        if file.metadata().await?.len() == 0 {
            debug!(path = %path.display(), "writing csv header");
            buf.push_str(&header_line::<R>());
        }
        buf.push_str(&record_line(record));
        file.write_all(buf.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// 反思行：`<完整时间> – <文本>`，文本中的换行替换为 ␤ 以保证一条一行
pub fn reflection_line(reflection: &Reflection) -> String {
    let text = reflection.text.replace("\r\n", "\n").replace('\n', "␤");
    format!(
        "{} – {}\n",
        reflection.timestamp.format(REFLECTION_TIMESTAMP_FORMAT),
        text
    )
}

#[async_trait]
impl Journal for FileJournal {
    async fn initialize(&self) -> Result<()> {
        let mut file = Self::open_append(&self.mood_log_path).await?;
        if file.metadata().await?.len() == 0 {
            file.write_all(header_line::<MoodEvent>().as_bytes()).await?;
            file.flush().await?;
            info!(path = %self.mood_log_path.display(), "mood log created");
        }
        Ok(())
    }

    async fn append_mood(&self, event: &MoodEvent) -> Result<()> {
        Self::append_csv(&self.mood_log_path, event).await
    }

    async fn append_reflection(&self, reflection: &Reflection) -> Result<()> {
        let mut file = Self::open_append(&self.reflection_path).await?;
        file.write_all(reflection_line(reflection).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn append_feedback(&self, event: &FeedbackEvent) -> Result<()> {
        Self::append_csv(&self.feedback_log_path, event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use tempfile::TempDir;

    fn journal_in(dir: &TempDir) -> FileJournal {
        FileJournal::new(&JournalConfig {
            mood_log_path: dir.path().join("mood_logs.csv"),
            reflection_path: dir.path().join("reflections.txt"),
            feedback_log_path: dir.path().join("user_feedback.csv"),
        })
    }

    #[tokio::test]
    async fn test_mood_log_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);

        for i in 0..3 {
            let event = MoodEvent::new(&format!("entry {}", i), 0.5, Mood::Happy);
            journal.append_mood(&event).await.unwrap();
        }

        let content = std::fs::read_to_string(journal.mood_log_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "timestamp,user_input,polarity,mood");
        assert!(lines[3].ends_with(",entry 2,0.5,happy"));
    }

    #[tokio::test]
    async fn test_initialize_then_append_keeps_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);

        journal.initialize().await.unwrap();
        journal.initialize().await.unwrap();
        journal
            .append_mood(&MoodEvent::new("meh", 0.0, Mood::Neutral))
            .await
            .unwrap();

        let content = std::fs::read_to_string(journal.mood_log_path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(content.matches("timestamp,user_input").count(), 1);
    }

    #[tokio::test]
    async fn test_existing_log_is_appended_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);
        std::fs::write(
            journal.mood_log_path(),
            "timestamp,user_input,polarity,mood\n2024-01-01 10:00:00,old,0.0,neutral\n",
        )
        .unwrap();

        journal
            .append_mood(&MoodEvent::new("new", -0.5, Mood::Sad))
            .await
            .unwrap();

        let content = std::fs::read_to_string(journal.mood_log_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2024-01-01 10:00:00,old,0.0,neutral");
        assert!(lines[2].ends_with(",new,-0.5,sad"));
    }

    #[tokio::test]
    async fn test_feedback_row() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);

        journal
            .append_feedback(&FeedbackEvent::new(Mood::Stressed, 5, true, "great"))
            .await
            .unwrap();

        let content = std::fs::read_to_string(journal.feedback_log_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "timestamp,detected_mood,post_mood_rating,supported,user_comment"
        );
        assert!(lines[1].ends_with(",stressed,5,Yes,great"));
    }

    #[tokio::test]
    async fn test_reflection_lines_have_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let journal = journal_in(&dir);

        journal
            .append_reflection(&Reflection::new("calmer now"))
            .await
            .unwrap();
        journal
            .append_reflection(&Reflection::new("line one\nline two"))
            .await
            .unwrap();

        let content = std::fs::read_to_string(journal.reflection_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" – calmer now"));
        assert!(lines[1].ends_with(" – line one␤line two"));
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let journal = FileJournal::new(&JournalConfig {
            mood_log_path: dir.path().join("nested/logs/mood.csv"),
            reflection_path: dir.path().join("nested/reflections.txt"),
            feedback_log_path: dir.path().join("nested/feedback.csv"),
        });

        journal.initialize().await.unwrap();
        assert!(journal.mood_log_path().exists());
    }

    #[test]
    fn test_reflection_line_format() {
        let reflection = Reflection::new("ok");
        let line = reflection_line(&reflection);
        let expected_prefix = reflection
            .timestamp
            .format(REFLECTION_TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(line, format!("{} – ok\n", expected_prefix));
        // 2024-01-01 10:00:00.123456
        assert_eq!(expected_prefix.len(), 26);
    }
}
