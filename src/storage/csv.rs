//! 追加写入用的极简 CSV 编码
//!
//! 只需要写，不需要读：表头固定、逐行追加，字段按需加引号。

use crate::models::journal_entry::{FeedbackEvent, MoodEvent};

/// CSV 与日志使用的时间格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 可写成一行 CSV 的记录，列集合与顺序固定
pub trait CsvRecord {
    /// 表头列名
    const HEADER: &'static [&'static str];

    /// 与表头一一对应的字段值
    fn fields(&self) -> Vec<String>;
}

impl CsvRecord for MoodEvent {
    const HEADER: &'static [&'static str] = &["timestamp", "user_input", "polarity", "mood"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.user_input.clone(),
            format_float(self.polarity),
            self.mood.to_string(),
        ]
    }
}

impl CsvRecord for FeedbackEvent {
    const HEADER: &'static [&'static str] = &[
        "timestamp",
        "detected_mood",
        "post_mood_rating",
        "supported",
        "user_comment",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            self.detected_mood.to_string(),
            self.post_mood_rating.to_string(),
            if self.supported { "Yes" } else { "No" }.to_string(),
            self.user_comment.clone(),
        ]
    }
}

/// Escape a string for CSV format
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// 浮点数使用最短表示，整数值保留 ".0"（0.0、-0.5、0.6875）
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// 表头行（含换行）
pub fn header_line<R: CsvRecord>() -> String {
    let mut line = R::HEADER.join(",");
    line.push('\n');
    line
}

/// 记录行（含换行）
pub fn record_line<R: CsvRecord>(record: &R) -> String {
    let mut line = record
        .fields()
        .iter()
        .map(|f| escape_csv(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    #[test]
    fn test_escape_csv_plain() {
        assert_eq!(escape_csv("hello"), "hello");
    }

    #[test]
    fn test_escape_csv_comma_and_quote() {
        assert_eq!(escape_csv("tired, sad"), "\"tired, sad\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(0.6875), "0.6875");
    }

    #[test]
    fn test_mood_event_line() {
        let event = MoodEvent::new("I'm fine, thanks", 0.0, Mood::Neutral);
        let line = record_line(&event);
        let ts = event.timestamp.format(TIMESTAMP_FORMAT).to_string();
        assert_eq!(line, format!("{},\"I'm fine, thanks\",0.0,neutral\n", ts));
        assert_eq!(header_line::<MoodEvent>(), "timestamp,user_input,polarity,mood\n");
    }

    #[test]
    fn test_feedback_line() {
        let event = FeedbackEvent::new(Mood::Happy, 5, true, "great");
        let line = record_line(&event);
        assert!(line.ends_with(",happy,5,Yes,great\n"));
        assert_eq!(
            header_line::<FeedbackEvent>(),
            "timestamp,detected_mood,post_mood_rating,supported,user_comment\n"
        );

        let declined = FeedbackEvent::new(Mood::Sad, 2, false, "");
        assert!(record_line(&declined).ends_with(",sad,2,No,\n"));
    }
}
