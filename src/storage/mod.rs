//! 存储模块
//!
//! 只追加的本地日志文件。

pub mod csv;
pub mod journal;

pub use journal::{FileJournal, Journal};
