//! MoodMate - 心情记录与呼吸练习服务
//!
//! 用户写下一句话，服务识别出心情并给出鼓励语；低落或有压力时引导完成一次
//! 定时呼吸练习，之后写下反思并留下反馈。所有记录追加写入本地文件。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
pub mod storage;
