//! Boutique 控制台 REST API 请求助手
//!
//! 以 JSON 发送请求并解析 JSON 响应；非成功状态转换为带服务端错误信息的
//! `AppError::Api`。不重试、不设超时。

pub mod client;

pub use client::{ApiClient, Method};
