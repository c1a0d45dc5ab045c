//! Boutique 控制台公共模块
//!
//! 提供各 crate 共享的配置、错误类型、响应解析与数据模型。

pub mod config;
pub mod errors;
pub mod models;
pub mod response;
pub mod utils;

pub use errors::{AppError, AppResult};
