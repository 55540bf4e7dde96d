//! # Translation Gateway
//!
//! 为课程内容提供带缓存与降级的自动翻译服务。
//!
//! ## 模块组织
//!
//! - `translation` - 翻译网关、缓存、远程服务与转发客户端
//! - `env` - 类型安全的环境变量
//! - `web` - HTTP 端点（可选）

pub mod env;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

pub use translation::{TranslationConfig, TranslationGateway};
