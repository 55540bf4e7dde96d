//! 翻译模块
//!
//! 课程内容的自动翻译层：在远程机器翻译服务之上提供缓存与降级。
//!
//! - **core**: 翻译网关（单条、批量、同语言直通、失败降级）
//! - **provider**: 远程翻译服务接口及 Google Translate 实现
//! - **storage**: 翻译缓存和用户语言偏好
//! - **relay**: 不持有凭证的调用方使用的转发客户端
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use translation_gateway::translation::{load_translation_config, TranslationGateway};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_translation_config();
//! let gateway = TranslationGateway::from_config(&config)?;
//!
//! let title = gateway.translate("Introduction to Algebra", "es", None).await;
//! let lessons = gateway
//!     .translate_batch(&["Lesson 1".to_string(), "Lesson 2".to_string()], "es", None)
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod languages;
pub mod protocol;
pub mod provider;
pub mod relay;
pub mod storage;

pub use self::core::{ServiceStats, ServiceStatsSnapshot, TranslationGateway};
pub use config::{constants, load_translation_config, ConfigManager, TranslationConfig};
pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};
pub use languages::{find_language, is_supported, supported_languages, Language};
pub use provider::{GoogleTranslateProvider, TranslationProvider};
pub use relay::{PreferredTranslations, RelayClient};
pub use storage::{
    create_cache, CacheKey, CacheStats, InMemoryPreferenceStore, LanguagePreferences,
    LocalCache, NoopCache, PreferenceStore, StoredPreferences, TranslationCache,
};
