//! 翻译网关核心模块
//!
//! ```text
//! TranslationGateway (gateway.rs)
//!     ├── TranslationProvider (provider/)
//!     └── TranslationCache (storage/cache.rs)
//! ```

pub mod gateway;

pub use gateway::{ServiceStats, ServiceStatsSnapshot, TranslationGateway};
