//! 存储模块
//!
//! 提供翻译缓存和用户语言偏好存储。

pub mod cache;
pub mod preferences;

pub use cache::{create_cache, CacheKey, CacheStats, LocalCache, NoopCache, TranslationCache};
pub use preferences::{
    InMemoryPreferenceStore, LanguagePreferences, PreferenceStore, StoredPreferences,
};
