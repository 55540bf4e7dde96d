//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslationConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 默认API设置
    pub const DEFAULT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
    pub const DEFAULT_SOURCE_LANG: &str = "en";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    // 缓存设置
    pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "translation-gateway.toml",
        "config.toml",
        "~/.config/translation-gateway/config.toml",
    ];

    // .env 文件，按优先级排列
    pub const ENV_FILES: &[&str] = &[".env.local", ".env.development", ".env.production", ".env"];
}

/// 加载翻译配置
///
/// 配置文件或环境变量无效时，回退到只应用环境变量的默认配置；
/// 回退配置仍然无效则使用纯默认配置。
pub fn load_translation_config() -> TranslationConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.into_config(),
        Err(e) => {
            tracing::warn!("配置加载失败，回退到默认配置: {}", e);
            let mut config = TranslationConfig::default();
            config.apply_env_overrides();

            match config.validate() {
                Ok(()) => config,
                Err(e) => {
                    tracing::warn!("环境变量覆盖无效，忽略: {}", e);
                    TranslationConfig::default()
                }
            }
        }
    }
}
