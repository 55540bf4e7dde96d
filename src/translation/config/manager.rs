//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::languages;

/// 翻译网关配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// 翻译服务凭证，为空时网关进入直通模式
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_url: String,
    pub default_source_lang: String,
    pub request_timeout_secs: u64,

    /// 缓存容量，0 表示不缓存
    pub cache_capacity: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: constants::DEFAULT_API_URL.to_string(),
            default_source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT.as_secs(),
            cache_capacity: constants::DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl TranslationConfig {
    /// 使用指定凭证创建配置
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// 凭证是否存在
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().map_or(false, |key| !key.trim().is_empty())
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.request_timeout_secs == 0 {
            return Err(TranslationError::ConfigError("请求超时不能为0".to_string()));
        }

        if !languages::is_supported(&self.default_source_lang) {
            return Err(TranslationError::ConfigError(format!(
                "不支持的默认源语言: {}",
                self.default_source_lang
            )));
        }

        match url::Url::parse(&self.api_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
            _ => Err(TranslationError::ConfigError(format!(
                "无效的翻译服务地址: {}",
                self.api_url
            ))),
        }
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{cache, translation, EnvVar};

        if let Ok(api_key) = translation::ApiKey::get() {
            self.api_key = Some(api_key);
        }

        if std::env::var(translation::ApiUrl::NAME).is_ok() {
            match translation::ApiUrl::get() {
                Ok(api_url) => {
                    tracing::info!("环境变量覆盖 API URL: {}", api_url);
                    self.api_url = api_url;
                }
                Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
            }
        }

        if std::env::var(translation::SourceLang::NAME).is_ok() {
            match translation::SourceLang::get() {
                Ok(lang) => self.default_source_lang = lang,
                Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
            }
        }

        if std::env::var(translation::RequestTimeout::NAME).is_ok() {
            match translation::RequestTimeout::get() {
                Ok(timeout) => self.request_timeout_secs = timeout.as_secs(),
                Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
            }
        }

        if std::env::var(cache::Capacity::NAME).is_ok() {
            match cache::Capacity::get() {
                Ok(capacity) => self.cache_capacity = capacity,
                Err(e) => tracing::warn!("忽略无效的环境变量: {}", e),
            }
        }
    }

    /// 转换为Duration类型
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 简化的配置管理器
pub struct ConfigManager {
    config: TranslationConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器：默认值 < 配置文件 < 环境变量
    pub fn new() -> TranslationResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 从指定文件创建配置管理器
    pub fn from_path(path: &str) -> TranslationResult<Self> {
        Self::load_dotenv();

        let expanded_path = shellexpand::tilde(path);
        let mut config = Self::load_from_file(&expanded_path)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    pub fn into_config(self) -> TranslationConfig {
        self.config
    }

    fn load_config() -> TranslationResult<TranslationConfig> {
        // 首先尝试加载 .env 文件
        Self::load_dotenv();

        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslationConfig::default())
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> TranslationResult<TranslationConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::ConfigError(format!("读取配置文件失败: {}", e)))?;

        Self::parse_config(path, &content)
    }

    /// 按扩展名解析配置内容，非 .toml 文件按 JSON 处理
    fn parse_config(path: &str, content: &str) -> TranslationResult<TranslationConfig> {
        if path.ends_with(".toml") {
            Ok(toml::from_str(content)?)
        } else {
            serde_json::from_str(content)
                .map_err(|e| TranslationError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TranslationConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslationConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.has_credential());
        assert_eq!(config.default_source_lang, "en");
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        let config = TranslationConfig::with_api_key("   ");
        assert!(!config.has_credential());
        assert!(TranslationConfig::with_api_key("k-1").has_credential());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = TranslationConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = TranslationConfig::default();
        config.default_source_lang = "xx".to_string();
        assert!(config.validate().is_err());

        let mut config = TranslationConfig::default();
        config.api_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConfigManager::parse_config(
            "translation-gateway.toml",
            "cache_capacity = 25\ndefault_source_lang = \"fr\"\n",
        )
        .unwrap();

        assert_eq!(config.cache_capacity, 25);
        assert_eq!(config.default_source_lang, "fr");
        assert_eq!(config.api_url, constants::DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_json_config() {
        let config = ConfigManager::parse_config(
            "gateway.json",
            r#"{"api_key": "secret", "request_timeout_secs": 3}"#,
        )
        .unwrap();

        assert!(config.has_credential());
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let result = ConfigManager::parse_config("config.toml", "cache_capacity = [");
        assert!(matches!(result, Err(TranslationError::ConfigError(_))));
    }

    #[test]
    fn test_example_config_round_trips() {
        let path = std::env::temp_dir().join(format!(
            "translation-gateway-example-{}.toml",
            std::process::id()
        ));
        let path = path.to_string_lossy().to_string();

        ConfigManager::generate_example_config(&path).unwrap();
        let manager = ConfigManager::from_path(&path);
        std::fs::remove_file(&path).ok();

        assert!(manager.is_ok());
    }
}
