//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量管理

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "TRANSLATE_GATEWAY_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 翻译服务凭证，未设置时网关直接返回原文
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "GOOGLE_TRANSLATE_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str =
            "Credential for the remote translation provider (unset = pass-through mode)";

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key is empty".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }

    /// 翻译服务地址
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "TRANSLATE_GATEWAY_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::config::constants::DEFAULT_API_URL.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Remote translation provider endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            match url::Url::parse(url) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                    Ok(url.to_string())
                }
                Ok(parsed) => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Unsupported URL scheme '{}'", parsed.scheme()),
                }),
                Err(e) => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid URL: {}", e),
                }),
            }
        }
    }

    /// 默认源语言
    pub struct SourceLang;
    impl EnvVar<String> for SourceLang {
        const NAME: &'static str = "TRANSLATE_GATEWAY_SOURCE_LANG";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::translation::config::constants::DEFAULT_SOURCE_LANG.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Default source language (ISO 639-1 code)";

        fn parse(value: &str) -> EnvResult<String> {
            let lang = value.trim().to_lowercase();
            if lang.len() != 2 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Language code must be 2 characters (ISO 639-1)".to_string(),
                });
            }
            Ok(lang)
        }
    }

    /// 单次请求超时
    pub struct RequestTimeout;
    impl EnvVar<Duration> for RequestTimeout {
        const NAME: &'static str = "TRANSLATE_GATEWAY_REQUEST_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(10));
        const DESCRIPTION: &'static str = "Provider request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let secs = parse_positive_usize(value, Self::NAME, 1, 300)?;
            Ok(Duration::from_secs(secs as u64))
        }
    }
}

/// 缓存相关环境变量
pub mod cache {
    use super::*;

    /// 缓存容量，0 表示禁用缓存
    pub struct Capacity;
    impl EnvVar<usize> for Capacity {
        const NAME: &'static str = "TRANSLATE_GATEWAY_CACHE_CAPACITY";
        const DEFAULT: Option<usize> = Some(10_000);
        const DESCRIPTION: &'static str = "Maximum number of cached translations (0 disables caching)";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 0, 10_000_000)
        }
    }
}

/// Web服务相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "TRANSLATE_GATEWAY_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Address the HTTP server binds to";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Bind address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "TRANSLATE_GATEWAY_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Port the HTTP server listens on";

        fn parse(value: &str) -> EnvResult<u16> {
            let port = parse_positive_usize(value, Self::NAME, 1, u16::MAX as usize)?;
            Ok(port as u16)
        }
    }

    /// CORS允许的源
    pub struct CorsOrigins;
    impl EnvVar<Vec<String>> for CorsOrigins {
        const NAME: &'static str = "TRANSLATE_GATEWAY_CORS_ORIGINS";
        const DEFAULT: Option<Vec<String>> = None;

        fn get() -> EnvResult<Vec<String>> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(vec!["*".to_string()]),
            }
        }
        const DESCRIPTION: &'static str = "CORS allowed origins (comma-separated)";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect())
        }
    }
}

fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    let rows: [(&str, &str); 9] = [
        (core::LogLevel::NAME, core::LogLevel::DESCRIPTION),
        (translation::ApiKey::NAME, translation::ApiKey::DESCRIPTION),
        (translation::ApiUrl::NAME, translation::ApiUrl::DESCRIPTION),
        (translation::SourceLang::NAME, translation::SourceLang::DESCRIPTION),
        (translation::RequestTimeout::NAME, translation::RequestTimeout::DESCRIPTION),
        (cache::Capacity::NAME, cache::Capacity::DESCRIPTION),
        (web::BindAddress::NAME, web::BindAddress::DESCRIPTION),
        (web::Port::NAME, web::Port::DESCRIPTION),
        (web::CorsOrigins::NAME, web::CorsOrigins::DESCRIPTION),
    ];

    for (name, description) in rows {
        docs.push_str(&format!("- `{}`: {}\n", name, description));
    }

    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(core::LogLevel::parse("DEBUG").unwrap(), "debug");
        assert_eq!(core::LogLevel::parse("warn").unwrap(), "warn");
        assert!(core::LogLevel::parse("verbose").is_err());
    }

    #[test]
    fn test_api_key_rejects_blank() {
        assert_eq!(translation::ApiKey::parse("  abc123 ").unwrap(), "abc123");
        assert!(translation::ApiKey::parse("   ").is_err());
    }

    #[test]
    fn test_url_validation() {
        assert!(translation::ApiUrl::parse("http://localhost:1188/translate").is_ok());
        assert!(translation::ApiUrl::parse("https://translation.googleapis.com/language/translate/v2").is_ok());

        assert!(translation::ApiUrl::parse("ftp://example.com").is_err());
        assert!(translation::ApiUrl::parse("not-a-url").is_err());
    }

    #[test]
    fn test_source_lang_validation() {
        assert_eq!(translation::SourceLang::parse(" EN ").unwrap(), "en");
        assert!(translation::SourceLang::parse("english").is_err());
    }

    #[test]
    fn test_numeric_validation() {
        assert_eq!(cache::Capacity::parse("0").unwrap(), 0);
        assert_eq!(cache::Capacity::parse("500").unwrap(), 500);
        assert!(cache::Capacity::parse("-1").is_err());

        assert_eq!(
            translation::RequestTimeout::parse("15").unwrap(),
            Duration::from_secs(15)
        );
        assert!(translation::RequestTimeout::parse("0").is_err());

        assert_eq!(web::Port::parse("8080").unwrap(), 8080);
        assert!(web::Port::parse("70000").is_err());
    }

    #[test]
    fn test_cors_origins_parsing() {
        let origins = web::CorsOrigins::parse("https://a.example, ,https://b.example").unwrap();
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_env_docs_lists_credential() {
        let docs = generate_env_docs();
        assert!(docs.contains("GOOGLE_TRANSLATE_API_KEY"));
        assert!(docs.contains("TRANSLATE_GATEWAY_CACHE_CAPACITY"));
    }
}
