//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制。网关本身从不把这些错误交给调用方，
//! 它们只在内部传播，最终被记录并降级为原文。

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 超时错误
    #[error("操作超时: {0}")]
    TimeoutError(String),

    /// 翻译服务返回非成功状态
    #[error("翻译服务错误 (HTTP {status}): {message}")]
    ProviderError { status: u16, message: String },

    /// 响应格式不符合预期
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::TimeoutError(_) => ErrorSeverity::Warning,
            TranslationError::ProviderError { status, .. } if *status >= 500 => {
                ErrorSeverity::Warning
            }
            TranslationError::ProviderError { .. } => ErrorSeverity::Error,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::TimeoutError(_) => ErrorCategory::Timeout,
            TranslationError::ProviderError { .. } => ErrorCategory::Service,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 按严重程度记录错误
    pub fn log(&self, context: &str) {
        match self.severity() {
            ErrorSeverity::Info => tracing::info!(category = ?self.category(), "{}: {}", context, self),
            ErrorSeverity::Warning => tracing::warn!(category = ?self.category(), "{}: {}", context, self),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                tracing::error!(category = ?self.category(), "{}: {}", context, self)
            }
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(self, context: T) -> Self {
        let new_msg = |msg: String| format!("{} (上下文: {})", msg, context);

        match self {
            TranslationError::ConfigError(msg) => TranslationError::ConfigError(new_msg(msg)),
            TranslationError::NetworkError(msg) => TranslationError::NetworkError(new_msg(msg)),
            TranslationError::TimeoutError(msg) => TranslationError::TimeoutError(new_msg(msg)),
            TranslationError::ProviderError { status, message } => TranslationError::ProviderError {
                status,
                message: new_msg(message),
            },
            TranslationError::ParseError(msg) => TranslationError::ParseError(new_msg(msg)),
            TranslationError::InvalidInput(msg) => TranslationError::InvalidInput(new_msg(msg)),
            TranslationError::InternalError(msg) => TranslationError::InternalError(new_msg(msg)),
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Timeout,
    Service,
    Parsing,
    Input,
    Internal,
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslationError::TimeoutError(error.to_string())
        } else if error.is_decode() {
            TranslationError::ParseError(format!("响应解码失败: {}", error))
        } else if let Some(status) = error.status() {
            TranslationError::ProviderError {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

impl From<crate::env::EnvError> for TranslationError {
    fn from(error: crate::env::EnvError) -> Self {
        TranslationError::ConfigError(error.to_string())
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;
