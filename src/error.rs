//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 解析错误（JSON格式或结构不符合翻译表约定）
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 本地资源读取错误
    #[error("读取源失败: {0}")]
    SourceReadError(String),

    /// 网络错误（非200状态码或传输失败）
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 缓存错误
    #[error("缓存错误: {0}")]
    CacheError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 检查错误是否可重试
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::NetworkError(_) => true,
            TranslationError::CacheError(_) => true,
            TranslationError::ParseError(_) => false,
            TranslationError::SourceReadError(_) => false,
            TranslationError::ConfigError(_) => false,
            TranslationError::InternalError(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::SourceReadError(_) => ErrorSeverity::Error,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::CacheError(_) => ErrorSeverity::Warning,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 原始错误消息（不含类别前缀），用于对宿主上报
    pub fn detail(&self) -> &str {
        match self {
            TranslationError::ParseError(msg)
            | TranslationError::SourceReadError(msg)
            | TranslationError::NetworkError(msg)
            | TranslationError::ConfigError(msg)
            | TranslationError::CacheError(msg)
            | TranslationError::InternalError(msg) => msg,
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

/// 标准错误转换
impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::SourceReadError(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        TranslationError::NetworkError(error.to_string())
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录并返回错误
    pub fn log_error<T>(error: TranslationError) -> TranslationResult<T> {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("翻译信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!("翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("翻译严重错误: {}", error),
        }

        Err(error)
    }

    /// 创建解析错误
    pub fn parse_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ParseError(msg.to_string())
    }

    /// 创建源读取错误
    pub fn source_read_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::SourceReadError(msg.to_string())
    }

    /// 创建网络错误
    pub fn network_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::NetworkError(msg.to_string())
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建缓存错误
    pub fn cache_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::CacheError(msg.to_string())
    }
}
