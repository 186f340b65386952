//! 翻译配置管理
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{TranslationError, TranslationResult};

/// 翻译配置常量
pub mod constants {
    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "en";
    /// 默认持久缓存文件名
    pub const DEFAULT_CACHE_FILE: &str = "translation-cache.redb";
    /// 默认本地缓存容量
    pub const DEFAULT_LOCAL_CACHE_SIZE: usize = 1000;
    /// 默认HTTP超时（秒）
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    /// 配置文件查找路径
    pub const CONFIG_PATHS: &[&str] = &["translator-config.toml", ".translator-config.toml"];

    // 环境变量覆盖项
    pub const ENV_TARGET_LANG: &str = "TRANSLATOR_TARGET_LANG";
    pub const ENV_LOGGING_ENABLED: &str = "TRANSLATOR_LOGGING_ENABLED";
    pub const ENV_CACHE_PATH: &str = "TRANSLATOR_CACHE_PATH";
}

/// 翻译配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    // 基础配置
    /// 目标语言代码（如 "en", "es"）
    pub target_lang: String,
    /// 启用详细日志
    pub logging_enabled: bool,

    // 缓存配置
    /// 启用本地内存缓存层
    pub cache_enabled: bool,
    /// 本地缓存容量
    pub local_cache_size: usize,
    /// 持久缓存数据库路径
    pub cache_path: PathBuf,

    // 网络配置
    /// HTTP请求超时（秒）
    pub http_timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_lang: constants::DEFAULT_TARGET_LANG.to_string(),
            logging_enabled: false,
            cache_enabled: true,
            local_cache_size: constants::DEFAULT_LOCAL_CACHE_SIZE,
            cache_path: PathBuf::from(constants::DEFAULT_CACHE_FILE),
            http_timeout_secs: constants::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl TranslationConfig {
    /// 创建带指定目标语言的默认配置
    pub fn default_with_lang(target_lang: &str) -> Self {
        Self {
            target_lang: target_lang.to_string(),
            ..Self::default()
        }
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.target_lang.trim().is_empty() {
            return Err(TranslationError::ConfigError(
                "目标语言不能为空".to_string(),
            ));
        }

        if self.cache_enabled && self.local_cache_size == 0 {
            return Err(TranslationError::ConfigError(
                "启用缓存时缓存大小不能为0".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(TranslationError::ConfigError(
                "HTTP超时必须大于0".to_string(),
            ));
        }

        Ok(())
    }

    /// HTTP超时时长
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// 从TOML配置文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TranslationError::ConfigError(format!(
                "读取配置文件 {} 失败: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置：依次尝试标准配置文件，再应用环境变量覆盖。
    ///
    /// 找不到配置文件或文件无效时回退到默认值，不会失败。
    pub fn load() -> Self {
        let mut config = Self::default();

        for path in constants::CONFIG_PATHS {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(loaded) => {
                        tracing::debug!("已加载配置文件: {}", path);
                        config = loaded;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("配置文件 {} 无效，已忽略: {}", path, e);
                    }
                }
            }
        }

        config.apply_env_overrides();
        config
    }

    /// 应用环境变量覆盖
    fn apply_env_overrides(&mut self) {
        if let Ok(lang) = std::env::var(constants::ENV_TARGET_LANG) {
            if !lang.trim().is_empty() {
                self.target_lang = lang;
            }
        }

        if let Ok(flag) = std::env::var(constants::ENV_LOGGING_ENABLED) {
            self.logging_enabled = matches!(flag.as_str(), "1" | "true" | "on");
        }

        if let Ok(path) = std::env::var(constants::ENV_CACHE_PATH) {
            if !path.trim().is_empty() {
                self.cache_path = PathBuf::from(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TranslationConfig::default();
        assert_eq!(config.target_lang, "en");
        assert!(!config.logging_enabled);
        assert!(config.cache_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_with_lang() {
        let config = TranslationConfig::default_with_lang("es");
        assert_eq!(config.target_lang, "es");
        assert_eq!(config.local_cache_size, constants::DEFAULT_LOCAL_CACHE_SIZE);
    }

    #[test]
    fn test_validate_rejects_empty_lang() {
        let mut config = TranslationConfig::default();
        config.target_lang = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_cache_size() {
        let mut config = TranslationConfig::default();
        config.local_cache_size = 0;
        assert!(config.validate().is_err());

        // 关闭缓存后允许为0
        config.cache_enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let raw = r#"
            target_lang = "pt"
            logging_enabled = true
            local_cache_size = 16
        "#;
        let config: TranslationConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.target_lang, "pt");
        assert!(config.logging_enabled);
        assert_eq!(config.local_cache_size, 16);
        // 未指定字段保留默认值
        assert_eq!(config.http_timeout_secs, constants::DEFAULT_HTTP_TIMEOUT_SECS);
    }
}
