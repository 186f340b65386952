//! 翻译表加载器
//!
//! 从本地资源文件或HTTP(S)地址异步获取JSON文档，解析成功后
//! 原子替换上下文中的活动翻译表。任何一步失败都不触碰现有表：
//! 失败的加载对状态是无操作，只产生一次失败上报。

use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::context::TranslationContext;
use crate::error::{TranslationError, TranslationResult};
use crate::table::TranslationTable;

/// 单次加载的结果报告
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub success: bool,
    pub message: String,
}

impl LoadReport {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// 宿主通知接口
///
/// 每次 `load` 调用恰好触发其中一个回调：成功时
/// `on_translations_loaded(true, ..)`，任何失败走 `on_load_error`。
/// 回调在加载任务自身的执行上下文中被调用。
pub trait LoadEvents: Send + Sync {
    /// 翻译表加载成功
    fn on_translations_loaded(&self, _success: bool, _message: &str) {}

    /// 加载失败（读取、网络或解析）
    fn on_load_error(&self, _message: &str) {}
}

/// 加载源分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// HTTP(S) 远程地址
    Remote(Url),
    /// 本地资源路径
    Asset(PathBuf),
}

impl LoadSource {
    /// 识别来源：以 http:// 或 https:// 开头的按远程地址处理，
    /// 其余一律当作本地资源路径
    pub fn classify(source: &str) -> TranslationResult<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let url = Url::parse(source).map_err(|e| {
                TranslationError::NetworkError(format!("Invalid URL {:?}: {}", source, e))
            })?;
            Ok(LoadSource::Remote(url))
        } else {
            Ok(LoadSource::Asset(PathBuf::from(source)))
        }
    }
}

/// 翻译表加载器
#[derive(Clone)]
pub struct TranslationLoader {
    context: Arc<TranslationContext>,
    client: reqwest::Client,
    events: Option<Arc<dyn LoadEvents>>,
}

impl TranslationLoader {
    /// 创建加载器；HTTP客户端超时取自上下文配置
    pub fn new(context: Arc<TranslationContext>) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(context.config().http_timeout())
            .build()
            .map_err(|e| TranslationError::NetworkError(format!("构建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            context,
            client,
            events: None,
        })
    }

    /// 注册宿主通知接收器
    pub fn with_events(mut self, events: Arc<dyn LoadEvents>) -> Self {
        self.events = Some(events);
        self
    }

    /// 加载翻译表并报告结果
    ///
    /// 获取原始文本 → 解析 → 原子替换活动表。失败只上报，
    /// 之前加载的表保持生效。
    pub async fn load(&self, source: &str) -> LoadReport {
        let verbose = self.context.logging_enabled();

        let raw = match self.acquire(source).await {
            Ok(raw) => raw,
            Err(e) => {
                if verbose {
                    tracing::warn!("加载 {} 失败: {}", source, e);
                }
                let message = failure_message(&e);
                self.notify_failure(&message);
                return LoadReport::failed(&message);
            }
        };

        match TranslationTable::parse(&raw) {
            Ok(table) => {
                let entry_count = table.len();
                self.context.swap_table(table);
                if verbose {
                    tracing::info!("翻译表加载成功: {} 个条目, 来源 {}", entry_count, source);
                }
                let message = "Translations loaded successfully.";
                if let Some(events) = &self.events {
                    events.on_translations_loaded(true, message);
                }
                LoadReport::ok(message)
            }
            Err(e) => {
                if verbose {
                    tracing::error!("翻译表解析失败, 来源 {}: {}", source, e);
                }
                let message = "Invalid JSON format.";
                self.notify_failure(message);
                LoadReport::failed(message)
            }
        }
    }

    /// 在后台任务中执行加载
    ///
    /// 返回任务句柄；宿主可等待或丢弃。中止句柄会取消获取，
    /// 但该次调用的恰好一次上报保证随之失效。
    pub fn load_detached(&self, source: &str) -> tokio::task::JoinHandle<LoadReport> {
        let loader = self.clone();
        let source = source.to_string();
        tokio::spawn(async move { loader.load(&source).await })
    }

    /// 获取原始JSON文本
    async fn acquire(&self, source: &str) -> TranslationResult<String> {
        match LoadSource::classify(source)? {
            LoadSource::Remote(url) => self.fetch_remote(&url).await,
            LoadSource::Asset(path) => {
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| {
                        TranslationError::SourceReadError(format!("{}: {}", path.display(), e))
                    })
            }
        }
    }

    /// 发起GET请求；仅接受HTTP 200
    async fn fetch_remote(&self, url: &Url) -> TranslationResult<String> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            TranslationError::NetworkError(format!("Request to {} failed: {}", url, e))
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(TranslationError::NetworkError(format!(
                "Request failed with HTTP status {}.",
                status.as_u16()
            )));
        }

        response.text().await.map_err(|e| {
            TranslationError::NetworkError(format!("Failed to read response body: {}", e))
        })
    }

    fn notify_failure(&self, message: &str) {
        if let Some(events) = &self.events {
            events.on_load_error(message);
        }
    }
}

/// 面向宿主的失败消息
///
/// 文件类失败使用固定文案；网络类失败透传原因（含HTTP状态码）。
fn failure_message(error: &TranslationError) -> String {
    match error {
        TranslationError::SourceReadError(_) => "File not found or cannot be read.".to_string(),
        TranslationError::NetworkError(detail) => detail.clone(),
        other => other.to_string(),
    }
}
