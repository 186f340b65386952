//! 翻译服务
//!
//! 组装上下文、缓存管理器、加载器与解析器的统一门面，
//! 提供宿主最常用的完整接口。

use std::sync::Arc;

use crate::config::TranslationConfig;
use crate::context::TranslationContext;
use crate::error::TranslationResult;
use crate::loader::{LoadEvents, LoadReport, TranslationLoader};
use crate::resolver::{ResolverStatsSnapshot, TranslationResolver};
use crate::storage::{CacheManager, CacheStats};
use crate::table::TranslationTable;

/// 统一翻译服务
///
/// 各子系统共享同一份上下文：加载器替换其中的翻译表，
/// 解析器读取表与目标语言。持久缓存随服务打开，路径来自配置。
pub struct TranslationService {
    context: Arc<TranslationContext>,
    cache: Arc<CacheManager>,
    loader: TranslationLoader,
    resolver: TranslationResolver,
}

impl TranslationService {
    /// 用给定配置创建翻译服务
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        config.validate()?;

        let context = Arc::new(TranslationContext::new(config.clone()));
        let cache = Arc::new(CacheManager::new(&config)?);
        let loader = TranslationLoader::new(Arc::clone(&context))?;
        let resolver = TranslationResolver::new(Arc::clone(&context), Arc::clone(&cache));

        Ok(Self {
            context,
            cache,
            loader,
            resolver,
        })
    }

    /// 创建使用默认配置的翻译服务
    pub fn create_default(target_lang: &str) -> TranslationResult<Self> {
        Self::new(TranslationConfig::default_with_lang(target_lang))
    }

    /// 创建服务并注册宿主通知接收器
    pub fn with_events(
        config: TranslationConfig,
        events: Arc<dyn LoadEvents>,
    ) -> TranslationResult<Self> {
        let mut service = Self::new(config)?;
        service.loader = service.loader.clone().with_events(events);
        Ok(service)
    }

    /// 加载翻译表（等待完成）
    pub async fn load(&self, source: &str) -> LoadReport {
        self.loader.load(source).await
    }

    /// 在后台任务中加载翻译表
    pub fn load_detached(&self, source: &str) -> tokio::task::JoinHandle<LoadReport> {
        self.loader.load_detached(source)
    }

    /// 翻译一段文本（见 [`TranslationResolver::translate`]）
    pub fn translate(&self, text: &str) -> String {
        self.resolver.translate(text)
    }

    /// 设置目标语言
    pub fn set_target_language(&self, code: &str) {
        self.context.set_target_lang(code);
    }

    /// 当前目标语言
    pub fn target_language(&self) -> String {
        self.context.target_lang()
    }

    /// 开关详细日志
    pub fn set_logging_enabled(&self, enabled: bool) {
        self.context.set_logging_enabled(enabled);
    }

    /// 当前翻译表快照
    pub fn table(&self) -> Arc<TranslationTable> {
        self.context.table()
    }

    /// 缓存统计快照
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// 解析器统计快照
    pub fn resolver_stats(&self) -> ResolverStatsSnapshot {
        self.resolver.stats()
    }

    /// 共享上下文
    pub fn context(&self) -> &Arc<TranslationContext> {
        &self.context
    }

    /// 缓存管理器
    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    /// 加载器
    pub fn loader(&self) -> &TranslationLoader {
        &self.loader
    }

    /// 解析器
    pub fn resolver(&self) -> &TranslationResolver {
        &self.resolver
    }
}
