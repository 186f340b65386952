//! 翻译解析器
//!
//! 面向调用方的核心入口：对输入文本先经持久缓存反查恢复规范
//! 原文，再按目标语言查翻译表，最后把新的 译文→原文 映射写回
//! 缓存。整个过程不产生错误，任何查不到的环节都回退为原样返回。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::context::TranslationContext;
use crate::storage::CacheManager;

/// 解析器统计信息（线程安全）
#[derive(Debug, Default)]
pub struct ResolverStats {
    /// 完成的翻译调用次数
    pub translations_completed: AtomicUsize,
    /// 经缓存反查恢复出原文的次数
    pub cache_recoveries: AtomicUsize,
    /// 表中无译文、原样返回的次数
    pub identity_results: AtomicUsize,
}

impl ResolverStats {
    /// 获取统计快照
    pub fn snapshot(&self) -> ResolverStatsSnapshot {
        ResolverStatsSnapshot {
            translations_completed: self.translations_completed.load(Ordering::Relaxed),
            cache_recoveries: self.cache_recoveries.load(Ordering::Relaxed),
            identity_results: self.identity_results.load(Ordering::Relaxed),
        }
    }
}

/// 统计数据的不可变快照
#[derive(Debug, Clone, Copy)]
pub struct ResolverStatsSnapshot {
    pub translations_completed: usize,
    pub cache_recoveries: usize,
    pub identity_results: usize,
}

/// 翻译解析器
///
/// 通过共享上下文读取活动翻译表与目标语言；持久缓存按引用
/// 接入，不为解析器所有。`translate` 在调用方自身的执行上下文
/// 中同步完成，只涉及内存与本地磁盘操作。
pub struct TranslationResolver {
    context: Arc<TranslationContext>,
    cache: Arc<CacheManager>,
    stats: ResolverStats,
}

impl TranslationResolver {
    /// 创建解析器
    pub fn new(context: Arc<TranslationContext>, cache: Arc<CacheManager>) -> Self {
        Self {
            context,
            cache,
            stats: ResolverStats::default(),
        }
    }

    /// 设置目标语言
    pub fn set_target_language(&self, code: &str) {
        self.context.set_target_lang(code);
    }

    /// 当前目标语言
    pub fn target_language(&self) -> String {
        self.context.target_lang()
    }

    /// 翻译一段文本
    ///
    /// 1. 缓存反查：若输入本身是已知译文，恢复其规范原文；
    /// 2. 按目标语言查表，条目或语言缺失时得到原文本身；
    /// 3. 把 译文→原文 写回缓存，使重复翻译保持幂等；
    /// 4. 返回结果。
    ///
    /// 对任意字符串输入都返回可用结果，未知文本原样返回。
    pub fn translate(&self, text: &str) -> String {
        let original = self.cache.lookup(text);
        if original != text {
            self.stats.cache_recoveries.fetch_add(1, Ordering::Relaxed);
        }

        let table = self.context.table();
        let target = self.context.target_lang();
        let result = table.lookup(&original, &target);
        if result == original {
            self.stats.identity_results.fetch_add(1, Ordering::Relaxed);
        }

        self.cache.store(&result, &original);
        self.stats
            .translations_completed
            .fetch_add(1, Ordering::Relaxed);

        if self.context.logging_enabled() {
            tracing::info!("翻译完成: {:?} -> {:?} ({})", text, result, target);
        }

        result
    }

    /// 获取统计快照
    pub fn stats(&self) -> ResolverStatsSnapshot {
        self.stats.snapshot()
    }

    /// 共享上下文
    pub fn context(&self) -> &Arc<TranslationContext> {
        &self.context
    }

    /// 接入的缓存管理器
    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }
}
