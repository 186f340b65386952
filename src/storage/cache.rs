//! 多级反查缓存
//!
//! 持久层使用 redb 存储 译文→原文 映射，跨进程重启保留；
//! 本地层为LRU内存缓存，减少磁盘读取。

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use lru::LruCache;
use redb::{Database, ReadableTable, TableDefinition};

use crate::config::{constants, TranslationConfig};
use crate::error::{TranslationError, TranslationResult};

/// 持久反查表：键为译文，值为原文
const REVERSE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("translated_to_original");

// ============================================================================
// 持久缓存
// ============================================================================

/// 持久文本缓存
///
/// 将每个译文映射回其原文并落盘，同一译文键的后写覆盖先写。
/// 写入在返回前同步提交；底层存储故障在本层吞掉并记录告警，
/// 不向调用方传播。
pub struct PersistentTextCache {
    db: Database,
    path: PathBuf,
}

impl PersistentTextCache {
    /// 打开（或创建）指定路径的缓存数据库
    ///
    /// 打开时即确保反查表存在，后续读取不会因缺表失败。
    pub fn open<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TranslationError::CacheError(format!(
                        "创建缓存目录 {} 失败: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let db = Database::create(&path).map_err(|e| {
            TranslationError::CacheError(format!("打开缓存数据库 {} 失败: {}", path.display(), e))
        })?;

        let txn = db
            .begin_write()
            .map_err(|e| TranslationError::CacheError(format!("开启写事务失败: {}", e)))?;
        {
            txn.open_table(REVERSE_TABLE)
                .map_err(|e| TranslationError::CacheError(format!("创建反查表失败: {}", e)))?;
        }
        txn.commit()
            .map_err(|e| TranslationError::CacheError(format!("提交初始化事务失败: {}", e)))?;

        Ok(Self { db, path })
    }

    /// 数据库文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 持久保存 译文→原文 映射；覆盖同键旧值
    ///
    /// 存储失败只记录告警，不中断翻译流程。
    pub fn store(&self, translated: &str, original: &str) {
        if let Err(e) = self.write_entry(translated, original) {
            tracing::warn!("缓存写入失败（已忽略）: {}", e);
        }
    }

    fn write_entry(&self, translated: &str, original: &str) -> TranslationResult<()> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| TranslationError::CacheError(format!("开启写事务失败: {}", e)))?;
        {
            let mut table = txn
                .open_table(REVERSE_TABLE)
                .map_err(|e| TranslationError::CacheError(format!("打开反查表失败: {}", e)))?;
            table
                .insert(translated, original)
                .map_err(|e| TranslationError::CacheError(format!("写入映射失败: {}", e)))?;
        }
        txn.commit()
            .map_err(|e| TranslationError::CacheError(format!("提交写事务失败: {}", e)))?;
        Ok(())
    }

    /// 查询译文对应的原文；未命中返回None
    ///
    /// 读取故障按未命中处理并记录告警。
    pub fn get(&self, translated: &str) -> Option<String> {
        let txn = match self.db.begin_read() {
            Ok(txn) => txn,
            Err(e) => {
                tracing::warn!("开启读事务失败: {}", e);
                return None;
            }
        };

        let table = match txn.open_table(REVERSE_TABLE) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("打开反查表失败: {}", e);
                return None;
            }
        };

        match table.get(translated) {
            Ok(Some(value)) => Some(value.value().to_string()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("读取映射失败: {}", e);
                None
            }
        }
    }

    /// 查询译文对应的原文；未命中时原样返回译文本身
    pub fn lookup(&self, translated: &str) -> String {
        self.get(translated)
            .unwrap_or_else(|| translated.to_string())
    }
}

// ============================================================================
// 本地缓存
// ============================================================================

/// 本地LRU缓存（译文→原文）
pub struct LocalCache {
    entries: Mutex<LruCache<String, String>>,
}

impl LocalCache {
    /// 创建指定容量的本地缓存
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(constants::DEFAULT_LOCAL_CACHE_SIZE).unwrap());

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// 获取缓存项
    pub fn get(&self, translated: &str) -> Option<String> {
        self.entries.lock().unwrap().get(translated).cloned()
    }

    /// 写入缓存项
    pub fn put(&self, translated: String, original: String) {
        self.entries.lock().unwrap().put(translated, original);
    }

    /// 当前缓存条目数
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 清空缓存
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

// ============================================================================
// 缓存管理器
// ============================================================================

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub total_requests: u64,
    pub local_hits: u64,
    pub persistent_hits: u64,
    pub misses: u64,
    pub stores: u64,
}

impl CacheStats {
    /// 计算总命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.local_hits + self.persistent_hits) as f64 / self.total_requests as f64
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 多级缓存管理器
///
/// 查询顺序：本地LRU → 持久层 → 未命中；持久层命中回填本地层。
/// 写入穿透两层。对外契约与持久层一致：lookup 未命中时原样
/// 返回输入。
pub struct CacheManager {
    local: Option<LocalCache>,
    persistent: PersistentTextCache,
    stats: RwLock<CacheStats>,
}

impl CacheManager {
    /// 按配置创建缓存管理器（打开持久数据库）
    pub fn new(config: &TranslationConfig) -> TranslationResult<Self> {
        let persistent = PersistentTextCache::open(&config.cache_path)?;
        let local_capacity = config.cache_enabled.then_some(config.local_cache_size);
        Ok(Self::with_persistent(persistent, local_capacity))
    }

    /// 用已打开的持久缓存组装管理器
    pub fn with_persistent(persistent: PersistentTextCache, local_capacity: Option<usize>) -> Self {
        Self {
            local: local_capacity.map(LocalCache::new),
            persistent,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// 保存 译文→原文 映射（写穿两层）
    pub fn store(&self, translated: &str, original: &str) {
        if let Some(local) = &self.local {
            local.put(translated.to_string(), original.to_string());
        }
        self.persistent.store(translated, original);
        self.stats.write().unwrap().stores += 1;
    }

    /// 查询译文对应的原文；未命中返回None
    pub fn get(&self, translated: &str) -> Option<String> {
        self.stats.write().unwrap().total_requests += 1;

        if let Some(local) = &self.local {
            if let Some(original) = local.get(translated) {
                self.stats.write().unwrap().local_hits += 1;
                return Some(original);
            }
        }

        if let Some(original) = self.persistent.get(translated) {
            self.stats.write().unwrap().persistent_hits += 1;
            // 回填本地缓存
            if let Some(local) = &self.local {
                local.put(translated.to_string(), original.clone());
            }
            return Some(original);
        }

        self.stats.write().unwrap().misses += 1;
        None
    }

    /// 查询译文对应的原文；未命中时原样返回译文本身
    pub fn lookup(&self, translated: &str) -> String {
        self.get(translated)
            .unwrap_or_else(|| translated.to_string())
    }

    /// 获取统计快照
    pub fn stats(&self) -> CacheStats {
        self.stats.read().unwrap().clone()
    }

    /// 重置统计
    pub fn reset_stats(&self) {
        self.stats.write().unwrap().reset();
    }

    /// 访问持久层
    pub fn persistent(&self) -> &PersistentTextCache {
        &self.persistent
    }
}
