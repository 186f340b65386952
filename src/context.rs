//! 翻译上下文
//!
//! 持有当前生效的翻译表快照与运行时配置，由解析器与加载器
//! 通过引用共享，替代进程级全局状态。

use std::sync::{Arc, RwLock};

use crate::config::TranslationConfig;
use crate::table::TranslationTable;

/// 翻译上下文：活动翻译表 + 可变配置
///
/// 表引用整体原子替换，读取方拿到的是某一时刻的完整快照，
/// 替换期间继续使用旧快照是安全的。
#[derive(Debug)]
pub struct TranslationContext {
    table: RwLock<Arc<TranslationTable>>,
    config: RwLock<TranslationConfig>,
}

impl TranslationContext {
    /// 用给定配置创建上下文，初始翻译表为空
    pub fn new(config: TranslationConfig) -> Self {
        Self {
            table: RwLock::new(Arc::new(TranslationTable::empty())),
            config: RwLock::new(config),
        }
    }

    /// 获取当前翻译表快照
    pub fn table(&self) -> Arc<TranslationTable> {
        self.table.read().unwrap().clone()
    }

    /// 原子替换活动翻译表
    pub fn swap_table(&self, table: TranslationTable) {
        *self.table.write().unwrap() = Arc::new(table);
    }

    /// 获取配置副本
    pub fn config(&self) -> TranslationConfig {
        self.config.read().unwrap().clone()
    }

    /// 当前目标语言
    pub fn target_lang(&self) -> String {
        self.config.read().unwrap().target_lang.clone()
    }

    /// 设置目标语言
    pub fn set_target_lang(&self, code: &str) {
        self.config.write().unwrap().target_lang = code.to_string();
    }

    /// 详细日志是否开启
    pub fn logging_enabled(&self) -> bool {
        self.config.read().unwrap().logging_enabled
    }

    /// 开关详细日志
    pub fn set_logging_enabled(&self, enabled: bool) {
        self.config.write().unwrap().logging_enabled = enabled;
    }
}
