//! 存储管理模块 - 缓存与持久化
//!
//! 提供译文→原文的持久反查存储及其本地内存缓存层。

pub mod cache;

pub use cache::{CacheManager, CacheStats, LocalCache, PersistentTextCache};
