//! 翻译表
//!
//! 从JSON文档解析得到的内存双向词典。顶层键为原文，值为
//! 语言代码到译文的映射：
//!
//! ```json
//! { "Hello": { "en": "Hello", "es": "Hola" } }
//! ```
//!
//! 表一经构建即不可变，加载器成功解析后整体替换旧表。

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{TranslationError, TranslationResult};

/// 单个翻译条目：原文及其各语言译文
///
/// 译文按源JSON中的出现顺序保存（serde_json 的 preserve_order
/// 保证对象键序），反向扫描的并列裁决依赖该顺序。
#[derive(Debug, Clone)]
pub struct TranslationEntry {
    /// 原文（词典键，非空）
    pub original: String,
    /// (语言代码, 译文) 对，按JSON键序排列
    pub translations: Vec<(String, String)>,
}

impl TranslationEntry {
    /// 查找指定语言的译文
    pub fn translation_for(&self, language: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, text)| text.as_str())
    }
}

/// 翻译表：按插入顺序保存的条目集合，外加原文索引
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: Vec<TranslationEntry>,
    index: HashMap<String, usize>,
}

impl TranslationTable {
    /// 创建空表（启动时的初始状态）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 解析JSON文档为翻译表
    ///
    /// 输入必须是"对象套对象套字符串"的结构；任何形状不符都会使
    /// 整次解析失败，不做条目级跳过。JSON对象中的重复键在反序列化
    /// 阶段按后值覆盖前值处理。
    pub fn parse(raw: &str) -> TranslationResult<Self> {
        let root: Value = serde_json::from_str(raw)
            .map_err(|e| TranslationError::ParseError(format!("JSON解析失败: {}", e)))?;

        let Value::Object(map) = root else {
            return Err(TranslationError::ParseError(
                "顶层必须是JSON对象".to_string(),
            ));
        };

        let mut entries = Vec::with_capacity(map.len());
        let mut index = HashMap::with_capacity(map.len());

        for (original, value) in map {
            if original.is_empty() {
                return Err(TranslationError::ParseError(
                    "原文键不能为空".to_string(),
                ));
            }

            let Value::Object(lang_map) = value else {
                return Err(TranslationError::ParseError(format!(
                    "条目 {:?} 的值必须是语言映射对象",
                    original
                )));
            };

            let mut translations = Vec::with_capacity(lang_map.len());
            for (language, text) in lang_map {
                if language.is_empty() {
                    return Err(TranslationError::ParseError(format!(
                        "条目 {:?} 含空语言代码",
                        original
                    )));
                }

                let Value::String(text) = text else {
                    return Err(TranslationError::ParseError(format!(
                        "条目 {:?} 语言 {:?} 的译文必须是字符串",
                        original, language
                    )));
                };

                translations.push((language, text));
            }

            index.insert(original.clone(), entries.len());
            entries.push(TranslationEntry {
                original,
                translations,
            });
        }

        Ok(Self { entries, index })
    }

    /// 查找原文在指定语言下的译文（存在时）
    pub fn translation_for(&self, original: &str, language: &str) -> Option<&str> {
        self.index
            .get(original)
            .and_then(|&i| self.entries[i].translation_for(language))
    }

    /// 查找译文；条目或语言缺失时原样返回原文
    pub fn lookup(&self, original: &str, language: &str) -> String {
        self.translation_for(original, language)
            .map(str::to_string)
            .unwrap_or_else(|| original.to_string())
    }

    /// 全表扫描反查原文
    ///
    /// 按条目插入顺序、再按条目内语言顺序逐个比较译文，返回第一个
    /// 命中的原文。代价为 条目数×语言数 的线性扫描，仅作为不经过
    /// 持久缓存时的备用路径；解析器（resolver）使用缓存反查。
    pub fn reverse_lookup_original(&self, translated: &str) -> Option<&str> {
        for entry in &self.entries {
            for (_, text) in &entry.translations {
                if text == translated {
                    return Some(entry.original.as_str());
                }
            }
        }
        None
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 表是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序访问全部条目
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }
}
