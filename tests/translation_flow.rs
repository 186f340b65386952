//! 翻译流程集成测试
//!
//! 覆盖查表、身份回退、缓存回写与幂等翻译的端到端行为

use component_translator::TranslationTable;

mod common {
    include!("common/mod.rs");
}

use common::{TestEnvironment, SAMPLE_TABLE};

/// 已加载表中每个 (原文, 语言) 对的查询结果与表内容一致
#[test]
fn test_lookup_matches_table_contents() {
    let table = TranslationTable::parse(SAMPLE_TABLE).unwrap();

    for entry in table.entries() {
        for (language, expected) in &entry.translations {
            assert_eq!(
                table.lookup(&entry.original, language),
                *expected,
                "条目 {:?} 语言 {:?} 查询结果不一致",
                entry.original,
                language
            );
        }
    }
}

/// 缺失的条目或语言一律原样返回
#[test]
fn test_lookup_absent_pairs_return_input() {
    let table = TranslationTable::parse(SAMPLE_TABLE).unwrap();

    assert_eq!(table.lookup("Hello", "fr"), "Hello");
    assert_eq!(table.lookup("Missing", "es"), "Missing");
    assert_eq!(table.lookup("", "es"), "");
}

/// 目标语言存在译文时返回译文
#[tokio::test]
async fn test_translate_to_spanish() {
    let env = TestEnvironment::new("es");
    env.load_sample().await;

    assert_eq!(env.service.translate("Hello"), "Hola");
    assert_eq!(env.service.translate("Goodbye"), "Adiós");

    println!("✅ Spanish translation test passed");
}

/// 目标语言无译文时原样返回
#[tokio::test]
async fn test_translate_missing_language_falls_back() {
    let env = TestEnvironment::new("fr");
    env.load_sample().await;

    assert_eq!(env.service.translate("Hello"), "Hello");
}

/// 翻译后缓存可把译文映射回原文
#[tokio::test]
async fn test_cache_round_trip() {
    let env = TestEnvironment::new("es");
    env.load_sample().await;

    assert_eq!(env.service.translate("Hello"), "Hola");
    assert_eq!(env.service.cache().lookup("Hola"), "Hello");

    println!("✅ Cache round trip test passed");
}

/// 缓存预热后重复翻译幂等：对译文再翻译不会漂移
#[tokio::test]
async fn test_translate_is_idempotent() {
    let env = TestEnvironment::new("es");
    env.load_sample().await;

    let first = env.service.translate("Hello");
    let second = env.service.translate(&first);
    let third = env.service.translate(&second);

    assert_eq!(first, "Hola");
    assert_eq!(second, first);
    assert_eq!(third, first);
}

/// 切换目标语言后，译文先经缓存恢复原文再查表
#[tokio::test]
async fn test_language_switch_recovers_original() {
    let env = TestEnvironment::new("es");
    env.load_sample().await;

    assert_eq!(env.service.translate("Hello"), "Hola");

    // 切回英语：输入"Hola"应恢复为"Hello"并按en给出译文
    env.service.set_target_language("en");
    assert_eq!(env.service.translate("Hola"), "Hello");

    // 切到无条目的语言：恢复出的原文原样返回
    env.service.set_target_language("fr");
    assert_eq!(env.service.translate("Hola"), "Hello");
}

/// 对任意输入（包括未知文本与空串）翻译总能返回可用结果
#[tokio::test]
async fn test_translate_is_total() {
    let env = TestEnvironment::new("es");
    env.load_sample().await;

    assert_eq!(env.service.translate("Unknown text"), "Unknown text");
    assert_eq!(env.service.translate(""), "");
}

/// 未加载任何表时翻译退化为恒等
#[tokio::test]
async fn test_translate_with_empty_table() {
    let env = TestEnvironment::new("es");

    assert!(env.service.table().is_empty());
    assert_eq!(env.service.translate("Hello"), "Hello");
}

/// 表扫描反查仅作为不经缓存的备用路径，语义与缓存路径互不混用
#[tokio::test]
async fn test_reverse_scan_is_standalone_alternative() {
    let env = TestEnvironment::new("es");
    env.load_sample().await;

    let table = env.service.table();

    // 扫描路径：不写缓存即可反查
    assert_eq!(table.reverse_lookup_original("Adiós"), Some("Goodbye"));
    // 此时缓存路径尚无记录，lookup只能原样返回
    assert_eq!(env.service.cache().lookup("Adiós"), "Adiós");

    // 解析器走缓存路径：翻译后缓存才有记录
    env.service.translate("Goodbye");
    assert_eq!(env.service.cache().lookup("Adiós"), "Goodbye");
}

/// 目标语言与日志开关可随时读写
#[tokio::test]
async fn test_runtime_configuration_surface() {
    let env = TestEnvironment::new("es");

    assert_eq!(env.service.target_language(), "es");
    env.service.set_target_language("pt");
    assert_eq!(env.service.target_language(), "pt");

    // 日志开关不影响翻译行为
    env.service.set_logging_enabled(true);
    env.load_sample().await;
    assert_eq!(env.service.translate("Hello"), "Olá");
}

/// 解析器统计随调用推进
#[tokio::test]
async fn test_resolver_stats_tracking() {
    let env = TestEnvironment::new("es");
    env.load_sample().await;

    env.service.translate("Hello");
    env.service.translate("Hola");

    let stats = env.service.resolver_stats();
    assert_eq!(stats.translations_completed, 2);
    assert_eq!(stats.cache_recoveries, 1);

    println!(
        "✅ Resolver stats test passed - {} translations",
        stats.translations_completed
    );
}
