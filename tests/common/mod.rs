// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use tempfile::TempDir;

use component_translator::{LoadEvents, TranslationConfig, TranslationService};

/// 标准测试翻译表
pub const SAMPLE_TABLE: &str = r#"{
    "Hello": {"en": "Hello", "es": "Hola", "pt": "Olá"},
    "Goodbye": {"en": "Goodbye", "es": "Adiós"}
}"#;

/// 构建指向临时目录的测试配置
pub fn test_config(dir: &Path, target_lang: &str) -> TranslationConfig {
    TranslationConfig {
        target_lang: target_lang.to_string(),
        logging_enabled: false,
        cache_enabled: true,
        local_cache_size: 64,
        cache_path: dir.join("cache.redb"),
        http_timeout_secs: 5,
    }
}

/// 测试环境：临时目录 + 翻译服务
pub struct TestEnvironment {
    pub dir: TempDir,
    pub service: TranslationService,
}

impl TestEnvironment {
    pub fn new(target_lang: &str) -> Self {
        init_test_logging();
        let dir = TempDir::new().expect("创建临时目录失败");
        let service = TranslationService::new(test_config(dir.path(), target_lang))
            .expect("创建翻译服务失败");
        Self { dir, service }
    }

    pub fn with_events(target_lang: &str, events: Arc<dyn LoadEvents>) -> Self {
        init_test_logging();
        let dir = TempDir::new().expect("创建临时目录失败");
        let service =
            TranslationService::with_events(test_config(dir.path(), target_lang), events)
                .expect("创建翻译服务失败");
        Self { dir, service }
    }

    /// 把内容写成临时资源文件，返回其路径字符串
    pub fn write_asset(&self, name: &str, contents: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("写入资源文件失败");
        path.to_string_lossy().into_owned()
    }

    /// 写入并加载标准测试表
    pub async fn load_sample(&self) {
        let asset = self.write_asset("translations.json", SAMPLE_TABLE);
        let report = self.service.load(&asset).await;
        assert!(report.success, "样例表加载失败: {}", report.message);
    }
}

/// 记录回调次数与最后消息的事件接收器
#[derive(Default)]
pub struct RecordingEvents {
    pub loaded_calls: AtomicUsize,
    pub error_calls: AtomicUsize,
    pub last_message: Mutex<String>,
}

impl RecordingEvents {
    pub fn last_message(&self) -> String {
        self.last_message.lock().unwrap().clone()
    }
}

impl LoadEvents for RecordingEvents {
    fn on_translations_loaded(&self, _success: bool, message: &str) {
        self.loaded_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock().unwrap() = message.to_string();
    }

    fn on_load_error(&self, message: &str) {
        self.error_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock().unwrap() = message.to_string();
    }
}

/// 启动只应答一次请求的HTTP服务，返回可请求的URL
pub fn spawn_http_server(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("绑定端口失败");
    let addr = listener.local_addr().expect("读取地址失败");

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/translations.json", addr)
}

/// 初始化测试日志订阅器（重复调用无害）
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
