// 集成测试公共模块
//
// 提供内存中的翻译服务替身和网关构建工具

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use translation_gateway::translation::{
    LocalCache, TranslationError, TranslationGateway, TranslationProvider, TranslationResult,
};

/// 一次远程调用的记录
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub texts: Vec<String>,
    pub source_lang: String,
    pub target_lang: String,
}

/// 记录每次调用的翻译服务替身
///
/// 词典中有的 `(目标语言, 原文)` 返回词典译文，否则返回 `"[目标语言] 原文"`。
pub struct MockProvider {
    dictionary: HashMap<(String, String), String>,
    calls: Mutex<Vec<RecordedCall>>,
    failing: AtomicBool,
    drop_last: AtomicBool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            dictionary: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            drop_last: AtomicBool::new(false),
        }
    }

    pub fn with_entries(entries: &[(&str, &str, &str)]) -> Self {
        let mut provider = Self::new();
        for (target, text, translated) in entries {
            provider
                .dictionary
                .insert((target.to_string(), text.to_string()), translated.to_string());
        }
        provider
    }

    /// 之后的调用全部返回网络错误
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 之后的调用少返回一条译文
    pub fn set_drop_last(&self, drop_last: bool) {
        self.drop_last.store(drop_last, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn expected(target: &str, text: &str) -> String {
        format!("[{}] {}", target, text)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<Vec<String>> {
        self.calls.lock().unwrap().push(RecordedCall {
            texts: texts.to_vec(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        });

        if self.failing.load(Ordering::SeqCst) {
            return Err(TranslationError::NetworkError("connection reset".to_string()));
        }

        let mut translations: Vec<String> = texts
            .iter()
            .map(|text| {
                self.dictionary
                    .get(&(target_lang.to_string(), text.clone()))
                    .cloned()
                    .unwrap_or_else(|| Self::expected(target_lang, text))
            })
            .collect();

        if self.drop_last.load(Ordering::SeqCst) {
            translations.pop();
        }

        Ok(translations)
    }
}

/// 使用替身服务和指定容量的 LRU 缓存创建网关
pub fn gateway_with(provider: &Arc<MockProvider>, capacity: usize) -> TranslationGateway {
    let provider: Arc<dyn TranslationProvider> = provider.clone();
    TranslationGateway::new(Some(provider), Arc::new(LocalCache::new(capacity)))
}

pub fn default_gateway() -> (Arc<MockProvider>, TranslationGateway) {
    let provider = Arc::new(MockProvider::with_entries(&[
        ("es", "Hello", "Hola"),
        ("fr", "Hello", "Bonjour"),
    ]));
    let gateway = gateway_with(&provider, 100);
    (provider, gateway)
}

/// 没有凭证的直通网关
pub fn pass_through_gateway() -> TranslationGateway {
    TranslationGateway::new(None, Arc::new(LocalCache::new(100)))
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
