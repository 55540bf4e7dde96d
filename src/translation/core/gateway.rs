//! 翻译网关核心实现
//!
//! 网关包装一个远程翻译服务，负责：
//!
//! - 源语言与目标语言相同时直接返回原文
//! - 以 `(目标语言, 原文)` 为键的缓存
//! - 批量请求中只把未命中的文本交给远程服务，并按原位置回填
//! - 任何远程失败都降级为原文，从不向调用方返回错误
//!
//! 没有配置凭证时网关处于直通模式，所有输入原样返回。
//!
//! 同一键的并发未命中不做合并，多个请求可能同时调用远程服务，
//! 最后写入缓存的结果生效。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::translation::config::{constants, TranslationConfig};
use crate::translation::error::TranslationResult;
use crate::translation::provider::{GoogleTranslateProvider, TranslationProvider};
use crate::translation::storage::cache::{create_cache, CacheKey, CacheStats, TranslationCache};

/// 翻译网关
///
/// 克隆开销很小，所有克隆共享同一个缓存和统计。
#[derive(Clone)]
pub struct TranslationGateway {
    provider: Option<Arc<dyn TranslationProvider>>,
    cache: Arc<dyn TranslationCache>,
    default_source_lang: String,
    stats: Arc<ServiceStats>,
}

impl TranslationGateway {
    /// 使用给定的远程服务和缓存创建网关，`provider` 为 `None` 时进入直通模式
    pub fn new(
        provider: Option<Arc<dyn TranslationProvider>>,
        cache: Arc<dyn TranslationCache>,
    ) -> Self {
        if provider.is_none() {
            tracing::warn!("未配置翻译服务凭证，所有文本将原样返回");
        }

        Self {
            provider,
            cache,
            default_source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            stats: Arc::new(ServiceStats::default()),
        }
    }

    /// 根据配置创建网关
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Self> {
        let provider = GoogleTranslateProvider::from_config(config)?
            .map(|provider| Arc::new(provider) as Arc<dyn TranslationProvider>);

        if let Some(ref provider) = provider {
            tracing::info!(
                provider = provider.name(),
                cache_capacity = config.cache_capacity,
                "翻译网关已启用"
            );
        }

        Ok(Self::new(provider, create_cache(config.cache_capacity))
            .with_default_source_lang(&config.default_source_lang))
    }

    pub fn with_default_source_lang(mut self, source_lang: &str) -> Self {
        self.default_source_lang = source_lang.to_string();
        self
    }

    /// 是否配置了远程服务
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn default_source_lang(&self) -> &str {
        &self.default_source_lang
    }

    /// 翻译单条文本
    ///
    /// 永远返回一个字符串：译文，或在任何无法翻译的情况下返回原文。
    pub async fn translate(&self, text: &str, target_lang: &str, source_lang: Option<&str>) -> String {
        self.stats.translate_requests.fetch_add(1, Ordering::Relaxed);
        let source_lang = source_lang.unwrap_or(&self.default_source_lang);

        let Some(provider) = self.provider.as_ref() else {
            tracing::debug!("直通模式，返回原文");
            self.stats.short_circuits.fetch_add(1, Ordering::Relaxed);
            return text.to_string();
        };

        if text.trim().is_empty() || source_lang == target_lang {
            self.stats.short_circuits.fetch_add(1, Ordering::Relaxed);
            return text.to_string();
        }

        let key = CacheKey::new(target_lang, text);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(target_lang, "缓存命中");
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            return cached;
        }
        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);

        self.stats.remote_calls.fetch_add(1, Ordering::Relaxed);
        let request = [key.text.clone()];
        match provider.translate(&request, source_lang, target_lang).await {
            Ok(mut translations) if translations.len() == 1 => {
                let translated = translations.remove(0);
                self.cache.put(key, translated.clone());
                self.stats.texts_translated.fetch_add(1, Ordering::Relaxed);
                translated
            }
            Ok(translations) => {
                self.stats.remote_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    provider = provider.name(),
                    returned = translations.len(),
                    "翻译服务返回的译文数量不正确，返回原文"
                );
                text.to_string()
            }
            Err(e) => {
                self.stats.remote_failures.fetch_add(1, Ordering::Relaxed);
                e.log("翻译失败，返回原文");
                text.to_string()
            }
        }
    }

    /// 批量翻译
    ///
    /// 返回值的长度和顺序总是与 `texts` 一致。缓存命中的文本不会再次提交，
    /// 未命中的文本合并为一次远程调用。远程失败时未命中的位置保留原文，
    /// 命中的位置仍然返回缓存中的译文。
    pub async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Vec<String> {
        self.stats.batch_requests.fetch_add(1, Ordering::Relaxed);
        let source_lang = source_lang.unwrap_or(&self.default_source_lang);

        let Some(provider) = self.provider.as_ref() else {
            self.stats.short_circuits.fetch_add(1, Ordering::Relaxed);
            return texts.to_vec();
        };

        if source_lang == target_lang || texts.is_empty() {
            self.stats.short_circuits.fetch_add(1, Ordering::Relaxed);
            return texts.to_vec();
        }

        let mut results: Vec<Option<String>> = Vec::with_capacity(texts.len());
        let mut miss_indices = Vec::new();
        let mut miss_texts = Vec::new();

        for (index, text) in texts.iter().enumerate() {
            match self.cache.get(&CacheKey::new(target_lang, text.as_str())) {
                Some(cached) => results.push(Some(cached)),
                None => {
                    results.push(None);
                    miss_indices.push(index);
                    miss_texts.push(text.clone());
                }
            }
        }

        let hits = texts.len() - miss_texts.len();
        self.stats.cache_hits.fetch_add(hits, Ordering::Relaxed);
        self.stats.cache_misses.fetch_add(miss_texts.len(), Ordering::Relaxed);

        if miss_texts.is_empty() {
            tracing::debug!(target_lang, count = texts.len(), "批量请求全部命中缓存");
            return results.into_iter().flatten().collect();
        }

        tracing::debug!(
            target_lang,
            hits,
            misses = miss_texts.len(),
            "提交未命中的文本"
        );

        self.stats.remote_calls.fetch_add(1, Ordering::Relaxed);
        match provider.translate(&miss_texts, source_lang, target_lang).await {
            Ok(translations) if translations.len() == miss_texts.len() => {
                self.stats
                    .texts_translated
                    .fetch_add(translations.len(), Ordering::Relaxed);

                for ((index, original), translated) in
                    miss_indices.into_iter().zip(miss_texts).zip(translations)
                {
                    self.cache
                        .put(CacheKey::new(target_lang, original), translated.clone());
                    results[index] = Some(translated);
                }
            }
            Ok(translations) => {
                self.stats.remote_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    provider = provider.name(),
                    submitted = miss_texts.len(),
                    returned = translations.len(),
                    "翻译服务返回的译文数量不正确，未命中部分返回原文"
                );
            }
            Err(e) => {
                self.stats.remote_failures.fetch_add(1, Ordering::Relaxed);
                e.with_context(format!("{} 条文本", miss_texts.len()))
                    .log("批量翻译失败，未命中部分返回原文");
            }
        }

        results
            .into_iter()
            .zip(texts)
            .map(|(resolved, original)| resolved.unwrap_or_else(|| original.clone()))
            .collect()
    }

    /// 清空翻译缓存，返回被清除的条目数
    pub fn clear_cache(&self) -> usize {
        let cleared = self.cache.clear();
        tracing::info!(cleared, "翻译缓存已清空");
        cleared
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn stats(&self) -> ServiceStatsSnapshot {
        self.stats.snapshot()
    }
}

/// 网关运行统计
///
/// 使用原子计数器，可在多个请求间共享而无需加锁。
#[derive(Debug, Default)]
pub struct ServiceStats {
    pub translate_requests: AtomicUsize,
    pub batch_requests: AtomicUsize,
    /// 直通、空文本或同语言直接返回的次数
    pub short_circuits: AtomicUsize,
    pub cache_hits: AtomicUsize,
    pub cache_misses: AtomicUsize,
    pub remote_calls: AtomicUsize,
    pub remote_failures: AtomicUsize,
    pub texts_translated: AtomicUsize,
}

impl ServiceStats {
    pub fn snapshot(&self) -> ServiceStatsSnapshot {
        ServiceStatsSnapshot {
            translate_requests: self.translate_requests.load(Ordering::Relaxed),
            batch_requests: self.batch_requests.load(Ordering::Relaxed),
            short_circuits: self.short_circuits.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            remote_calls: self.remote_calls.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            texts_translated: self.texts_translated.load(Ordering::Relaxed),
        }
    }
}

/// 统计数据的不可变快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatsSnapshot {
    pub translate_requests: usize,
    pub batch_requests: usize,
    pub short_circuits: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub remote_calls: usize,
    pub remote_failures: usize,
    pub texts_translated: usize,
}
