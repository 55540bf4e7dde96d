//! 翻译缓存模块
//!
//! 以 `(目标语言, 原文)` 为键的记忆表。键是精确匹配，不做大小写或空白归一化，
//! 源语言不参与键的计算。
//!
//! 缓存通过 [`TranslationCache`] 特性注入网关；默认实现是固定容量的
//! LRU 缓存，条目不会按时间过期，只会被淘汰或显式清空。

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use serde::Serialize;

// ============================================================================
// 核心类型
// ============================================================================

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub target_lang: String,
    pub text: String,
}

impl CacheKey {
    pub fn new(target_lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target_lang: target_lang.into(),
            text: text.into(),
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// 计算命中率
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// 翻译缓存接口
///
/// 所有方法都是同步的，实现不得在内部持有跨 `.await` 的锁。
pub trait TranslationCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<String>;

    fn put(&self, key: CacheKey, translated: String);

    /// 清空缓存，返回被清除的条目数
    fn clear(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
}

// ============================================================================
// LRU 实现
// ============================================================================

/// 固定容量的本地 LRU 缓存
pub struct LocalCache {
    entries: Mutex<LruCache<CacheKey, String>>,
    capacity: usize,
    counters: Counters,
}

impl LocalCache {
    /// 创建新的本地缓存，容量为 0 时按 1 处理
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity: capacity.get(),
            counters: Counters::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn entries(&self) -> MutexGuard<'_, LruCache<CacheKey, String>> {
        // 条目本身不会因 panic 处于不一致状态，直接复用被污染的锁
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TranslationCache for LocalCache {
    fn get(&self, key: &CacheKey) -> Option<String> {
        let hit = self.entries().get(key).cloned();

        if hit.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
        }

        hit
    }

    fn put(&self, key: CacheKey, translated: String) {
        let displaced = self.entries().push(key.clone(), translated);
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);

        // push 在覆盖同键时也会返回旧值，只有不同的键才算淘汰
        if let Some((old_key, _)) = displaced {
            if old_key != key {
                self.counters.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(target_lang = %old_key.target_lang, "缓存已满，淘汰最久未使用的条目");
            }
        }
    }

    fn clear(&self) -> usize {
        let mut entries = self.entries();
        let cleared = entries.len();
        entries.clear();
        cleared
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            inserts: self.counters.inserts.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
            entries: self.len(),
            capacity: self.capacity,
        }
    }
}

// ============================================================================
// 禁用缓存
// ============================================================================

/// 不保存任何内容的缓存，每次查询都是未命中
#[derive(Debug, Default)]
pub struct NoopCache {
    misses: AtomicU64,
}

impl TranslationCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Option<String> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn put(&self, _key: CacheKey, _translated: String) {}

    fn clear(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            misses: self.misses.load(Ordering::Relaxed),
            ..CacheStats::default()
        }
    }
}

/// 按容量创建缓存，容量为 0 时禁用缓存
pub fn create_cache(capacity: usize) -> Arc<dyn TranslationCache> {
    if capacity == 0 {
        tracing::info!("翻译缓存已禁用");
        Arc::new(NoopCache::default())
    } else {
        Arc::new(LocalCache::new(capacity))
    }
}
