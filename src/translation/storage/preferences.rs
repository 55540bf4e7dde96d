//! 用户语言偏好存储
//!
//! 每个用户保存一对主/次语言代码。网关本身不读取偏好，
//! 偏好由调用方用来决定向网关请求哪些目标语言。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::languages;

/// 主/次语言偏好
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePreferences {
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub secondary_language: Option<String>,
}

impl LanguagePreferences {
    pub fn new(primary: Option<&str>, secondary: Option<&str>) -> Self {
        Self {
            primary_language: primary.map(str::to_string),
            secondary_language: secondary.map(str::to_string),
        }
    }

    /// 所有语言代码都必须在支持列表中
    pub fn validate(&self) -> TranslationResult<()> {
        for code in [&self.primary_language, &self.secondary_language]
            .into_iter()
            .flatten()
        {
            if !languages::is_supported(code) {
                return Err(TranslationError::InvalidInput(format!(
                    "不支持的语言代码: {}",
                    code
                )));
            }
        }
        Ok(())
    }
}

/// 已保存的偏好
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPreferences {
    #[serde(flatten)]
    pub preferences: LanguagePreferences,
    pub updated_at: DateTime<Utc>,
}

/// 偏好持久化接口
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, user_id: &str) -> TranslationResult<Option<StoredPreferences>>;

    /// 插入或整体替换用户的偏好
    async fn upsert(
        &self,
        user_id: &str,
        preferences: LanguagePreferences,
    ) -> TranslationResult<StoredPreferences>;
}

/// 进程内偏好存储
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    entries: DashMap<String, StoredPreferences>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, user_id: &str) -> TranslationResult<Option<StoredPreferences>> {
        Ok(self.entries.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn upsert(
        &self,
        user_id: &str,
        preferences: LanguagePreferences,
    ) -> TranslationResult<StoredPreferences> {
        preferences.validate()?;

        let stored = StoredPreferences {
            preferences,
            updated_at: Utc::now(),
        };
        self.entries.insert(user_id.to_string(), stored.clone());

        tracing::debug!(user_id, "已保存语言偏好");
        Ok(stored)
    }
}
