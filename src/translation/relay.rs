//! 客户端转发层
//!
//! 不持有翻译服务凭证的调用方（浏览器端、其他服务）通过本模块访问网关的
//! HTTP 端点。源语言与目标语言相同时不发起请求；任何传输失败都返回原文，
//! 与网关本身的降级约定一致。

use std::time::Duration;

use crate::translation::config::constants;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::protocol::{
    BatchTranslateRequest, BatchTranslateResponse, TranslateRequest, TranslateResponse,
    TRANSLATE_BATCH_PATH, TRANSLATE_PATH,
};
use crate::translation::storage::preferences::LanguagePreferences;

/// 主/次语言的翻译结果，未配置或与源语言相同的一侧为 `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferredTranslations<T> {
    pub primary: Option<T>,
    pub secondary: Option<T>,
}

#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    /// 创建指向网关根地址的客户端，例如 `http://127.0.0.1:7080`
    pub fn new(base_url: impl Into<String>) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 通过网关翻译单条文本，失败时返回原文
    pub async fn translate(&self, text: &str, target_lang: &str, source_lang: Option<&str>) -> String {
        let source_lang = source_lang.unwrap_or(constants::DEFAULT_SOURCE_LANG);
        if source_lang == target_lang {
            return text.to_string();
        }

        let request = TranslateRequest {
            text: Some(text.to_string()),
            target_language: Some(target_lang.to_string()),
            source_language: Some(source_lang.to_string()),
        };

        match self.post::<_, TranslateResponse>(TRANSLATE_PATH, &request).await {
            Ok(response) => response.translated_text,
            Err(e) => {
                e.log("转发翻译请求失败，返回原文");
                text.to_string()
            }
        }
    }

    /// 通过网关批量翻译，失败时返回原文列表
    pub async fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Vec<String> {
        let source_lang = source_lang.unwrap_or(constants::DEFAULT_SOURCE_LANG);
        if source_lang == target_lang {
            return texts.to_vec();
        }

        let request = BatchTranslateRequest {
            texts: Some(texts.to_vec()),
            target_language: Some(target_lang.to_string()),
            source_language: Some(source_lang.to_string()),
        };

        match self
            .post::<_, BatchTranslateResponse>(TRANSLATE_BATCH_PATH, &request)
            .await
        {
            Ok(response) if response.translated_texts.len() == texts.len() => {
                response.translated_texts
            }
            Ok(response) => {
                tracing::warn!(
                    submitted = texts.len(),
                    returned = response.translated_texts.len(),
                    "网关返回的译文数量不正确，返回原文"
                );
                texts.to_vec()
            }
            Err(e) => {
                e.log("转发批量翻译请求失败，返回原文");
                texts.to_vec()
            }
        }
    }

    /// 按用户偏好同时翻译为主/次语言，源语言固定为默认源语言
    pub async fn translate_for_preferences(
        &self,
        text: &str,
        preferences: &LanguagePreferences,
    ) -> PreferredTranslations<String> {
        if text.is_empty() {
            return PreferredTranslations::default();
        }

        let primary = wanted_language(&preferences.primary_language);
        let secondary = wanted_language(&preferences.secondary_language);

        let (primary, secondary) = tokio::join!(
            async {
                match primary {
                    Some(lang) => Some(self.translate(text, lang, None).await),
                    None => None,
                }
            },
            async {
                match secondary {
                    Some(lang) => Some(self.translate(text, lang, None).await),
                    None => None,
                }
            },
        );

        PreferredTranslations { primary, secondary }
    }

    /// 批量版本的 [`translate_for_preferences`](Self::translate_for_preferences)
    pub async fn translate_batch_for_preferences(
        &self,
        texts: &[String],
        preferences: &LanguagePreferences,
    ) -> PreferredTranslations<Vec<String>> {
        if texts.is_empty() {
            return PreferredTranslations::default();
        }

        let primary = wanted_language(&preferences.primary_language);
        let secondary = wanted_language(&preferences.secondary_language);

        let (primary, secondary) = tokio::join!(
            async {
                match primary {
                    Some(lang) => Some(self.translate_batch(texts, lang, None).await),
                    None => None,
                }
            },
            async {
                match secondary {
                    Some(lang) => Some(self.translate_batch(texts, lang, None).await),
                    None => None,
                }
            },
        );

        PreferredTranslations { primary, secondary }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> TranslationResult<R>
    where
        B: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::ProviderError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

/// 偏好语言中需要翻译的一项：未设置或等于默认源语言时跳过
fn wanted_language(code: &Option<String>) -> Option<&str> {
    code.as_deref()
        .filter(|code| !code.is_empty() && *code != constants::DEFAULT_SOURCE_LANG)
}
