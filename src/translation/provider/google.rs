//! Google Cloud Translation v2 客户端

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TranslationProvider;
use crate::translation::config::TranslationConfig;
use crate::translation::error::{TranslationError, TranslationResult};

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateEnvelope {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<TranslatedItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedItem {
    translated_text: String,
}

pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GoogleTranslateProvider {
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslationError::ConfigError(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// 从配置创建，没有凭证时返回 `None`
    pub fn from_config(config: &TranslationConfig) -> TranslationResult<Option<Self>> {
        if !config.has_credential() {
            return Ok(None);
        }

        let key = config.api_key.as_deref().unwrap_or_default().trim();
        Ok(Some(Self::new(key, config.api_url.clone(), config.request_timeout())?))
    }

    fn parse_response(body: &str, expected: usize) -> TranslationResult<Vec<String>> {
        let envelope: TranslateEnvelope = serde_json::from_str(body)
            .map_err(|e| TranslationError::ParseError(format!("无法解析翻译响应: {}", e)))?;

        let translations: Vec<String> = envelope
            .data
            .translations
            .into_iter()
            .map(|item| item.translated_text)
            .collect();

        if translations.len() != expected {
            return Err(TranslationError::ParseError(format!(
                "译文数量不匹配: 提交 {} 条，返回 {} 条",
                expected,
                translations.len()
            )));
        }

        Ok(translations)
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &str {
        "google-translate-v2"
    }

    async fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = TranslateBody {
            q: texts,
            source: source_lang,
            target: target_lang,
            format: "text",
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;

        if !status.is_success() {
            return Err(TranslationError::ProviderError {
                status: status.as_u16(),
                message: payload.chars().take(200).collect(),
            });
        }

        Self::parse_response(&payload, texts.len())
    }
}
