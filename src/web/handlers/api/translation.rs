//! 翻译API处理器

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::translation::protocol::{
    BatchTranslateRequest, BatchTranslateResponse, TranslateRequest, TranslateResponse,
};
use crate::web::types::{missing_parameters, ApiError, AppState};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// 单条翻译
///
/// `text` 或 `targetLanguage` 缺失（或为空字符串）时返回 400；
/// 其余情况总是返回 200，翻译失败时响应中是原文。
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("无效的翻译请求体: {}", rejection);
        missing_parameters()
    })?;

    let (Some(text), Some(target_lang)) = (
        non_empty(request.text),
        non_empty(request.target_language),
    ) else {
        return Err(missing_parameters());
    };
    let source_lang = non_empty(request.source_language);

    let translated_text = state
        .gateway
        .translate(&text, &target_lang, source_lang.as_deref())
        .await;

    Ok(Json(TranslateResponse { translated_text }))
}

/// 批量翻译
///
/// `texts` 不是字符串数组或 `targetLanguage` 缺失时返回 400。
/// 响应中的 `translatedTexts` 与 `texts` 等长且顺序一致。
pub async fn translate_batch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchTranslateRequest>, JsonRejection>,
) -> Result<Json<BatchTranslateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("无效的批量翻译请求体: {}", rejection);
        missing_parameters()
    })?;

    let (Some(texts), Some(target_lang)) = (request.texts, non_empty(request.target_language))
    else {
        return Err(missing_parameters());
    };
    let source_lang = non_empty(request.source_language);

    let translated_texts = state
        .gateway
        .translate_batch(&texts, &target_lang, source_lang.as_deref())
        .await;

    Ok(Json(BatchTranslateResponse { translated_texts }))
}
