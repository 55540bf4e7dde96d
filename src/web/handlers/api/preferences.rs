//! 用户语言偏好API处理器
//!
//! 调用方身份由前置的身份服务通过 `x-user-id` 请求头提供，
//! 本服务不做认证。

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::translation::error::TranslationError;
use crate::translation::storage::{LanguagePreferences, StoredPreferences};
use crate::web::types::{api_error, ApiError, AppState};

pub const USER_ID_HEADER: &str = "x-user-id";

fn user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "Unauthorized"))
}

fn store_error(error: TranslationError) -> ApiError {
    match error {
        TranslationError::InvalidInput(message) => api_error(StatusCode::BAD_REQUEST, &message),
        other => {
            other.log("语言偏好存储失败");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to access preferences")
        }
    }
}

/// 读取当前用户的语言偏好，未保存过时两项均为 null
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<LanguagePreferences>, ApiError> {
    let user_id = user_id(&headers)?;

    let stored = state.preferences.get(&user_id).await.map_err(store_error)?;

    Ok(Json(stored.map(|s| s.preferences).unwrap_or_default()))
}

/// 保存当前用户的语言偏好
pub async fn save_preferences(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<LanguagePreferences>, JsonRejection>,
) -> Result<Json<StoredPreferences>, ApiError> {
    let user_id = user_id(&headers)?;
    let Json(preferences) = payload
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid preferences payload"))?;

    preferences.validate().map_err(store_error)?;

    let stored = state
        .preferences
        .upsert(&user_id, preferences)
        .await
        .map_err(store_error)?;

    Ok(Json(stored))
}
