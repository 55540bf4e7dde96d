//! Web 模块的数据类型定义

use std::sync::Arc;

use axum::{http::StatusCode, response::Json};
use serde::Serialize;

use crate::translation::core::{ServiceStatsSnapshot, TranslationGateway};
use crate::translation::languages::Language;
use crate::translation::storage::{CacheStats, InMemoryPreferenceStore, PreferenceStore};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub gateway: TranslationGateway,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl AppState {
    /// 使用进程内偏好存储创建状态
    pub fn new(gateway: TranslationGateway) -> Self {
        Self {
            gateway,
            preferences: Arc::new(InMemoryPreferenceStore::new()),
        }
    }

    pub fn with_preference_store(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = store;
        self
    }
}

/// 处理器统一的错误响应
pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": message })))
}

pub fn missing_parameters() -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "Missing required parameters")
}

/// 语言列表响应
#[derive(Serialize)]
pub struct LanguagesResponse {
    pub languages: &'static [Language],
}

/// 缓存统计响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub translation_enabled: bool,
    pub hit_rate: f64,
    pub cache: CacheStats,
    pub gateway: ServiceStatsSnapshot,
}

/// 缓存清理响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheClearResponse {
    pub success: bool,
    pub cleared_entries: usize,
}

/// 健康检查响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub translation_enabled: bool,
    pub version: &'static str,
}
