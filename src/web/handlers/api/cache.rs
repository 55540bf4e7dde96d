//! 缓存相关API处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, CacheClearResponse, CacheStatsResponse};

/// 获取缓存统计信息
pub async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let cache = state.gateway.cache_stats();

    Json(CacheStatsResponse {
        translation_enabled: state.gateway.is_enabled(),
        hit_rate: cache.hit_rate(),
        cache,
        gateway: state.gateway.stats(),
    })
}

/// 清空翻译缓存
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<CacheClearResponse> {
    let cleared_entries = state.gateway.clear_cache();

    Json(CacheClearResponse {
        success: true,
        cleared_entries,
    })
}
