//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::translation::protocol::{TRANSLATE_BATCH_PATH, TRANSLATE_PATH};
use crate::web::{handlers::*, types::AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        // 翻译
        .route(TRANSLATE_PATH, post(translate_text))
        .route(TRANSLATE_BATCH_PATH, post(translate_batch))
        .route("/api/languages", get(list_languages))
        // 缓存管理
        .route("/api/cache/stats", get(get_cache_stats))
        .route("/api/cache/clear", post(clear_cache))
        // 用户偏好
        .route(
            "/api/user/language-preferences",
            get(get_preferences).post(save_preferences),
        )
}
