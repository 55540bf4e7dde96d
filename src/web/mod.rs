//! Web 服务器模块
//!
//! 把翻译网关暴露为 HTTP 端点，供不持有翻译服务凭证的调用方使用

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::translation::config::TranslationConfig;
use crate::translation::core::TranslationGateway;
use crate::translation::error::{TranslationError, TranslationResult};

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    translation_config: TranslationConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, translation_config: TranslationConfig) -> Self {
        Self {
            config,
            translation_config,
        }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> TranslationResult<()> {
        self.config.validate()?;

        let gateway = TranslationGateway::from_config(&self.translation_config)?;
        let app_state = Arc::new(AppState::new(gateway));
        let app = create_router(app_state, &self.config);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address())
            .await
            .map_err(|e| TranslationError::InternalError(format!("Failed to bind server: {}", e)))?;

        tracing::info!("Web server starting at http://{}", self.config.listen_address());

        axum::serve(listener, app)
            .await
            .map_err(|e| TranslationError::InternalError(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    create_routes()
        .with_state(app_state)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &WebConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("忽略无效的CORS源: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
