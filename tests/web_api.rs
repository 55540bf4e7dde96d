//! HTTP 端点集成测试

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use translation_gateway::web::{create_router, AppState, WebConfig};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{default_gateway, pass_through_gateway, MockProvider};

fn test_web_config() -> WebConfig {
    WebConfig {
        bind_addr: "127.0.0.1".to_string(),
        port: 7080,
        cors_origins: vec!["*".to_string()],
    }
}

fn app() -> (Arc<MockProvider>, Router) {
    let (provider, gateway) = default_gateway();
    let state = Arc::new(AppState::new(gateway));
    (provider, create_router(state, &test_web_config()))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn assert_missing_parameters(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, &json!({ "error": "Missing required parameters" }));
}

#[tokio::test]
async fn test_translate_endpoint() {
    let (provider, app) = app();

    let (status, body) = send(
        app,
        post_json(
            "/api/translate",
            r#"{"text":"Hello","targetLanguage":"es","sourceLanguage":"en"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translatedText": "Hola" }));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_translate_defaults_source_language() {
    let (provider, app) = app();

    let (status, _) = send(
        app,
        post_json("/api/translate", r#"{"text":"Hello","targetLanguage":"fr"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.calls()[0].source_lang, "en");
}

#[tokio::test]
async fn test_translate_missing_parameters() {
    let cases = [
        r#"{"targetLanguage":"es"}"#,
        r#"{"text":"Hello"}"#,
        r#"{"text":"","targetLanguage":"es"}"#,
        r#"{"text":"Hello","targetLanguage":""}"#,
        r#"{"text":42,"targetLanguage":"es"}"#,
        r#"not json"#,
    ];

    for case in cases {
        let (provider, app) = app();
        let (status, body) = send(app, post_json("/api/translate", case)).await;
        assert_missing_parameters(status, &body);
        assert_eq!(provider.call_count(), 0, "case: {}", case);
    }
}

#[tokio::test]
async fn test_translate_failure_still_returns_ok() {
    let (provider, app) = app();
    provider.set_failing(true);

    let (status, body) = send(
        app,
        post_json("/api/translate", r#"{"text":"Hello","targetLanguage":"es"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translatedText"], "Hello");
}

#[tokio::test]
async fn test_batch_endpoint() {
    let (provider, app) = app();

    let (status, body) = send(
        app,
        post_json(
            "/api/translate/batch",
            r#"{"texts":["Hello","Goodbye"],"targetLanguage":"es"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "translatedTexts": ["Hola", MockProvider::expected("es", "Goodbye")] })
    );
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_batch_missing_parameters() {
    let cases = [
        r#"{"targetLanguage":"es"}"#,
        r#"{"texts":"Hello","targetLanguage":"es"}"#,
        r#"{"texts":["Hello"]}"#,
        r#"{"texts":["Hello",1],"targetLanguage":"es"}"#,
    ];

    for case in cases {
        let (_, app) = app();
        let (status, body) = send(app, post_json("/api/translate/batch", case)).await;
        assert_missing_parameters(status, &body);
    }
}

#[tokio::test]
async fn test_batch_empty_list_is_valid() {
    let (provider, app) = app();

    let (status, body) = send(
        app,
        post_json("/api/translate/batch", r#"{"texts":[],"targetLanguage":"es"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translatedTexts": [] }));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_languages_endpoint() {
    let (_, app) = app();

    let (status, body) = send(app, get("/api/languages")).await;

    assert_eq!(status, StatusCode::OK);
    let languages = body["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 20);
    assert_eq!(languages[0]["code"], "en");
    assert!(languages
        .iter()
        .any(|l| l["code"] == "ja" && l["nativeName"] == "日本語"));
}

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let (_, gateway) = default_gateway();
    let state = Arc::new(AppState::new(gateway));
    let app = create_router(state, &test_web_config());

    for _ in 0..2 {
        let (status, _) = send(
            app.clone(),
            post_json("/api/translate", r#"{"text":"Hello","targetLanguage":"es"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, stats) = send(app.clone(), get("/api/cache/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["translationEnabled"], true);
    assert_eq!(stats["cache"]["entries"], 1);
    assert_eq!(stats["cache"]["hits"], 1);
    assert_eq!(stats["gateway"]["remoteCalls"], 1);
    assert_eq!(stats["hitRate"], 0.5);

    let (status, cleared) = send(app.clone(), post_json("/api/cache/clear", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared, json!({ "success": true, "clearedEntries": 1 }));

    let (_, stats) = send(app, get("/api/cache/stats")).await;
    assert_eq!(stats["cache"]["entries"], 0);
}

#[tokio::test]
async fn test_health_reports_pass_through_mode() {
    let state = Arc::new(AppState::new(pass_through_gateway()));
    let app = create_router(state, &test_web_config());

    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["translationEnabled"], false);
}

#[tokio::test]
async fn test_pass_through_translate_returns_input() {
    let state = Arc::new(AppState::new(pass_through_gateway()));
    let app = create_router(state, &test_web_config());

    let (status, body) = send(
        app,
        post_json("/api/translate", r#"{"text":"Hello","targetLanguage":"de"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translatedText"], "Hello");
}

fn with_user(mut request: Request<Body>, user: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert("x-user-id", user.parse().unwrap());
    request
}

#[tokio::test]
async fn test_preferences_require_user() {
    let (_, app) = app();

    let (status, _) = send(app.clone(), get("/api/user/language-preferences")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        app,
        post_json(
            "/api/user/language-preferences",
            r#"{"primaryLanguage":"es"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_preferences_roundtrip_per_user() {
    let (_, app) = app();

    let (status, body) = send(
        app.clone(),
        with_user(get("/api/user/language-preferences"), "user-1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "primaryLanguage": null, "secondaryLanguage": null })
    );

    let (status, saved) = send(
        app.clone(),
        with_user(
            post_json(
                "/api/user/language-preferences",
                r#"{"primaryLanguage":"es","secondaryLanguage":"fr"}"#,
            ),
            "user-1",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["primaryLanguage"], "es");
    assert!(saved["updatedAt"].is_string());

    let (_, body) = send(
        app.clone(),
        with_user(get("/api/user/language-preferences"), "user-1"),
    )
    .await;
    assert_eq!(
        body,
        json!({ "primaryLanguage": "es", "secondaryLanguage": "fr" })
    );

    let (_, other) = send(
        app,
        with_user(get("/api/user/language-preferences"), "user-2"),
    )
    .await;
    assert_eq!(other["primaryLanguage"], Value::Null);
}

#[tokio::test]
async fn test_preferences_reject_unsupported_language() {
    let (_, app) = app();

    let (status, body) = send(
        app.clone(),
        with_user(
            post_json(
                "/api/user/language-preferences",
                r#"{"primaryLanguage":"klingon"}"#,
            ),
            "user-1",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(
        app,
        with_user(
            post_json("/api/user/language-preferences", "{broken"),
            "user-1",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
