//! 语言列表API处理器

use axum::response::Json;

use crate::translation::languages::supported_languages;
use crate::web::types::LanguagesResponse;

pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: supported_languages(),
    })
}
