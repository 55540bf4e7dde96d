//! 支持的语言列表
//!
//! 静态配置数据，供网关的调用方（语言选择、偏好校验）使用。
//! 网关本身不拒绝未列出的语言代码。

use serde::Serialize;

/// 语言条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

const fn lang(code: &'static str, name: &'static str, native_name: &'static str) -> Language {
    Language {
        code,
        name,
        native_name,
    }
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    lang("en", "English", "English"),
    lang("es", "Spanish", "Español"),
    lang("fr", "French", "Français"),
    lang("de", "German", "Deutsch"),
    lang("it", "Italian", "Italiano"),
    lang("pt", "Portuguese", "Português"),
    lang("ru", "Russian", "Русский"),
    lang("ja", "Japanese", "日本語"),
    lang("ko", "Korean", "한국어"),
    lang("zh", "Chinese", "中文"),
    lang("ar", "Arabic", "العربية"),
    lang("hi", "Hindi", "हिन्दी"),
    lang("sv", "Swedish", "Svenska"),
    lang("no", "Norwegian", "Norsk"),
    lang("da", "Danish", "Dansk"),
    lang("fi", "Finnish", "Suomi"),
    lang("nl", "Dutch", "Nederlands"),
    lang("pl", "Polish", "Polski"),
    lang("tr", "Turkish", "Türkçe"),
    lang("th", "Thai", "ไทย"),
];

pub fn supported_languages() -> &'static [Language] {
    SUPPORTED_LANGUAGES
}

/// 按代码查找语言
pub fn find_language(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|language| language.code == code)
}

pub fn is_supported(code: &str) -> bool {
    find_language(code).is_some()
}
