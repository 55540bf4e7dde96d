//! 远程翻译服务接口
//!
//! 网关只通过 [`TranslationProvider`] 访问远程服务，测试中可替换为内存实现。

pub mod google;

use async_trait::async_trait;

use crate::translation::error::TranslationResult;

pub use google::GoogleTranslateProvider;

/// 远程翻译服务
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 服务名称，用于日志
    fn name(&self) -> &str;

    /// 翻译一组文本
    ///
    /// 成功时返回的译文数量和顺序必须与输入一致。
    async fn translate(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> TranslationResult<Vec<String>>;
}
