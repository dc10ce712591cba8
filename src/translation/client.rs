//! 翻译客户端模块
//!
//! [`Translator`] 是批处理器依赖的唯一接口：给定一批源文本、源语言和目标语言，
//! 返回等长的译文列表。[`HttpTranslator`] 通过 HTTP 调用兼容 Google Cloud
//! Translation v2 的接口。

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::translation::error::{TranslationError, TranslationResult};
use crate::utils::url::Url;

/// 默认翻译接口地址
pub const DEFAULT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// 请求的文本格式
///
/// 条目名称总是以纯文本发送。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    #[default]
    Text,
}

/// 翻译服务接口
pub trait Translator {
    /// 翻译一批文本，成功时返回的列表与 `texts` 一一对应
    fn translate(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
        format: TextFormat,
    ) -> TranslationResult<Vec<String>>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: TextFormat,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// HTTP 翻译客户端
///
/// 令牌由调用方提供，客户端不负责获取或刷新。
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: Client,
    api_url: Url,
    auth_token: Option<String>,
}

impl HttpTranslator {
    pub fn new(client: Client, api_url: &str, auth_token: Option<String>) -> TranslationResult<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| TranslationError::ConfigError(format!("无效的API地址 {}: {}", api_url, e)))?;

        Ok(Self {
            client,
            api_url,
            auth_token,
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

impl Translator for HttpTranslator {
    fn translate(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
        format: TextFormat,
    ) -> TranslationResult<Vec<String>> {
        if target.is_empty() {
            return Err(TranslationError::InvalidInput("目标语言为空".to_string()));
        }

        let request = TranslateRequest {
            q: texts,
            source,
            target,
            format,
        };

        let mut builder = self.client.post(self.api_url.as_str()).json(&request);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send()?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(TranslationError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranslateResponse = response.json()?;

        Ok(body
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }
}
