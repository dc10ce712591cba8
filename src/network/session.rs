//! HTTP会话模块
//!
//! 封装阻塞式 `reqwest` 客户端。整个流程是单线程顺序执行的，
//! 文档下载和翻译请求共用同一个客户端。

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::core::{parse_content_type, CatalogError, CatalogResult};
use crate::utils::url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("wikilist/", env!("CARGO_PKG_VERSION"));

/// HTTP会话
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    user_agent: String,
}

impl Session {
    /// 创建会话
    ///
    /// `timeout` 以秒为单位，0 表示不设置超时。
    pub fn new(user_agent: Option<&str>, timeout: u64) -> CatalogResult<Self> {
        let user_agent = user_agent.unwrap_or(DEFAULT_USER_AGENT).to_string();

        let mut builder = Client::builder().user_agent(user_agent.clone());
        if timeout > 0 {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, user_agent })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// 下载文档，返回原始字节和响应头中声明的字符集（可能为空）
    pub fn retrieve_document(&self, url: &Url) -> CatalogResult<(Vec<u8>, String)> {
        tracing::info!("下载文档: {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| CatalogError::Fetch(format!("{url}: {e}")))?;

        let (media_type, charset) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(parse_content_type)
            .unwrap_or_default();

        if !media_type.is_empty() && !media_type.starts_with("text/") {
            return Err(CatalogError::Fetch(format!(
                "Unsupported media type: {media_type}"
            )));
        }

        let data = response
            .bytes()
            .map_err(|e| CatalogError::Fetch(format!("{url}: {e}")))?;

        Ok((data.to_vec(), charset))
    }
}
