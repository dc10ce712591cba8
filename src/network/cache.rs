//! 本地文档缓存
//!
//! 缓存文件存在时直接读取，否则下载并写入缓存。不做过期和重试处理。

use std::fs;
use std::path::{Path, PathBuf};

use markup5ever_rcdom::RcDom;

use crate::core::CatalogResult;
use crate::parsers::html::html_to_dom_detect;
use crate::utils::url::Url;

use super::session::Session;

/// 单个文档的文件缓存
#[derive(Debug, Clone)]
pub struct DocumentCache {
    path: PathBuf,
}

impl DocumentCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn read(&self) -> CatalogResult<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }

    pub fn write(&self, data: &[u8]) -> CatalogResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// 读取缓存或下载文档，并解析为 DOM
    pub fn load_or_fetch(&self, session: &Session, url: &Url) -> CatalogResult<RcDom> {
        if self.exists() {
            tracing::info!("使用缓存文档: {}", self.path.display());
            let data = self.read()?;
            return html_to_dom_detect(&data, None);
        }

        let (data, charset) = session.retrieve_document(url)?;
        self.write(&data)?;
        tracing::debug!("已缓存 {} 字节到 {}", data.len(), self.path.display());

        html_to_dom_detect(&data, Some(&charset))
    }
}
