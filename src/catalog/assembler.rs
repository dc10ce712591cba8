//! 结果组装模块
//!
//! 将翻译后的扁平条目转换为最终输出记录，并负责 JSON 的读写。

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::FlatEntry;
use crate::core::CatalogResult;

/// 输出目录中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub category: String,
    /// 只包含成功翻译的语言
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl From<FlatEntry> for CatalogRecord {
    fn from(entry: FlatEntry) -> Self {
        Self {
            name: entry.item.name,
            href: entry.item.href,
            category: entry.category,
            translations: entry.translations,
        }
    }
}

/// 组装最终目录，保持扁平序列的顺序
pub fn assemble(entries: Vec<FlatEntry>) -> Vec<CatalogRecord> {
    entries.into_iter().map(CatalogRecord::from).collect()
}

/// 以两个空格缩进的格式写出 JSON 数组
pub fn write_catalog(path: &Path, records: &[CatalogRecord]) -> CatalogResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;

    tracing::info!("已写出 {} 条记录到 {}", records.len(), path.display());
    Ok(())
}

/// 读取之前写出的目录
pub fn read_catalog(path: &Path) -> CatalogResult<Vec<CatalogRecord>> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}
